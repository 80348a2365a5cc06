use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
    Frame,
};
use snapdeck_core::{Extent, Orientation, PageContent, PageLayout};

use crate::app::App;
use crate::theme::Theme;

pub struct CarouselWidget;

impl CarouselWidget {
    /// Draw every page that overlaps the viewport at the pager's offset
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        frame.render_widget(Block::default().style(Style::default().bg(theme.bg0)), area);

        let pager = &app.pager;
        let host = pager.host();
        let page_size = pager.page_size();
        if page_size <= 0.0 || area.width == 0 || area.height == 0 {
            return;
        }

        let orientation = host.orientation();
        let (viewport, cross) = match orientation {
            Orientation::Horizontal => (area.width, area.height),
            Orientation::Vertical => (area.height, area.width),
        };
        let stride = page_size.round().max(1.0) as u16;
        let count = host.pages().len();

        for (index, page) in host.pages().iter().enumerate() {
            let start = (index as f32 * page_size - host.offset()).round() as i32;
            if start + stride as i32 <= 0 || start >= viewport as i32 {
                continue;
            }
            let Some(layout) = host.layout(index) else {
                continue;
            };

            let (width, height) = match orientation {
                Orientation::Horizontal => (stride, cross),
                Orientation::Vertical => (cross, stride),
            };
            let card = PageCard {
                page,
                layout,
                number: index + 1,
                count,
                active: index == pager.current_page(),
                theme,
            };
            let page_buf = card.draw(width, height);
            blit(frame.buffer_mut(), area, &page_buf, start, orientation);
        }
    }
}

/// One page rendered into its own buffer before being clipped into view
struct PageCard<'a> {
    page: &'a PageContent,
    layout: &'a PageLayout,
    number: usize,
    count: usize,
    active: bool,
    theme: &'a Theme,
}

impl PageCard<'_> {
    fn draw(&self, width: u16, height: u16) -> Buffer {
        let bounds = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(bounds);
        let content = content_rect(self.layout, bounds);
        if content.width == 0 || content.height == 0 {
            return buf;
        }

        let border = if self.active {
            self.theme.page_active
        } else {
            self.theme.page_inactive
        };
        let title = Line::from(vec![
            Span::styled(
                format!(" {}/{} ", self.number, self.count),
                Style::default().fg(self.theme.grey1),
            ),
            Span::styled(
                format!("{} ", self.page.title),
                Style::default()
                    .fg(self.theme.fg0)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(self.theme.bg1));

        Paragraph::new(self.page.body.as_str())
            .style(Style::default().fg(self.theme.fg1))
            .wrap(Wrap { trim: true })
            .block(block)
            .render(content, &mut buf);
        buf
    }
}

/// Area inside the page's margins, sized by the layout's extents
fn content_rect(layout: &PageLayout, bounds: Rect) -> Rect {
    let left = cells(layout.margin.left).min(bounds.width);
    let top = cells(layout.margin.top).min(bounds.height);
    let width = match layout.width {
        Extent::Points(points) => cells(points),
        Extent::Full => bounds.width,
    };
    let height = match layout.height {
        Extent::Points(points) => cells(points),
        Extent::Full => bounds.height,
    };
    Rect::new(left, top, width, height).intersection(bounds)
}

fn cells(value: f32) -> u16 {
    value.round().clamp(0.0, u16::MAX as f32) as u16
}

/// Copy `page` into `dest` shifted by `start` cells along the paging axis,
/// dropping whatever falls outside `area`
fn blit(dest: &mut Buffer, area: Rect, page: &Buffer, start: i32, orientation: Orientation) {
    let bounds = page.area;
    for py in 0..bounds.height {
        for px in 0..bounds.width {
            let (x, y) = match orientation {
                Orientation::Horizontal => (area.x as i32 + start + px as i32, (area.y + py) as i32),
                Orientation::Vertical => ((area.x + px) as i32, area.y as i32 + start + py as i32),
            };
            if x < area.left() as i32
                || x >= area.right() as i32
                || y < area.top() as i32
                || y >= area.bottom() as i32
            {
                continue;
            }
            if let (Some(src), Some(dst)) = (page.cell((px, py)), dest.cell_mut((x as u16, y as u16)))
            {
                *dst = src.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapdeck_core::Padding;

    fn filled(width: u16, height: u16, symbol: &str) -> Buffer {
        let mut buf = Buffer::empty(Rect::new(0, 0, width, height));
        for y in 0..height {
            for x in 0..width {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_symbol(symbol);
                }
            }
        }
        buf
    }

    fn symbol_at(buf: &Buffer, x: u16, y: u16) -> &str {
        buf.cell((x, y)).map(|cell| cell.symbol()).unwrap_or("")
    }

    #[test]
    fn test_content_rect_respects_margins() {
        let layout = PageLayout {
            width: Extent::Points(16.0),
            height: Extent::Points(6.0),
            margin: Padding::new(2.0, 2.0, 1.0, 1.0),
        };
        let rect = content_rect(&layout, Rect::new(0, 0, 20, 8));
        assert_eq!(rect, Rect::new(2, 1, 16, 6));
    }

    #[test]
    fn test_content_rect_full_extent() {
        let layout = PageLayout {
            width: Extent::Full,
            height: Extent::Full,
            margin: Padding::default(),
        };
        assert_eq!(content_rect(&layout, Rect::new(0, 0, 10, 4)), Rect::new(0, 0, 10, 4));
    }

    #[test]
    fn test_blit_clips_partially_scrolled_page() {
        let area = Rect::new(0, 0, 10, 2);
        let mut dest = Buffer::empty(area);
        let page = filled(10, 2, "x");

        // Page scrolled 4 cells to the left: columns 0..6 are covered
        blit(&mut dest, area, &page, -4, Orientation::Horizontal);
        assert_eq!(symbol_at(&dest, 0, 0), "x");
        assert_eq!(symbol_at(&dest, 5, 1), "x");
        assert_eq!(symbol_at(&dest, 6, 0), " ");
    }

    #[test]
    fn test_blit_vertical_offset() {
        let area = Rect::new(0, 0, 4, 6);
        let mut dest = Buffer::empty(area);
        let page = filled(4, 6, "y");

        blit(&mut dest, area, &page, 4, Orientation::Vertical);
        assert_eq!(symbol_at(&dest, 0, 3), " ");
        assert_eq!(symbol_at(&dest, 0, 4), "y");
        assert_eq!(symbol_at(&dest, 3, 5), "y");
    }
}
