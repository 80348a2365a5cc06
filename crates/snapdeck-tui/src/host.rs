use ratatui::layout::Rect;
use snapdeck_core::{Orientation, PageContent, PageHost, PageLayout, Size};

/// Terminal-side page container.
///
/// Extents are terminal cells. The pager writes page layouts and the
/// paging-axis scroll offset here; the carousel widget reads them back when
/// drawing.
#[derive(Debug, Clone)]
pub struct CarouselHost {
    area: Rect,
    pages: Vec<PageContent>,
    layouts: Vec<Option<PageLayout>>,
    offset: f32,
    orientation: Orientation,
}

impl CarouselHost {
    pub fn new(pages: Vec<PageContent>) -> Self {
        let layouts = vec![None; pages.len()];
        Self {
            area: Rect::default(),
            pages,
            layouts,
            offset: 0.0,
            orientation: Orientation::default(),
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Update the container area. Returns true when the extents changed and
    /// the pager needs a relayout.
    pub fn set_area(&mut self, area: Rect) -> bool {
        let resized = area.width != self.area.width || area.height != self.area.height;
        self.area = area;
        resized
    }

    pub fn pages(&self) -> &[PageContent] {
        &self.pages
    }

    pub fn set_pages(&mut self, pages: Vec<PageContent>) {
        self.layouts = vec![None; pages.len()];
        self.pages = pages;
    }

    pub fn layout(&self, index: usize) -> Option<&PageLayout> {
        self.layouts.get(index).and_then(Option::as_ref)
    }

    /// Last offset written by the pager
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Axis the last offset was written along
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Whether a terminal cell lies inside the container
    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.area.x
            && column < self.area.x.saturating_add(self.area.width)
            && row >= self.area.y
            && row < self.area.y.saturating_add(self.area.height)
    }
}

impl PageHost for CarouselHost {
    fn container_size(&self) -> Size {
        if self.area.width == 0 || self.area.height == 0 {
            return Size::UNRESOLVED;
        }
        Size::new(self.area.width as f32, self.area.height as f32)
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn apply_page_layout(&mut self, index: usize, layout: &PageLayout) {
        if let Some(slot) = self.layouts.get_mut(index) {
            *slot = Some(*layout);
        }
    }

    fn set_scroll_offset(&mut self, orientation: Orientation, offset: f32) {
        self.orientation = orientation;
        self.offset = offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapdeck_core::{Extent, Pager, PagerConfig};

    fn pages(count: usize) -> Vec<PageContent> {
        (0..count)
            .map(|i| PageContent {
                title: format!("Page {}", i + 1),
                body: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_zero_area_is_unresolved() {
        let host = CarouselHost::new(pages(2));
        assert!(host.container_size().width.is_nan());
    }

    #[test]
    fn test_set_area_reports_resize_only() {
        let mut host = CarouselHost::new(pages(2));
        assert!(host.set_area(Rect::new(0, 0, 80, 20)));
        // Moving without resizing needs no relayout
        assert!(!host.set_area(Rect::new(2, 1, 80, 20)));
        assert!(host.set_area(Rect::new(2, 1, 60, 20)));
    }

    #[test]
    fn test_contains() {
        let mut host = CarouselHost::new(pages(1));
        host.set_area(Rect::new(5, 2, 10, 4));
        assert!(host.contains(5, 2));
        assert!(host.contains(14, 5));
        assert!(!host.contains(15, 5));
        assert!(!host.contains(4, 2));
    }

    #[test]
    fn test_pager_writes_layouts_and_offset() {
        let mut host = CarouselHost::new(pages(3));
        host.set_area(Rect::new(0, 0, 80, 20));
        let mut pager = Pager::new(host, PagerConfig::default());
        pager.go_to_page(2, false);

        let host = pager.host();
        assert_eq!(host.offset(), 160.0);
        let layout = host.layout(1).expect("layout applied");
        assert_eq!(layout.width, Extent::Points(80.0));
        assert_eq!(layout.height, Extent::Points(20.0));
    }
}
