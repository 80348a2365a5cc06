//! Headless gesture replay.
//!
//! Scripts are plain text, one step per line, `#` starts a comment.
//! Positions are along the paging axis:
//!
//! ```text
//! down 0        # pointer down
//! move -120     # pointer move
//! up -120       # pointer release
//! cancel        # pointer cancel at the last position
//! wheel 30      # wheel/trackpad delta along the paging axis
//! scroll 250    # offset reached by the nested viewport on its own
//! settled       # the nested viewport went quiet
//! next | prev   # step one page
//! goto 2        # animated navigation; `goto 2 now` jumps
//! resize 400    # new container extent along the paging axis
//! pages 2       # the container now holds this many pages
//! flip          # toggle orientation
//! wait 400      # let time pass in frame-sized steps
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use snapdeck_core::{
    AppConfig, InputDisposition, Orientation, PageHost, PageLayout, Pager, PagerConfig,
    PagerEvent, PointerEvent, PointerKind, Point, Size,
};

const DEMO_SCRIPT: &str = "\
# Drag 120 units towards the next page and let go
down 0
move -60
move -120
up -120
wait 400
# Wheel a little past page 1 and wait for the settle
wheel 30
wait 50
wheel 20
wait 500
# Interrupt an animation with a new target
goto 3
wait 100
goto 0
wait 400
";

#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    Pointer(PointerKind, Option<f32>),
    Wheel(f32),
    Scroll(f32),
    Settled,
    Next,
    Previous,
    GoTo { page: usize, animate: bool },
    Resize(f32),
    Pages(usize),
    Flip,
    Wait(u64),
}

fn parse_script(script: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    for (number, raw) in script.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let step = parse_step(line).with_context(|| format!("line {}: '{}'", number + 1, line))?;
        steps.push(step);
    }
    Ok(steps)
}

fn parse_step(line: &str) -> Result<Step> {
    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or("");
    let args: Vec<&str> = words.collect();

    let number = |index: usize| -> Result<f32> {
        let arg = args.get(index).context("missing number")?;
        arg.parse::<f32>()
            .with_context(|| format!("'{}' is not a number", arg))
    };

    let step = match command {
        "down" => Step::Pointer(PointerKind::Down, Some(number(0)?)),
        "move" => Step::Pointer(PointerKind::Move, Some(number(0)?)),
        "up" => Step::Pointer(PointerKind::Up, Some(number(0)?)),
        "cancel" => Step::Pointer(PointerKind::Cancel, None),
        "wheel" => Step::Wheel(number(0)?),
        "scroll" => Step::Scroll(number(0)?),
        "settled" => Step::Settled,
        "next" => Step::Next,
        "prev" => Step::Previous,
        "goto" => Step::GoTo {
            page: number(0)?.max(0.0) as usize,
            animate: args.get(1) != Some(&"now"),
        },
        "resize" => Step::Resize(number(0)?),
        "pages" => Step::Pages(number(0)?.max(0.0) as usize),
        "flip" => Step::Flip,
        "wait" => Step::Wait(number(0)?.max(0.0) as u64),
        other => bail!("unknown step '{}'", other),
    };
    Ok(step)
}

/// Container with a fixed page count whose primary extent the script can change
#[derive(Debug)]
struct ScriptHost {
    extent: f32,
    pages: usize,
    offset: f32,
}

impl PageHost for ScriptHost {
    fn container_size(&self) -> Size {
        Size::new(self.extent, self.extent)
    }

    fn page_count(&self) -> usize {
        self.pages
    }

    fn apply_page_layout(&mut self, _index: usize, _layout: &PageLayout) {}

    fn set_scroll_offset(&mut self, _orientation: Orientation, offset: f32) {
        self.offset = offset;
    }
}

/// Replays steps against a pager and records one line per observable change
struct Simulation {
    pager: Pager<ScriptHost>,
    frame: Duration,
    elapsed: Duration,
    last_position: f32,
    lines: Vec<String>,
}

impl Simulation {
    fn new(config: PagerConfig, pages: usize, page_size: f32, frame: Duration) -> Self {
        let host = ScriptHost {
            extent: page_size,
            pages,
            offset: 0.0,
        };
        Self {
            pager: Pager::new(host, config),
            frame: frame.max(Duration::from_millis(1)),
            elapsed: Duration::ZERO,
            last_position: 0.0,
            lines: Vec::new(),
        }
    }

    fn point(&self, along: f32) -> Point {
        match self.pager.config().orientation {
            Orientation::Horizontal => Point::new(along, 0.0),
            Orientation::Vertical => Point::new(0.0, along),
        }
    }

    fn apply(&mut self, step: Step) {
        let disposition = match step {
            Step::Pointer(kind, position) => {
                let along = position.unwrap_or(self.last_position);
                self.last_position = along;
                let event = PointerEvent::new(kind, self.point(along), 0);
                Some(self.pager.handle_pointer(&event))
            }
            Step::Wheel(delta) => {
                let Point { x, y } = self.point(delta);
                Some(self.pager.wheel(x, y))
            }
            Step::Scroll(offset) => {
                self.pager.sync_external_offset(offset);
                None
            }
            Step::Settled => {
                self.pager.notify_external_scroll_settled();
                None
            }
            Step::Next => {
                self.pager.move_next();
                None
            }
            Step::Previous => {
                self.pager.move_previous();
                None
            }
            Step::GoTo { page, animate } => {
                self.pager.go_to_page(page, animate);
                None
            }
            Step::Resize(extent) => {
                self.pager.host_mut().extent = extent;
                self.pager.relayout();
                None
            }
            Step::Pages(count) => {
                self.pager.host_mut().pages = count;
                self.pager.pages_changed();
                None
            }
            Step::Flip => {
                let config = self.pager.config().clone();
                self.pager
                    .set_geometry(config.orientation.toggled(), config.page_size, config.padding);
                None
            }
            Step::Wait(ms) => {
                self.wait(Duration::from_millis(ms));
                return;
            }
        };

        let note = match disposition {
            Some(InputDisposition::Ignored) => " (ignored)",
            Some(InputDisposition::Consumed) => " (consumed)",
            Some(InputDisposition::ConsumedImmediate) => " (consumed immediately)",
            None => "",
        };
        self.record(format!("{:?}{}", step, note));
    }

    fn wait(&mut self, duration: Duration) {
        let mut remaining = duration;
        while !remaining.is_zero() {
            let dt = remaining.min(self.frame);
            remaining -= dt;
            self.elapsed += dt;
            self.pager.advance(dt);
            self.drain();
        }
    }

    fn record(&mut self, what: String) {
        self.lines.push(format!(
            "{:>6}ms  {:<44} offset {:>8.2}  page {}  {:?}",
            self.elapsed.as_millis(),
            what,
            self.pager.offset(),
            self.pager.current_page(),
            self.pager.state_kind(),
        ));
        self.drain();
    }

    fn drain(&mut self) {
        for event in self.pager.drain_events() {
            let PagerEvent::PageChanged(page) = event;
            self.lines
                .push(format!("{:>6}ms  -> PageChanged({})", self.elapsed.as_millis(), page));
        }
    }
}

fn simulate(
    config: PagerConfig,
    steps: &[Step],
    pages: usize,
    page_size: f32,
    frame: Duration,
) -> Vec<String> {
    let mut simulation = Simulation::new(config, pages, page_size, frame);
    for step in steps {
        simulation.apply(*step);
    }
    simulation.lines
}

pub fn run(
    config: &AppConfig,
    script: Option<&Path>,
    pages: usize,
    page_size: f32,
    frame_ms: u64,
) -> Result<()> {
    let source = match script {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => DEMO_SCRIPT.to_string(),
    };
    let steps = parse_script(&source)?;

    let mut pager_config = config.pager_config();
    // The command line decides the geometry
    pager_config.page_size = 0.0;

    for line in simulate(
        pager_config,
        &steps,
        pages,
        page_size,
        Duration::from_millis(frame_ms),
    ) {
        println!("{}", line);
    }
    Ok(())
}
