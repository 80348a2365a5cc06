use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Frame, Terminal,
};
use tracing::{info, warn};

use snapdeck_core::AppConfig;
use snapdeck_tui::{
    app::{App, Mode},
    event::{AppEvent, EventHandler},
    input::{handle_key_event, Action},
    keymap::Keymap,
    load_theme,
    widgets::{CarouselWidget, PopupWidget, StatusBarWidget, StepperWidget},
};

pub async fn run(config: Arc<AppConfig>, config_path: Option<PathBuf>) -> Result<()> {
    let keymap = Keymap::from_config(&config.keymap);
    let theme = load_theme(&config.ui.theme);
    let mut app = App::new(&config, theme);
    info!(
        pages = app.pager.page_count(),
        theme = %config.ui.theme,
        "Starting carousel"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("snapdeck"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(
        &mut terminal,
        &mut app,
        &keymap,
        &config,
        config_path.as_deref(),
    )
    .await;

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    keymap: &Keymap,
    config: &AppConfig,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut events = EventHandler::new();
    let idle_tick = Duration::from_millis(config.ui.tick_rate_ms.max(1));
    let animation_tick = config.ui.animation_tick();
    let mut last_frame = Instant::now();

    loop {
        let now = Instant::now();
        app.tick(now - last_frame);
        last_frame = now;

        terminal.draw(|frame| draw(frame, app))?;

        // Fast ticks only while something is moving
        let animating = app.needs_fast_update();
        let period = if animating { animation_tick } else { idle_tick };

        tokio::select! {
            event = events.next() => match event {
                Some(AppEvent::Key(key)) => {
                    match handle_key_event(key, app, keymap) {
                        Action::ReloadDeck => reload_deck(app, config_path),
                        action => app.handle_action(action),
                    }
                }
                Some(AppEvent::Mouse(mouse)) => {
                    app.handle_mouse(mouse);
                }
                // Picked up by the next draw through set_viewport
                Some(AppEvent::Resize(_, _)) => {}
                None => break,
            },
            _ = tokio::time::sleep(period) => {}
        }

        // Time spent idle must not count towards an animation that just started
        if !animating {
            last_frame = Instant::now();
        }

        if app.should_quit {
            break;
        }
    }

    info!("Carousel closed on page {}", app.pager.current_page());
    Ok(())
}

/// Re-read `[deck]` from the configuration file
fn reload_deck(app: &mut App, config_path: Option<&Path>) {
    let loaded = match config_path {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    match loaded {
        Ok(config) => app.set_pages(config.deck.pages),
        Err(e) => {
            warn!("Failed to reload deck: {}", e);
            app.status_message = Some(format!("Reload failed: {}", e));
        }
    }
}

fn draw(frame: &mut Frame, app: &mut App) {
    let [carousel, _, stepper_row, status] = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let [_, stepper, _] = Layout::horizontal([
        Constraint::Percentage(20),
        Constraint::Percentage(60),
        Constraint::Percentage(20),
    ])
    .areas(stepper_row);

    app.set_viewport(carousel, stepper);

    CarouselWidget::render(frame, carousel, app);
    StepperWidget::render(frame, stepper, app);
    StatusBarWidget::render(frame, status, app);

    if app.mode == Mode::Help {
        PopupWidget::render_help(frame, &app.theme);
    }
}
