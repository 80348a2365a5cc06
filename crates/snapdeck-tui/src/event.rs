use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// How long the reader blocks in `poll` before checking for shutdown
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Application events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Mouse button, drag or wheel activity
    Mouse(MouseEvent),
    /// Terminal was resized
    Resize(u16, u16),
}

/// Forwards terminal input from a blocking reader task over a channel.
///
/// The reader stops on its own once the handler (and with it the receiver)
/// is dropped.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
    _reader: JoinHandle<()>,
}

impl EventHandler {
    /// Spawn the reader. Must be called inside a tokio runtime.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let reader = tokio::task::spawn_blocking(move || read_loop(tx));
        Self {
            rx,
            _reader: reader,
        }
    }

    /// Wait for the next event; `None` once the reader has stopped
    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

fn read_loop(tx: mpsc::UnboundedSender<AppEvent>) {
    while !tx.is_closed() {
        match event::poll(POLL_INTERVAL) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => {
                warn!("Terminal poll failed: {}", e);
                break;
            }
        }

        match event::read() {
            Ok(raw) => {
                if let Some(event) = translate(raw) {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
            }
            Err(e) => {
                warn!("Terminal read failed: {}", e);
                break;
            }
        }
    }
    debug!("Input reader stopped");
}

/// Keep the events the application reacts to
pub fn translate(event: Event) -> Option<AppEvent> {
    match event {
        // Only handle key press events, ignore release/repeat reports
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Mouse(mouse) => Some(AppEvent::Mouse(mouse)),
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    #[test]
    fn test_translate_filters_key_releases() {
        let press = KeyEvent::new(KeyCode::Char('l'), KeyModifiers::NONE);
        assert_eq!(translate(Event::Key(press)), Some(AppEvent::Key(press)));

        let release = KeyEvent {
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
            ..press
        };
        assert_eq!(translate(Event::Key(release)), None);
    }

    #[test]
    fn test_translate_resize_and_focus() {
        assert_eq!(translate(Event::Resize(80, 24)), Some(AppEvent::Resize(80, 24)));
        assert_eq!(translate(Event::FocusGained), None);
    }
}
