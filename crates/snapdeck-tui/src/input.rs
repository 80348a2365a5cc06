use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use snapdeck_core::{PointerButton, PointerEvent, PointerKind, Point};

use crate::app::{App, Mode};
use crate::keymap::{KeyBinding, Keymap};

/// Cells scrolled per wheel notch
pub const WHEEL_STEP: f32 = 3.0;

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    /// Digit keys jump straight to a page (0-based)
    GoToPage(usize),
    NextSegment,
    PrevSegment,
    ClearSegment,
    ToggleOrientation,
    ToggleManual,
    CycleEasing,
    /// Re-read the deck from the configuration file
    ReloadDeck,
    ToggleHelp,
    ExitMode,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    // Any key closes help
    if app.mode == Mode::Help {
        return Action::ExitMode;
    }

    if let (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) = (key.code, key.modifiers) {
        return Action::GoToPage(c as usize - '1' as usize);
    }

    keymap
        .get(&KeyBinding::new(key.code, key.modifiers))
        .copied()
        .unwrap_or(Action::None)
}

/// Mouse input translated into the control's terms
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MouseInput {
    Pointer(PointerEvent),
    Wheel { dx: f32, dy: f32 },
}

/// Translate a crossterm mouse event.
///
/// Vertical wheel notches scroll along y; with Shift held they scroll along
/// x, which is how most terminals deliver horizontal scrolling.
pub fn map_mouse_event(mouse: MouseEvent) -> Option<MouseInput> {
    let position = Point::new(mouse.column as f32, mouse.row as f32);
    let pointer = |kind: PointerKind, button: MouseButton| {
        MouseInput::Pointer(PointerEvent::new(kind, position, 0).with_button(map_button(button)))
    };

    let (dx, dy) = match mouse.kind {
        MouseEventKind::Down(button) => return Some(pointer(PointerKind::Down, button)),
        MouseEventKind::Drag(button) => return Some(pointer(PointerKind::Move, button)),
        MouseEventKind::Up(button) => return Some(pointer(PointerKind::Up, button)),
        MouseEventKind::Moved => return None,
        MouseEventKind::ScrollDown => (0.0, WHEEL_STEP),
        MouseEventKind::ScrollUp => (0.0, -WHEEL_STEP),
        MouseEventKind::ScrollRight => (WHEEL_STEP, 0.0),
        MouseEventKind::ScrollLeft => (-WHEEL_STEP, 0.0),
    };

    if mouse.modifiers.contains(KeyModifiers::SHIFT) {
        Some(MouseInput::Wheel { dx: dy, dy: dx })
    } else {
        Some(MouseInput::Wheel { dx, dy })
    }
}

fn map_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        MouseButton::Middle => PointerButton::Middle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_drag_maps_to_pointer_phases() {
        let down = map_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 4));
        assert_eq!(down, Some(MouseInput::Pointer(PointerEvent::down(10.0, 4.0))));

        let moved = map_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 2, 4));
        assert_eq!(moved, Some(MouseInput::Pointer(PointerEvent::moved(2.0, 4.0))));

        let up = map_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 2, 4));
        assert_eq!(up, Some(MouseInput::Pointer(PointerEvent::up(2.0, 4.0))));

        assert_eq!(map_mouse_event(mouse(MouseEventKind::Moved, 0, 0)), None);
    }

    #[test]
    fn test_right_button_is_secondary() {
        let down = map_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right), 1, 1));
        match down {
            Some(MouseInput::Pointer(event)) => assert_eq!(event.button, PointerButton::Secondary),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_wheel_deltas() {
        assert_eq!(
            map_mouse_event(mouse(MouseEventKind::ScrollDown, 0, 0)),
            Some(MouseInput::Wheel { dx: 0.0, dy: WHEEL_STEP })
        );
        assert_eq!(
            map_mouse_event(mouse(MouseEventKind::ScrollLeft, 0, 0)),
            Some(MouseInput::Wheel { dx: -WHEEL_STEP, dy: 0.0 })
        );

        let mut shifted = mouse(MouseEventKind::ScrollDown, 0, 0);
        shifted.modifiers = KeyModifiers::SHIFT;
        assert_eq!(
            map_mouse_event(shifted),
            Some(MouseInput::Wheel { dx: WHEEL_STEP, dy: 0.0 })
        );
    }
}
