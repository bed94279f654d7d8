use glam::Vec2;

use super::{InputEvent, MouseButton, MoveAction};
use crate::camera::{CameraInput, MoveFlags};

/// Held movement keys and drag-cursor tracking between camera ticks.
///
/// The cursor only steers the camera while the left button is held. Press
/// and release both re-anchor the drag so no jump is produced when a drag
/// starts or ends away from the previous sample point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    movement: MoveFlags,
    cursor: Vec2,
    previous: Vec2,
    current: Vec2,
    dragging: bool,
}

impl InputState {
    /// No keys held, no drag in progress.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the state.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.cursor = Vec2::new(x, y);
                if self.dragging {
                    self.current = self.cursor;
                }
            }
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed,
            } => {
                self.dragging = pressed;
                self.previous = self.cursor;
                self.current = self.cursor;
            }
            InputEvent::MouseButton { .. } => {}
            InputEvent::Movement { action, pressed } => {
                let flag = match action {
                    MoveAction::Forward => &mut self.movement.forward,
                    MoveAction::Back => &mut self.movement.back,
                    MoveAction::Left => &mut self.movement.left,
                    MoveAction::Right => &mut self.movement.right,
                };
                *flag = pressed;
            }
            InputEvent::FocusLost => {
                self.movement = MoveFlags::default();
                self.dragging = false;
                self.previous = self.current;
            }
        }
    }

    /// Whether a left-button drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Take the cursor travel since the last sample along with the held
    /// movement keys.
    pub fn sample(&mut self) -> CameraInput {
        let mouse_delta = self.current - self.previous;
        self.previous = self.current;
        CameraInput {
            mouse_delta,
            movement: self.movement,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(x: f32, y: f32) -> InputEvent {
        InputEvent::CursorMoved { x, y }
    }

    fn left(pressed: bool) -> InputEvent {
        InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed,
        }
    }

    #[test]
    fn hover_without_button_does_not_rotate() {
        let mut input = InputState::new();
        input.handle_event(cursor(100.0, 100.0));
        input.handle_event(cursor(300.0, 50.0));
        assert_eq!(input.sample().mouse_delta, Vec2::ZERO);
    }

    #[test]
    fn drag_delta_is_consumed_by_sample() {
        let mut input = InputState::new();
        input.handle_event(cursor(100.0, 100.0));
        input.handle_event(left(true));
        input.handle_event(cursor(110.0, 95.0));
        input.handle_event(cursor(120.0, 90.0));
        assert_eq!(input.sample().mouse_delta, Vec2::new(20.0, -10.0));
        assert_eq!(input.sample().mouse_delta, Vec2::ZERO);
    }

    #[test]
    fn release_discards_unsampled_motion() {
        let mut input = InputState::new();
        input.handle_event(left(true));
        input.handle_event(cursor(50.0, 0.0));
        input.handle_event(left(false));
        assert!(!input.is_dragging());
        assert_eq!(input.sample().mouse_delta, Vec2::ZERO);
    }

    #[test]
    fn other_buttons_do_not_drag() {
        let mut input = InputState::new();
        input.handle_event(InputEvent::MouseButton {
            button: MouseButton::Right,
            pressed: true,
        });
        input.handle_event(cursor(40.0, 40.0));
        assert!(!input.is_dragging());
        assert_eq!(input.sample().mouse_delta, Vec2::ZERO);
    }

    #[test]
    fn movement_keys_toggle_flags() {
        let mut input = InputState::new();
        let key = |action, pressed| InputEvent::Movement { action, pressed };
        input.handle_event(key(MoveAction::Forward, true));
        input.handle_event(key(MoveAction::Right, true));
        input.handle_event(key(MoveAction::Right, false));
        let movement = input.sample().movement;
        assert!(movement.forward);
        assert!(!movement.right && !movement.left && !movement.back);
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut input = InputState::new();
        input.handle_event(InputEvent::Movement {
            action: MoveAction::Back,
            pressed: true,
        });
        input.handle_event(left(true));
        input.handle_event(cursor(5.0, 5.0));
        input.handle_event(InputEvent::FocusLost);
        let sample = input.sample();
        assert_eq!(sample.movement, MoveFlags::default());
        assert_eq!(sample.mouse_delta, Vec2::ZERO);
        assert!(!input.is_dragging());
    }
}
