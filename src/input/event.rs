use super::MoveAction;

/// Platform-agnostic input events.
///
/// These are fed into an [`InputState`](super::InputState), which the camera
/// tick samples once per tick.
///
/// # Example
///
/// ```
/// use molview::input::{InputEvent, InputState, MouseButton};
///
/// let mut input = InputState::new();
/// input.handle_event(InputEvent::CursorMoved { x: 10.0, y: 10.0 });
/// input.handle_event(InputEvent::MouseButton {
///     button: MouseButton::Left,
///     pressed: true,
/// });
/// input.handle_event(InputEvent::CursorMoved { x: 14.0, y: 7.0 });
/// assert_eq!(input.sample().mouse_delta, glam::Vec2::new(4.0, -3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to absolute screen position.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Mouse button pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// A key bound to a movement action went down or up.
    Movement {
        /// The bound action.
        action: MoveAction,
        /// `true` for key-down, `false` for key-up.
        pressed: bool,
    },
    /// The window lost keyboard focus; all held keys are released.
    FocusLost,
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
    /// Any other button (back, forward, extra).
    Other,
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Left => Self::Left,
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            _ => Self::Other,
        }
    }
}
