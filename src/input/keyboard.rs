use serde::{Deserialize, Serialize};

/// Camera movement actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// forward = "KeyW"
/// back = "KeyS"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveAction {
    /// Fly along the view direction.
    Forward,
    /// Fly against the view direction.
    Back,
    /// Strafe left.
    Left,
    /// Strafe right.
    Right,
}
