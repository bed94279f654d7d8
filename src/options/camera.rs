use serde::{Deserialize, Serialize};

use crate::camera::{FlySettings, Projection};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Camera projection and fly-control parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Fly speed in world units per second.
    pub move_speed: f32,
    /// Radians of rotation per pixel of drag.
    pub mouse_sensitivity: f32,
    /// Maximum absolute pitch in degrees.
    pub pitch_limit_deg: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        let fly = FlySettings::default();
        let projection = Projection::default();
        Self {
            fovy: projection.fovy,
            znear: projection.znear,
            zfar: projection.zfar,
            move_speed: fly.move_speed,
            mouse_sensitivity: fly.mouse_sensitivity,
            pitch_limit_deg: fly.pitch_limit.to_degrees(),
        }
    }
}

impl CameraOptions {
    /// Fly-camera tunables. The pitch limit is kept below 90 degrees.
    #[must_use]
    pub fn fly_settings(&self) -> FlySettings {
        FlySettings {
            move_speed: self.move_speed,
            mouse_sensitivity: self.mouse_sensitivity,
            pitch_limit: self.pitch_limit_deg.clamp(0.0, 89.9).to_radians(),
        }
    }

    /// Projection with a square aspect; the frame scheduler fixes the aspect
    /// on the first resize.
    #[must_use]
    pub fn projection(&self) -> Projection {
        Projection {
            fovy: self.fovy,
            znear: self.znear,
            zfar: self.zfar,
            ..Projection::default()
        }
    }
}
