use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::{Mat4, Quat, Vec2, Vec3};

/// Held movement keys for one tick.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveFlags {
    /// Move along the view direction.
    pub forward: bool,
    /// Move against the view direction.
    pub back: bool,
    /// Strafe left.
    pub left: bool,
    /// Strafe right.
    pub right: bool,
}

impl MoveFlags {
    /// Camera-local movement direction (not normalized). Opposing keys
    /// cancel.
    #[must_use]
    pub fn local_direction(self) -> Vec3 {
        let mut dir = Vec3::ZERO;
        if self.forward {
            dir += Vec3::NEG_Z;
        }
        if self.back {
            dir += Vec3::Z;
        }
        if self.left {
            dir += Vec3::NEG_X;
        }
        if self.right {
            dir += Vec3::X;
        }
        dir
    }
}

/// Input sampled for one camera tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraInput {
    /// Cursor travel since the previous tick, in pixels (+y is down).
    pub mouse_delta: Vec2,
    /// Movement keys held at sample time.
    pub movement: MoveFlags,
}

/// Tunables for [`FlyCamera`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlySettings {
    /// World units per second.
    pub move_speed: f32,
    /// Radians of rotation per pixel of cursor travel.
    pub mouse_sensitivity: f32,
    /// Maximum absolute pitch in radians. The sign is ignored and the value
    /// is capped just short of straight up/down.
    pub pitch_limit: f32,
}

impl Default for FlySettings {
    fn default() -> Self {
        Self {
            move_speed: 3.0,
            mouse_sensitivity: 0.005,
            pitch_limit: 89.0_f32.to_radians(),
        }
    }
}

/// Free-fly camera: position plus yaw/pitch, no roll.
///
/// Yaw rotates about world +Y, pitch about the camera's local +X. Pitch is
/// clamped so the camera can never flip over the poles; yaw wraps into
/// `[-π, π)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FlyCamera {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    settings: FlySettings,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 8.0), FlySettings::default())
    }
}

impl FlyCamera {
    /// Camera at `position` looking down -Z.
    #[must_use]
    pub fn new(position: Vec3, settings: FlySettings) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            settings,
        }
    }

    /// Eye position in world space.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Yaw in radians.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in radians.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Current tunables.
    #[must_use]
    pub fn settings(&self) -> &FlySettings {
        &self.settings
    }

    /// Camera-to-world rotation.
    #[must_use]
    pub fn orientation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    /// World-space view direction.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    /// World-to-camera transform.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation(), self.position)
            .inverse()
    }

    /// Advance one tick: rotate by the mouse delta, then translate along the
    /// new local axes. Returns the resulting view matrix.
    pub fn update(&mut self, dt: f32, input: &CameraInput) -> Mat4 {
        if input.mouse_delta != Vec2::ZERO {
            let delta = input.mouse_delta * self.settings.mouse_sensitivity;
            let limit = self.settings.pitch_limit.abs().min(FRAC_PI_2 - 1e-3);
            self.yaw = wrap_angle(self.yaw - delta.x);
            self.pitch = (self.pitch - delta.y).clamp(-limit, limit);
        }

        let local = input.movement.local_direction();
        if local != Vec3::ZERO {
            let step = self.settings.move_speed * dt;
            self.position += self.orientation() * local.normalize() * step;
        }

        self.view_matrix()
    }
}

fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moving(movement: MoveFlags) -> CameraInput {
        CameraInput {
            mouse_delta: Vec2::ZERO,
            movement,
        }
    }

    #[test]
    fn default_view_matches_fixed_eye() {
        let camera = FlyCamera::default();
        let expected = Mat4::from_translation(Vec3::new(0.0, 0.0, -8.0));
        assert!(camera.view_matrix().abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn idle_ticks_leave_view_unchanged() {
        let mut camera = FlyCamera::default();
        let before = camera.view_matrix();
        for dt in [0.0, 1.0 / 60.0, 0.5, 10.0] {
            assert_eq!(camera.update(dt, &CameraInput::default()), before);
        }
    }

    #[test]
    fn opposing_flags_cancel() {
        let mut camera = FlyCamera::default();
        let start = camera.position();
        let _ = camera.update(
            1.0,
            &moving(MoveFlags {
                forward: true,
                back: true,
                left: true,
                right: true,
            }),
        );
        assert_eq!(camera.position(), start);
    }

    #[test]
    fn forward_moves_along_view_direction() {
        let mut camera = FlyCamera::default();
        let dt = 1.0 / 60.0;
        let _ = camera.update(
            dt,
            &moving(MoveFlags {
                forward: true,
                ..MoveFlags::default()
            }),
        );
        let expected = Vec3::new(0.0, 0.0, 8.0 - 3.0 * dt);
        assert!(camera.position().abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn diagonal_movement_is_normalized() {
        let mut camera = FlyCamera::default();
        let _ = camera.update(
            1.0,
            &moving(MoveFlags {
                forward: true,
                right: true,
                ..MoveFlags::default()
            }),
        );
        let travelled = camera.position() - Vec3::new(0.0, 0.0, 8.0);
        assert!((travelled.length() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn horizontal_mouse_turns_camera() {
        let mut camera = FlyCamera::default();
        let sensitivity = camera.settings().mouse_sensitivity;
        let input = CameraInput {
            mouse_delta: Vec2::new(FRAC_PI_2 / sensitivity, 0.0),
            movement: MoveFlags::default(),
        };
        let _ = camera.update(1.0 / 60.0, &input);
        // Dragging right turns right: forward is now +X.
        assert!(camera.forward().abs_diff_eq(Vec3::X, 1e-4));
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = FlyCamera::default();
        let input = CameraInput {
            mouse_delta: Vec2::new(0.0, 1.0e6),
            movement: MoveFlags::default(),
        };
        let _ = camera.update(1.0 / 60.0, &input);
        assert_eq!(camera.pitch(), -camera.settings().pitch_limit);
        let _ = camera.update(1.0 / 60.0, &input);
        assert_eq!(camera.pitch(), -camera.settings().pitch_limit);
        assert!(camera.forward().y < 0.0);
    }

    #[test]
    fn negative_pitch_limit_uses_its_magnitude() {
        let settings = FlySettings {
            pitch_limit: -0.1,
            ..FlySettings::default()
        };
        let mut camera = FlyCamera::new(Vec3::new(0.0, 0.0, 8.0), settings);
        let input = CameraInput {
            mouse_delta: Vec2::new(1.0, 1.0),
            movement: MoveFlags::default(),
        };
        let _ = camera.update(1.0 / 60.0, &input);
        assert!(camera.pitch().abs() <= 0.1);
        let up = CameraInput {
            mouse_delta: Vec2::new(0.0, -1.0e6),
            movement: MoveFlags::default(),
        };
        let _ = camera.update(1.0 / 60.0, &up);
        assert_eq!(camera.pitch(), 0.1);
    }

    #[test]
    fn yaw_stays_bounded() {
        let mut camera = FlyCamera::default();
        let input = CameraInput {
            mouse_delta: Vec2::new(1000.0, 0.0),
            movement: MoveFlags::default(),
        };
        for _ in 0..100 {
            let _ = camera.update(1.0 / 60.0, &input);
            assert!((-PI..PI).contains(&camera.yaw()));
        }
    }

    #[test]
    fn view_maps_eye_to_origin() {
        let mut camera = FlyCamera::default();
        let input = CameraInput {
            mouse_delta: Vec2::new(37.0, -12.0),
            movement: MoveFlags {
                forward: true,
                left: true,
                ..MoveFlags::default()
            },
        };
        let view = camera.update(0.25, &input);
        let eye = view.transform_point3(camera.position());
        assert!(eye.abs_diff_eq(Vec3::ZERO, 1e-5));
        let ahead = view.transform_point3(camera.position() + camera.forward());
        assert!(ahead.abs_diff_eq(Vec3::NEG_Z, 1e-5));
    }
}
