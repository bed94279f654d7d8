use glam::Mat4;

/// Perspective projection parameters. Only the aspect ratio changes at
/// runtime (on surface resize).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fovy: 65.0,
            aspect: 1.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

impl Projection {
    /// Update the aspect ratio from surface dimensions. Zero-sized surfaces
    /// are ignored and leave the projection unchanged.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Build the projection matrix.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn near_and_far_map_to_depth_range() {
        let proj = Projection::default().matrix();
        let near = proj.project_point3(Vec3::new(0.0, 0.0, -0.1));
        let far = proj.project_point3(Vec3::new(0.0, 0.0, -100.0));
        assert!((near.z - 0.0).abs() < 1e-5);
        assert!((far.z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn zero_size_resize_is_ignored() {
        let mut projection = Projection::default();
        projection.resize(1600, 900);
        let aspect = projection.aspect;
        projection.resize(0, 900);
        projection.resize(1600, 0);
        assert_eq!(projection.aspect, aspect);
        assert!((aspect - 16.0 / 9.0).abs() < 1e-6);
    }
}
