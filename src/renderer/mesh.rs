//! CPU-side sphere/ellipsoid tessellation.
//!
//! Vertex attributes are kept in separate streams (positions, texcoords,
//! normals) so each maps to its own vertex buffer slot.

use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;

use glam::Vec3;

/// Errors from mesh generation.
#[derive(Debug, Clone, PartialEq)]
pub enum MeshError {
    /// Fewer than 3 slices around the vertical axis.
    TooFewRadialSegments(u32),
    /// Fewer than 2 stacks from pole to pole.
    TooFewVerticalSegments(u32),
    /// A radius that is zero, negative or not finite.
    InvalidRadii(Vec3),
    /// Segment counts too large to index with `u32`.
    TooManyVertices {
        /// Requested slices.
        radial: u32,
        /// Requested stacks.
        vertical: u32,
    },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewRadialSegments(n) => {
                write!(f, "ellipsoid needs at least 3 radial segments, got {n}")
            }
            Self::TooFewVerticalSegments(n) => {
                write!(
                    f,
                    "ellipsoid needs at least 2 vertical segments, got {n}"
                )
            }
            Self::InvalidRadii(r) => {
                write!(f, "ellipsoid radii must be positive and finite: {r}")
            }
            Self::TooManyVertices { radial, vertical } => write!(
                f,
                "{radial}x{vertical} segments exceed the u32 index range"
            ),
        }
    }
}

impl std::error::Error for MeshError {}

/// A contiguous index range drawn with one `draw_indexed` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submesh {
    /// First index in [`MeshData::indices`].
    pub index_offset: u32,
    /// Number of indices.
    pub index_count: u32,
}

/// Triangle-list mesh with per-vertex attribute streams.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Object-space positions (vertex slot 0).
    pub positions: Vec<[f32; 3]>,
    /// UV coordinates in `[0, 1]` (vertex slot 1).
    pub texcoords: Vec<[f32; 2]>,
    /// Unit outward normals (vertex slot 2).
    pub normals: Vec<[f32; 3]>,
    /// Triangle-list indices, counter-clockwise seen from outside.
    pub indices: Vec<u32>,
    /// Index ranges to draw.
    pub submeshes: Vec<Submesh>,
}

impl MeshData {
    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// UV sphere of radius 1 centered at the origin.
///
/// # Errors
///
/// As [`ellipsoid`].
pub fn unit_sphere(
    radial_segments: u32,
    vertical_segments: u32,
) -> Result<MeshData, MeshError> {
    ellipsoid(Vec3::ONE, radial_segments, vertical_segments, false)
}

/// Tessellate an axis-aligned ellipsoid centered at the origin.
///
/// `radial_segments` slices run around +Y, `vertical_segments` stacks run
/// from the +Y pole down to the -Y pole (or to the equator when
/// `hemisphere` is set). The seam column is duplicated so texcoords wrap
/// cleanly. Triangles that would collapse onto a pole are not emitted.
///
/// # Errors
///
/// [`MeshError`] for fewer than 3 radial or 2 vertical segments, radii that
/// are not positive and finite, or segment counts whose vertices cannot be
/// indexed with `u32`.
pub fn ellipsoid(
    radii: Vec3,
    radial_segments: u32,
    vertical_segments: u32,
    hemisphere: bool,
) -> Result<MeshData, MeshError> {
    if radial_segments < 3 {
        return Err(MeshError::TooFewRadialSegments(radial_segments));
    }
    if vertical_segments < 2 {
        return Err(MeshError::TooFewVerticalSegments(vertical_segments));
    }
    if !radii.is_finite() || radii.min_element() <= 0.0 {
        return Err(MeshError::InvalidRadii(radii));
    }

    let too_many = MeshError::TooManyVertices {
        radial: radial_segments,
        vertical: vertical_segments,
    };
    let columns = radial_segments.checked_add(1).ok_or(too_many.clone())?;
    let vertex_count = vertical_segments
        .checked_add(1)
        .and_then(|rows| rows.checked_mul(columns))
        .filter(|&n| n.checked_mul(6).is_some())
        .ok_or(too_many)? as usize;

    let polar_extent = if hemisphere { FRAC_PI_2 } else { PI };
    let mut mesh = MeshData {
        positions: Vec::with_capacity(vertex_count),
        texcoords: Vec::with_capacity(vertex_count),
        normals: Vec::with_capacity(vertex_count),
        ..MeshData::default()
    };

    for v in 0..=vertical_segments {
        let tv = v as f32 / vertical_segments as f32;
        let phi = tv * polar_extent;
        let (sin_phi, cos_phi) = phi.sin_cos();
        for r in 0..=radial_segments {
            let tu = r as f32 / radial_segments as f32;
            let (sin_theta, cos_theta) = (tu * TAU).sin_cos();
            let unit =
                Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta);
            mesh.positions.push((unit * radii).to_array());
            mesh.normals.push((unit / radii).normalize().to_array());
            mesh.texcoords.push([tu, tv]);
        }
    }

    let bottom_is_pole = !hemisphere;
    for v in 0..vertical_segments {
        for r in 0..radial_segments {
            let a = v * columns + r;
            let b = a + columns;
            let c = b + 1;
            let d = a + 1;
            if v != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if !(bottom_is_pole && v == vertical_segments - 1) {
                mesh.indices.extend_from_slice(&[d, b, c]);
            }
        }
    }

    mesh.submeshes.push(Submesh {
        index_offset: 0,
        index_count: mesh.indices.len() as u32,
    });
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangles(mesh: &MeshData) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        mesh.indices.chunks_exact(3).map(|tri| {
            [tri[0], tri[1], tri[2]]
                .map(|i| Vec3::from_array(mesh.positions[i as usize]))
        })
    }

    #[test]
    fn default_sphere_counts() {
        let mesh = unit_sphere(10, 10).unwrap();
        assert_eq!(mesh.vertex_count(), 11 * 11);
        // Two pole rows contribute one triangle per slice, the rest two.
        assert_eq!(mesh.triangle_count(), 10 * (2 * 10 - 2));
        assert_eq!(
            mesh.submeshes,
            vec![Submesh {
                index_offset: 0,
                index_count: mesh.indices.len() as u32
            }]
        );
        assert_eq!(mesh.texcoords.len(), mesh.vertex_count());
        assert_eq!(mesh.normals.len(), mesh.vertex_count());
    }

    #[test]
    fn triangles_wind_counter_clockwise_from_outside() {
        let mesh = ellipsoid(Vec3::new(1.0, 2.0, 0.5), 12, 7, false).unwrap();
        for [a, b, c] in triangles(&mesh) {
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid) > 0.0, "inward-facing {a} {b} {c}");
        }
    }

    #[test]
    fn no_degenerate_pole_triangles() {
        let mesh = unit_sphere(10, 10).unwrap();
        for [a, b, c] in triangles(&mesh) {
            assert!((b - a).cross(c - a).length() > 1e-6);
        }
    }

    #[test]
    fn unit_sphere_normals_match_positions() {
        let mesh = unit_sphere(8, 6).unwrap();
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            let p = Vec3::from_array(*p);
            let n = Vec3::from_array(*n);
            assert!((p.length() - 1.0).abs() < 1e-5);
            assert!(p.abs_diff_eq(n, 1e-5));
        }
    }

    #[test]
    fn ellipsoid_normals_are_unit() {
        let mesh = ellipsoid(Vec3::new(3.0, 1.0, 2.0), 9, 5, false).unwrap();
        for n in &mesh.normals {
            assert!((Vec3::from_array(*n).length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn hemisphere_stays_above_equator() {
        let mesh = ellipsoid(Vec3::ONE, 6, 4, true).unwrap();
        assert!(mesh.positions.iter().all(|p| p[1] >= -1e-6));
        // Only the top row is a pole.
        assert_eq!(mesh.triangle_count(), 6 * (2 * 4 - 1));
        for [a, b, c] in triangles(&mesh) {
            assert!((b - a).cross(c - a).length() > 1e-6);
        }
    }

    #[test]
    fn texcoords_span_unit_square() {
        let mesh = unit_sphere(4, 3).unwrap();
        assert_eq!(mesh.texcoords.first(), Some(&[0.0, 0.0]));
        assert_eq!(mesh.texcoords.last(), Some(&[1.0, 1.0]));
    }

    #[test]
    fn rejects_bad_parameters() {
        assert_eq!(
            unit_sphere(2, 10),
            Err(MeshError::TooFewRadialSegments(2))
        );
        assert_eq!(
            unit_sphere(10, 1),
            Err(MeshError::TooFewVerticalSegments(1))
        );
        assert!(matches!(
            ellipsoid(Vec3::new(1.0, 0.0, 1.0), 10, 10, false),
            Err(MeshError::InvalidRadii(_))
        ));
        assert!(matches!(
            ellipsoid(Vec3::new(1.0, f32::NAN, 1.0), 10, 10, false),
            Err(MeshError::InvalidRadii(_))
        ));
        assert!(matches!(
            unit_sphere(u32::MAX - 1, 4),
            Err(MeshError::TooManyVertices { .. })
        ));
    }
}
