//! Build-once instance store.
//!
//! Each parsed [`Atom`] becomes one [`InstanceRecord`] at the same index.
//! The resulting [`InstanceSnapshot`] is immutable and shared by reference
//! count, so the render path can hold it across frames without any way to
//! write into it.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use super::palette::ElementPalette;
use crate::structure::Atom;

/// Uniform scale applied to every atom sphere (unit-radius mesh).
pub const DEFAULT_ATOM_RADIUS: f32 = 0.05;

/// Per-instance GPU record: model transform and RGBA color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct InstanceRecord {
    /// Column-major `scale(radius) * translate(position)`.
    pub model: [[f32; 4]; 4],
    /// Linear RGBA color.
    pub color: [f32; 4],
}

impl InstanceRecord {
    /// Record for one atom.
    #[must_use]
    pub fn new(position: Vec3, radius: f32, color: [f32; 4]) -> Self {
        let model = Mat4::from_scale(Vec3::splat(radius))
            * Mat4::from_translation(position);
        Self {
            model: model.to_cols_array_2d(),
            color,
        }
    }

    /// The model matrix.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }

    /// Uniform scale factor of the model matrix.
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.model[0][0]
    }

    /// The translation applied before scaling, i.e. the source atom's
    /// position.
    #[must_use]
    pub fn translation(&self) -> Vec3 {
        self.world_position() / self.scale()
    }

    /// Where the sphere center lands in world space (`radius * position`).
    #[must_use]
    pub fn world_position(&self) -> Vec3 {
        self.model_matrix().w_axis.truncate()
    }
}

/// Immutable, cheaply clonable array of instance records.
#[derive(Debug, Clone)]
pub struct InstanceSnapshot {
    records: Arc<[InstanceRecord]>,
}

impl InstanceSnapshot {
    /// Build one record per atom, preserving order.
    #[must_use]
    pub fn build(
        atoms: &[Atom],
        palette: &ElementPalette,
        radius: f32,
    ) -> Self {
        let records: Arc<[InstanceRecord]> = atoms
            .iter()
            .map(|atom| {
                InstanceRecord::new(
                    atom.position(),
                    radius,
                    palette.color(atom.element()),
                )
            })
            .collect();
        log::debug!("built {} atom instances (radius {radius})", records.len());
        Self { records }
    }

    /// Number of instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` if there are no atoms to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The records, indexed like the source atoms.
    #[must_use]
    pub fn records(&self) -> &[InstanceRecord] {
        &self.records
    }

    /// Raw bytes for GPU upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.records[..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::palette::UNKNOWN_ELEMENT_COLOR;
    use crate::structure::{parse, ParseOptions};

    fn atoms() -> Vec<Atom> {
        vec![
            Atom::new("O", Vec3::new(1.0, 2.0, 3.0)),
            Atom::new("Fe", Vec3::new(-4.0, 0.5, 10.0)),
            Atom::new("C", Vec3::ZERO),
            Atom::new("O", Vec3::new(1.0, 2.0, 3.0)),
        ]
    }

    #[test]
    fn one_record_per_atom_in_order() {
        let atoms = atoms();
        let snapshot = InstanceSnapshot::build(
            &atoms,
            &ElementPalette::default(),
            DEFAULT_ATOM_RADIUS,
        );
        assert_eq!(snapshot.len(), atoms.len());
        for (record, atom) in snapshot.records().iter().zip(&atoms) {
            assert!(record.translation().abs_diff_eq(atom.position(), 1e-5));
            assert_eq!(record.scale(), DEFAULT_ATOM_RADIUS);
        }
        assert_eq!(snapshot.records()[0], snapshot.records()[3]);
    }

    #[test]
    fn colors_come_from_palette_with_named_fallback() {
        let snapshot = InstanceSnapshot::build(
            &atoms(),
            &ElementPalette::default(),
            DEFAULT_ATOM_RADIUS,
        );
        assert_eq!(snapshot.records()[0].color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(snapshot.records()[1].color, UNKNOWN_ELEMENT_COLOR);
        assert_eq!(snapshot.records()[2].color, [0.5, 0.5, 0.5, 0.5]);
    }

    #[test]
    fn model_is_scale_then_translate() {
        let record =
            InstanceRecord::new(Vec3::new(1.0, 2.0, 3.0), 0.5, [1.0; 4]);
        let expected = Mat4::from_scale(Vec3::splat(0.5))
            * Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(record.model_matrix(), expected);
        // Translation is scaled along with the mesh.
        assert_eq!(record.world_position(), Vec3::new(0.5, 1.0, 1.5));
        let unit_x = record.model_matrix().transform_point3(Vec3::X);
        assert!(unit_x.abs_diff_eq(Vec3::new(1.0, 1.0, 1.5), 1e-6));
    }

    #[test]
    fn empty_input_gives_empty_snapshot() {
        let snapshot =
            InstanceSnapshot::build(&[], &ElementPalette::default(), 1.0);
        assert!(snapshot.is_empty());
        assert!(snapshot.as_bytes().is_empty());
    }

    #[test]
    fn record_layout_matches_shader_stride() {
        assert_eq!(std::mem::size_of::<InstanceRecord>(), 80);
        let snapshot = InstanceSnapshot::build(
            &atoms(),
            &ElementPalette::default(),
            DEFAULT_ATOM_RADIUS,
        );
        assert_eq!(snapshot.as_bytes().len(), 4 * 80);
    }

    #[test]
    fn water_oxygen_end_to_end() {
        let line = concat!(
            "ATOM      1  O   HOH A   1       1.000   2.000   3.000",
            "  1.00  0.00           O"
        );
        let atoms = parse(line, &ParseOptions::default()).unwrap();
        let snapshot = InstanceSnapshot::build(
            &atoms,
            &ElementPalette::default(),
            DEFAULT_ATOM_RADIUS,
        );
        assert_eq!(snapshot.len(), 1);
        let record = snapshot.records()[0];
        assert!(record
            .translation()
            .abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-5));
        assert_eq!(record.color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(record.scale(), DEFAULT_ATOM_RADIUS);
    }
}
