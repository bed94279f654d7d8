use wgpu::util::DeviceExt;

use super::mesh::{MeshData, Submesh};

/// A tessellated sphere resident on the GPU: one vertex buffer per
/// attribute stream plus a `u32` index buffer.
pub struct SphereGeometry {
    positions: wgpu::Buffer,
    texcoords: wgpu::Buffer,
    normals: wgpu::Buffer,
    indices: wgpu::Buffer,
    submeshes: Vec<Submesh>,
}

impl SphereGeometry {
    /// Upload `mesh` once; the buffers are never written again.
    #[must_use]
    pub fn upload(device: &wgpu::Device, mesh: &MeshData) -> Self {
        let vertex_buffer = |label: &str, contents: &[u8]| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage: wgpu::BufferUsages::VERTEX,
            })
        };
        let positions = vertex_buffer(
            "Sphere Positions",
            bytemuck::cast_slice(&mesh.positions),
        );
        let texcoords = vertex_buffer(
            "Sphere Texcoords",
            bytemuck::cast_slice(&mesh.texcoords),
        );
        let normals = vertex_buffer(
            "Sphere Normals",
            bytemuck::cast_slice(&mesh.normals),
        );
        let indices =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Sphere Indices"),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        log::debug!(
            "uploaded sphere mesh: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        Self {
            positions,
            texcoords,
            normals,
            indices,
            submeshes: mesh.submeshes.clone(),
        }
    }

    /// Bind the vertex and index buffers and issue one instanced
    /// `draw_indexed` per submesh.
    ///
    /// Caller must set the pipeline and bind groups first.
    pub fn draw(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        instance_count: u32,
    ) {
        if instance_count == 0 {
            return;
        }
        render_pass.set_vertex_buffer(0, self.positions.slice(..));
        render_pass.set_vertex_buffer(1, self.texcoords.slice(..));
        render_pass.set_vertex_buffer(2, self.normals.slice(..));
        let indices = self.indices.slice(..);
        render_pass.set_index_buffer(indices, wgpu::IndexFormat::Uint32);
        for submesh in &self.submeshes {
            let start = submesh.index_offset;
            render_pass.draw_indexed(
                start..start + submesh.index_count,
                0,
                0..instance_count,
            );
        }
    }
}
