//! Mesh data model: vertex format, index list, and the built-in cube.

/// Single-pass Wavefront OBJ loader.
pub mod obj;

use bytemuck::{Pod, Zeroable};

/// Albedo used for the built-in cube and for OBJ files, which carry no
/// color data.
pub const DEFAULT_ALBEDO: [f32; 4] = [1.0, 0.75, 0.79, 1.0];

/// Vertex format shared by the built-in cube and loaded OBJ meshes.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Object-space normal.
    pub normal: [f32; 3],
    /// Albedo color.
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Float32x4,
    ];

    /// Vertex buffer layout matching the shader's vertex inputs.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Indexed triangle mesh ready for GPU upload.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertex list.
    pub vertices: Vec<Vertex>,
    /// Triangle-list indices into `vertices`.
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Unit-radius cube with four vertices per face so every face keeps a
    /// flat normal (24 vertices, 36 indices).
    #[must_use]
    pub fn cube() -> Self {
        let v = |position: [f32; 3], normal: [f32; 3]| Vertex {
            position,
            normal,
            color: DEFAULT_ALBEDO,
        };

        let vertices = vec![
            // Front (z = -1)
            v([-1.0, -1.0, -1.0], [0.0, 0.0, -1.0]),
            v([-1.0, 1.0, -1.0], [0.0, 0.0, -1.0]),
            v([1.0, 1.0, -1.0], [0.0, 0.0, -1.0]),
            v([1.0, -1.0, -1.0], [0.0, 0.0, -1.0]),
            // Back (z = +1)
            v([-1.0, -1.0, 1.0], [0.0, 0.0, 1.0]),
            v([1.0, -1.0, 1.0], [0.0, 0.0, 1.0]),
            v([1.0, 1.0, 1.0], [0.0, 0.0, 1.0]),
            v([-1.0, 1.0, 1.0], [0.0, 0.0, 1.0]),
            // Left (x = -1)
            v([-1.0, -1.0, 1.0], [-1.0, 0.0, 0.0]),
            v([-1.0, 1.0, 1.0], [-1.0, 0.0, 0.0]),
            v([-1.0, 1.0, -1.0], [-1.0, 0.0, 0.0]),
            v([-1.0, -1.0, -1.0], [-1.0, 0.0, 0.0]),
            // Right (x = +1)
            v([1.0, -1.0, -1.0], [1.0, 0.0, 0.0]),
            v([1.0, 1.0, -1.0], [1.0, 0.0, 0.0]),
            v([1.0, 1.0, 1.0], [1.0, 0.0, 0.0]),
            v([1.0, -1.0, 1.0], [1.0, 0.0, 0.0]),
            // Top (y = +1)
            v([-1.0, 1.0, -1.0], [0.0, 1.0, 0.0]),
            v([-1.0, 1.0, 1.0], [0.0, 1.0, 0.0]),
            v([1.0, 1.0, 1.0], [0.0, 1.0, 0.0]),
            v([1.0, 1.0, -1.0], [0.0, 1.0, 0.0]),
            // Bottom (y = -1)
            v([-1.0, -1.0, 1.0], [0.0, -1.0, 0.0]),
            v([-1.0, -1.0, -1.0], [0.0, -1.0, 0.0]),
            v([1.0, -1.0, -1.0], [0.0, -1.0, 0.0]),
            v([1.0, -1.0, 1.0], [0.0, -1.0, 0.0]),
        ];

        let indices = vec![
            0, 1, 2, 0, 2, 3, // front
            4, 5, 6, 4, 6, 7, // back
            8, 9, 10, 8, 10, 11, // left
            12, 13, 14, 12, 14, 15, // right
            16, 17, 18, 16, 18, 19, // top
            20, 21, 22, 20, 22, 23, // bottom
        ];

        Self { vertices, indices }
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_flat_face_normals() {
        let cube = Mesh::cube();
        assert_eq!(cube.vertices.len(), 24);
        assert_eq!(cube.indices.len(), 36);
        assert_eq!(cube.triangle_count(), 12);

        // Each face's four vertices share one axis-aligned unit normal.
        for face in cube.vertices.chunks(4) {
            let normal = face[0].normal;
            assert!(face.iter().all(|v| v.normal == normal));
            let length_sq: f32 =
                normal.iter().map(|component| component * component).sum();
            assert!((length_sq - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn cube_indices_are_in_bounds() {
        let cube = Mesh::cube();
        let max = cube.vertices.len() as u32;
        assert!(cube.indices.iter().all(|&i| i < max));
    }

    #[test]
    fn vertex_layout_stride_matches_struct_size() {
        let layout = Vertex::layout();
        assert_eq!(
            layout.array_stride,
            size_of::<Vertex>() as wgpu::BufferAddress
        );
        assert_eq!(layout.attributes.len(), 3);
    }
}
