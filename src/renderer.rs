//! Lit mesh render pass.
//!
//! One pipeline, one mesh, one uniform block: the mesh spins about world
//! Y while a directional Phong light shades it. Matrices upload without
//! transposition — glam's column-major storage matches WGSL `mat4x4`.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::camera::Camera;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::{DepthTexture, DEPTH_FORMAT};
use crate::gpu::upload_buffer::UploadBuffer;
use crate::mesh::{Mesh, Vertex};
use crate::options::{LightingOptions, SceneOptions};

/// Per-object uniform block consumed by `phong.wgsl`.
///
/// Field order and padding match the WGSL struct layout exactly.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct ObjectUniform {
    /// Object-to-world transform.
    pub world: [[f32; 4]; 4],
    /// Inverse transpose of `world`, for normals.
    pub world_inv_transpose: [[f32; 4]; 4],
    /// Combined world-view-projection transform.
    pub world_view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub eye_pos: [f32; 3],
    /// Specular exponent.
    pub spec_power: f32,
    /// World-space light direction (toward the scene).
    pub light_dir: [f32; 3],
    /// Ambient contribution factor.
    pub ambient: f32,
    /// Light color.
    pub light_color: [f32; 3],
    /// Padding for GPU alignment.
    pub(crate) _pad: f32,
}

/// Renders one indexed mesh with the Phong pipeline.
pub struct MeshRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    object_cb: UploadBuffer<ObjectUniform>,
    bind_group: wgpu::BindGroup,
    depth: DepthTexture,
    world: Mat4,
}

impl MeshRenderer {
    /// Build the pipeline and upload the mesh's vertex and index buffers.
    #[must_use]
    pub fn new(context: &RenderContext, mesh: &Mesh) -> Self {
        let device = &context.device;

        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Vertex Buffer"),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Index Buffer"),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        let object_cb = UploadBuffer::new(device, "Object Uniform Buffer", 1);

        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Object Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX
                        | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });
        let bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Object Bind Group"),
                layout: &layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: object_cb.binding(0),
                }],
            });

        let shader =
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Phong Shader"),
                source: wgpu::ShaderSource::Wgsl(
                    include_str!("../assets/shaders/phong.wgsl").into(),
                ),
            });

        let pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Mesh Pipeline Layout"),
                bind_group_layouts: &[&layout],
                push_constant_ranges: &[],
            });
        let pipeline =
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Mesh Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[Vertex::layout()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: context.format(),
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    // Left-handed content authored with clockwise front
                    // faces.
                    front_face: wgpu::FrontFace::Cw,
                    cull_mode: Some(wgpu::Face::Back),
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            });

        let depth = DepthTexture::new(
            device,
            context.config.width,
            context.config.height,
        );

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            object_cb,
            bind_group,
            depth,
            world: Mat4::IDENTITY,
        }
    }

    /// Advance the spin and upload this frame's uniform block.
    ///
    /// The camera's view must be clean (orbit controller updates leave it
    /// that way).
    pub fn update(
        &mut self,
        queue: &wgpu::Queue,
        dt: f32,
        camera: &Camera,
        lighting: &LightingOptions,
        scene: &SceneOptions,
    ) {
        self.world = Mat4::from_rotation_y(scene.spin_rate * dt) * self.world;

        let world_view_proj = camera.proj() * camera.view() * self.world;
        let uniform = ObjectUniform {
            world: self.world.to_cols_array_2d(),
            world_inv_transpose: self
                .world
                .inverse()
                .transpose()
                .to_cols_array_2d(),
            world_view_proj: world_view_proj.to_cols_array_2d(),
            eye_pos: camera.position().to_array(),
            spec_power: lighting.specular_power,
            light_dir: lighting.direction,
            ambient: lighting.ambient,
            light_color: lighting.color,
            _pad: 0.0,
        };
        self.object_cb.copy_data(queue, 0, &uniform);
    }

    /// Record the mesh pass into `encoder`, clearing color and depth.
    pub fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        background: [f64; 4],
    ) {
        let mut pass =
            encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Mesh Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: background[0],
                            g: background[1],
                            b: background[2],
                            a: background[3],
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(
                    wgpu::RenderPassDepthStencilAttachment {
                        view: &self.depth.view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    },
                ),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(
            self.index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }

    /// Recreate the depth buffer for a resized surface.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth = DepthTexture::new(device, width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_uniform_matches_wgsl_layout() {
        // Three mat4x4 (192) + four vec4-aligned scalar groups (48).
        assert_eq!(size_of::<ObjectUniform>(), 240);
        assert_eq!(align_of::<ObjectUniform>(), 4);
    }

    #[test]
    fn spin_preserves_rigid_world_transform() {
        // A pure rotation's inverse transpose equals the rotation itself.
        let world = Mat4::from_rotation_y(1.2);
        let inv_t = world.inverse().transpose();
        let got = inv_t.to_cols_array();
        let want = world.to_cols_array();
        for (g, w) in got.iter().zip(want.iter()) {
            assert!((g - w).abs() < 1e-6);
        }
    }
}
