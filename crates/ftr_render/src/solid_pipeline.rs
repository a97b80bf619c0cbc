//! GPU half of the primitive renderer.
//!
//! One flat-color shader, two pipelines (triangle list for filled parts,
//! line list for outlines and wireframe mode). Per-draw data (model-view
//! matrix and color) lives in a single uniform buffer addressed with dynamic
//! offsets, so a whole frame is uploaded with one `write_buffer` and every
//! draw call only changes an offset.

use std::collections::HashMap;

use ftr_core::{DrawCommand, MeshKind, RenderMode};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::camera::{CameraUniform, Viewport};
use crate::gpu_context::DEPTH_FORMAT;
use crate::mesh::MeshData;
use crate::vertex::MeshVertex;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawUniform {
    pub model_view: [[f32; 4]; 4],
    pub color: [f32; 4],
}

const DRAW_UNIFORM_SIZE: u64 = std::mem::size_of::<DrawUniform>() as u64;

/// One camera's pass over the command list.
#[derive(Debug, Clone, Copy)]
pub struct ViewPass {
    pub viewport: Viewport,
    pub view: Mat4,
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    triangle_buffer: wgpu::Buffer,
    triangle_count: u32,
    line_buffer: wgpu::Buffer,
    line_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, kind: MeshKind) -> Self {
        let data = MeshData::for_kind(kind);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Vertex Buffer"),
            contents: bytemuck::cast_slice::<MeshVertex, u8>(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let triangle_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Triangle Index Buffer"),
            contents: bytemuck::cast_slice(&data.triangles),
            usage: wgpu::BufferUsages::INDEX,
        });
        let line_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Line Index Buffer"),
            contents: bytemuck::cast_slice(&data.lines),
            usage: wgpu::BufferUsages::INDEX,
        });
        log::debug!(
            "Uploaded {:?}: {} vertices, {} triangles, {} lines",
            kind,
            data.vertices.len(),
            data.triangles.len() / 3,
            data.lines.len() / 2
        );
        Self {
            vertex_buffer,
            triangle_buffer,
            triangle_count: data.triangles.len() as u32,
            line_buffer,
            line_count: data.lines.len() as u32,
        }
    }
}

pub struct SolidPipeline {
    fill_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    draw_bind_group_layout: wgpu::BindGroupLayout,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    draw_buffer: wgpu::Buffer,
    draw_bind_group: wgpu::BindGroup,
    draw_capacity: usize,
    draw_stride: u64,
    meshes: HashMap<MeshKind, GpuMesh>,
    staging: Vec<u8>,
}

impl SolidPipeline {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Solid Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("solid.wgsl").into()),
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let draw_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Draw Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: wgpu::BufferSize::new(DRAW_UNIFORM_SIZE),
                    },
                    count: None,
                }],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Solid Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &draw_bind_group_layout],
            push_constant_ranges: &[],
        });

        let fill_pipeline = create_pipeline(
            device,
            &pipeline_layout,
            &shader,
            surface_format,
            wgpu::PrimitiveTopology::TriangleList,
            "Solid Fill Pipeline",
        );
        let line_pipeline = create_pipeline(
            device,
            &pipeline_layout,
            &shader,
            surface_format,
            wgpu::PrimitiveTopology::LineList,
            "Solid Line Pipeline",
        );

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Uniform Buffer"),
            contents: bytemuck::cast_slice(&[CameraUniform::from_projection(Mat4::IDENTITY)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        let draw_stride = DRAW_UNIFORM_SIZE.div_ceil(alignment) * alignment;
        let draw_capacity = 1;
        let draw_buffer = create_draw_buffer(device, draw_capacity, draw_stride);
        let draw_bind_group = create_draw_bind_group(device, &draw_bind_group_layout, &draw_buffer);

        let meshes = MeshKind::ALL
            .iter()
            .map(|&kind| (kind, GpuMesh::upload(device, kind)))
            .collect();

        Self {
            fill_pipeline,
            line_pipeline,
            draw_bind_group_layout,
            camera_buffer,
            camera_bind_group,
            draw_buffer,
            draw_bind_group,
            draw_capacity,
            draw_stride,
            meshes,
            staging: Vec::new(),
        }
    }

    /// Upload the projection and every per-draw uniform for this frame.
    /// Must be called before `render` with the same `passes` and `commands`.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        projection: Mat4,
        passes: &[ViewPass],
        commands: &[DrawCommand],
    ) {
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[CameraUniform::from_projection(projection)]),
        );

        let draw_count = passes.len() * commands.len();
        if draw_count == 0 {
            return;
        }
        self.ensure_draw_capacity(device, draw_count);

        let stride = self.draw_stride as usize;
        self.staging.clear();
        self.staging.resize(draw_count * stride, 0);
        for (pass_index, pass) in passes.iter().enumerate() {
            for (command_index, command) in commands.iter().enumerate() {
                let uniform = DrawUniform {
                    model_view: (pass.view * command.transform).to_cols_array_2d(),
                    color: command.color.to_array(),
                };
                let offset = (pass_index * commands.len() + command_index) * stride;
                self.staging[offset..offset + DRAW_UNIFORM_SIZE as usize]
                    .copy_from_slice(bytemuck::bytes_of(&uniform));
            }
        }
        queue.write_buffer(&self.draw_buffer, 0, &self.staging);
    }

    pub fn render(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        passes: &[ViewPass],
        commands: &[DrawCommand],
    ) {
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

        for (pass_index, pass) in passes.iter().enumerate() {
            let vp = pass.viewport;
            render_pass.set_viewport(vp.x, vp.y, vp.width, vp.height, 0.0, 1.0);

            let mut bound_mode: Option<RenderMode> = None;
            for (command_index, command) in commands.iter().enumerate() {
                let Some(mesh) = self.meshes.get(&command.mesh) else {
                    continue;
                };
                if bound_mode != Some(command.fill_mode) {
                    render_pass.set_pipeline(match command.fill_mode {
                        RenderMode::Filled => &self.fill_pipeline,
                        RenderMode::Wireframe => &self.line_pipeline,
                    });
                    bound_mode = Some(command.fill_mode);
                }

                let offset = (pass_index * commands.len() + command_index) as u64 * self.draw_stride;
                render_pass.set_bind_group(1, &self.draw_bind_group, &[offset as u32]);
                render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));

                let (indices, count) = match command.fill_mode {
                    RenderMode::Filled => (&mesh.triangle_buffer, mesh.triangle_count),
                    RenderMode::Wireframe => (&mesh.line_buffer, mesh.line_count),
                };
                render_pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..count, 0, 0..1);
            }
        }
    }

    // Grows by powers of two, never shrinks.
    fn ensure_draw_capacity(&mut self, device: &wgpu::Device, draw_count: usize) {
        if draw_count <= self.draw_capacity {
            return;
        }
        self.draw_capacity = draw_count.next_power_of_two();
        self.draw_buffer = create_draw_buffer(device, self.draw_capacity, self.draw_stride);
        self.draw_bind_group =
            create_draw_bind_group(device, &self.draw_bind_group_layout, &self.draw_buffer);
        log::debug!("Draw uniform buffer grown to {} slots", self.draw_capacity);
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    surface_format: wgpu::TextureFormat,
    topology: wgpu::PrimitiveTopology,
    label: &str,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[MeshVertex::layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        // LessEqual lets outlines land on the faces they trace.
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
        cache: None,
    })
}

fn create_draw_buffer(device: &wgpu::Device, capacity: usize, stride: u64) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Draw Uniform Buffer"),
        size: capacity.max(1) as u64 * stride,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_draw_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Draw Bind Group"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer,
                offset: 0,
                size: wgpu::BufferSize::new(DRAW_UNIFORM_SIZE),
            }),
        }],
    })
}
