//! Instanced renderer for [`SceneFrame`]s.
//!
//! Every mesh of a [`MeshLibrary`] is uploaded once, with a triangle index
//! buffer for filled drawing and an edge index buffer for wireframe. Each
//! frame the draw items are grouped by mesh into one instance buffer and
//! drawn with a single instanced call per mesh.

use wgpu::util::DeviceExt;

use super::dynamic_buffer::DynamicBuffer;
use super::render_context::RenderContext;
use super::texture::{DepthTexture, DEPTH_FORMAT};
use crate::camera::CameraUniform;
use crate::scene::{DrawItem, MeshLibrary, SceneFrame, Vertex};

/// Point lights beyond this count are dropped.
pub const MAX_POINT_LIGHTS: usize = 32;

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct GpuPointLight {
    position: [f32; 3],
    _pad0: f32,
    radiance: [f32; 3],
    _pad1: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct FrameUniform {
    camera: CameraUniform,
    shading: u32,
    point_count: u32,
    directional_on: u32,
    _pad0: u32,
    ambient: [f32; 3],
    _pad1: f32,
    light_dir: [f32; 3],
    _pad2: f32,
    light_radiance: [f32; 3],
    _pad3: f32,
    points: [GpuPointLight; MAX_POINT_LIGHTS],
}

impl FrameUniform {
    fn from_frame(frame: &SceneFrame) -> Self {
        let mut uniform: Self = bytemuck::Zeroable::zeroed();
        uniform.camera.update_view_proj(&frame.camera);
        uniform.shading = frame.shading.shader_index();

        let lighting = &frame.lighting;
        uniform.ambient = lighting.ambient.to_array();
        if let Some(light) = lighting.directional {
            uniform.directional_on = 1;
            uniform.light_dir = light.direction.to_array();
            uniform.light_radiance = light.radiance.to_array();
        }

        if lighting.points.len() > MAX_POINT_LIGHTS {
            log::debug!(
                "{} point lights requested, drawing {MAX_POINT_LIGHTS}",
                lighting.points.len()
            );
        }
        for (slot, light) in uniform.points.iter_mut().zip(&lighting.points) {
            slot.position = light.position.to_array();
            slot.radiance = light.radiance.to_array();
        }
        uniform.point_count =
            lighting.points.len().min(MAX_POINT_LIGHTS) as u32;
        uniform
    }
}

/// Per-instance data: model matrix columns, color, unlit flag.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
struct Instance {
    model: [[f32; 4]; 4],
    color: [f32; 3],
    unlit: f32,
}

impl From<&DrawItem> for Instance {
    fn from(item: &DrawItem) -> Self {
        Self {
            model: item.model.to_cols_array_2d(),
            color: item.color.to_array(),
            unlit: if item.unlit { 1.0 } else { 0.0 },
        }
    }
}

struct GpuMesh {
    vertices: wgpu::Buffer,
    triangles: wgpu::Buffer,
    triangle_count: u32,
    edges: wgpu::Buffer,
    edge_count: u32,
}

/// A contiguous run of instances sharing one mesh.
#[derive(Debug, Clone, PartialEq)]
struct Batch {
    mesh: usize,
    instances: std::ops::Range<u32>,
}

/// Sort items by mesh and return instance data plus one batch per mesh.
fn batch_items(items: &[DrawItem]) -> (Vec<Instance>, Vec<Batch>) {
    let mut sorted: Vec<&DrawItem> = items.iter().collect();
    sorted.sort_by_key(|item| item.mesh);

    let instances = sorted.iter().map(|item| Instance::from(*item)).collect();
    let mut batches: Vec<Batch> = Vec::new();
    for (i, item) in sorted.iter().enumerate() {
        let i = i as u32;
        match batches.last_mut() {
            Some(batch) if batch.mesh == item.mesh.index() => {
                batch.instances.end = i + 1;
            }
            _ => batches.push(Batch {
                mesh: item.mesh.index(),
                instances: i..i + 1,
            }),
        }
    }
    (instances, batches)
}

/// Draws [`SceneFrame`]s built from one [`MeshLibrary`].
pub struct MeshRenderer {
    filled: wgpu::RenderPipeline,
    wireframe: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    meshes: Vec<GpuMesh>,
    instances: DynamicBuffer<Instance>,
    depth: DepthTexture,
}

impl MeshRenderer {
    /// Upload `library` and build the pipelines.
    #[must_use]
    pub fn new(context: &RenderContext, library: &MeshLibrary) -> Self {
        let device = &context.device;
        let shader = device
            .create_shader_module(wgpu::include_wgsl!("shaders/mesh.wgsl"));

        let uniform_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Frame Uniform Buffer"),
                contents: bytemuck::bytes_of(
                    &<FrameUniform as bytemuck::Zeroable>::zeroed(),
                ),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Frame Bind Group Layout"),
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
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Mesh Pipeline Layout"),
                bind_group_layouts: &[&layout],
                push_constant_ranges: &[],
            });
        let filled = create_pipeline(
            context,
            &pipeline_layout,
            &shader,
            wgpu::PrimitiveTopology::TriangleList,
        );
        let wireframe = create_pipeline(
            context,
            &pipeline_layout,
            &shader,
            wgpu::PrimitiveTopology::LineList,
        );

        let meshes = library
            .iter()
            .map(|(id, mesh)| {
                let label = format!("Mesh {}", id.index());
                let buffer = |suffix: &str, contents: &[u8], usage| {
                    device.create_buffer_init(
                        &wgpu::util::BufferInitDescriptor {
                            label: Some(&format!("{label} {suffix}")),
                            contents,
                            usage,
                        },
                    )
                };
                GpuMesh {
                    vertices: buffer(
                        "Vertices",
                        bytemuck::cast_slice(&mesh.vertices),
                        wgpu::BufferUsages::VERTEX,
                    ),
                    triangles: buffer(
                        "Triangles",
                        bytemuck::cast_slice(&mesh.indices),
                        wgpu::BufferUsages::INDEX,
                    ),
                    triangle_count: mesh.indices.len() as u32,
                    edges: buffer(
                        "Edges",
                        bytemuck::cast_slice(&mesh.edges),
                        wgpu::BufferUsages::INDEX,
                    ),
                    edge_count: mesh.edges.len() as u32,
                }
            })
            .collect();
        log::debug!("uploaded {} meshes", library.len());

        let (width, height) = context.size();
        Self {
            filled,
            wireframe,
            uniform_buffer,
            bind_group,
            meshes,
            instances: DynamicBuffer::new(
                device,
                "Instance Buffer",
                64,
                wgpu::BufferUsages::VERTEX,
            ),
            depth: DepthTexture::new(device, width, height),
        }
    }

    /// Recreate the depth attachment for the context's current size.
    pub fn resize(&mut self, context: &RenderContext) {
        let (width, height) = context.size();
        self.depth = DepthTexture::new(&context.device, width, height);
    }

    /// Draw `frame` to the next surface texture and present it.
    ///
    /// # Errors
    ///
    /// Returns the surface error if no texture could be acquired.
    pub fn render(
        &mut self,
        context: &RenderContext,
        frame: &SceneFrame,
    ) -> Result<(), wgpu::SurfaceError> {
        let uniform = FrameUniform::from_frame(frame);
        context.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&uniform),
        );

        let (instances, batches) = batch_items(&frame.items);
        let _ = self.instances.write(&context.device, &context.queue, &instances);

        let output = context.get_next_frame()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = context.create_encoder();
        {
            let clear = frame.clear_color;
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Scene Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            depth_slice: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color {
                                    r: f64::from(clear.x),
                                    g: f64::from(clear.y),
                                    b: f64::from(clear.z),
                                    a: 1.0,
                                }),
                                store: wgpu::StoreOp::Store,
                            },
                        },
                    )],
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
                    ..Default::default()
                });

            pass.set_pipeline(if frame.wireframe {
                &self.wireframe
            } else {
                &self.filled
            });
            pass.set_bind_group(0, &self.bind_group, &[]);
            pass.set_vertex_buffer(1, self.instances.buffer().slice(..));

            for batch in &batches {
                let Some(mesh) = self.meshes.get(batch.mesh) else {
                    continue;
                };
                let (indices, count) = if frame.wireframe {
                    (&mesh.edges, mesh.edge_count)
                } else {
                    (&mesh.triangles, mesh.triangle_count)
                };
                if count == 0 {
                    continue;
                }
                pass.set_vertex_buffer(0, mesh.vertices.slice(..));
                pass.set_index_buffer(
                    indices.slice(..),
                    wgpu::IndexFormat::Uint32,
                );
                pass.draw_indexed(0..count, 0, batch.instances.clone());
            }
        }
        context.submit(encoder);
        output.present();
        Ok(())
    }
}

fn create_pipeline(
    context: &RenderContext,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    topology: wgpu::PrimitiveTopology,
) -> wgpu::RenderPipeline {
    let vertex_layout = wgpu::VertexBufferLayout {
        array_stride: size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![
            0 => Float32x3, // position
            1 => Float32x3, // normal
        ],
    };
    let instance_layout = wgpu::VertexBufferLayout {
        array_stride: size_of::<Instance>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &wgpu::vertex_attr_array![
            2 => Float32x4, // model matrix col 0
            3 => Float32x4, // model matrix col 1
            4 => Float32x4, // model matrix col 2
            5 => Float32x4, // model matrix col 3
            6 => Float32x3, // color
            7 => Float32,   // unlit
        ],
    };
    let label = match topology {
        wgpu::PrimitiveTopology::LineList => "Wireframe Pipeline",
        _ => "Filled Pipeline",
    };

    context
        .device
        .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[vertex_layout, instance_layout],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: context.format(),
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                cull_mode: None,
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
        })
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Vec3};

    use super::*;
    use crate::camera::{Camera, Projection};
    use crate::scene::{Lighting, MeshData, PointLight, ShadingMode};

    fn frame(items: Vec<DrawItem>, points: usize) -> SceneFrame {
        SceneFrame {
            items,
            lighting: Lighting {
                ambient: Vec3::splat(0.2),
                directional: None,
                points: vec![
                    PointLight {
                        position: Vec3::Y,
                        radiance: Vec3::ONE,
                    };
                    points
                ],
            },
            shading: ShadingMode::Phong,
            wireframe: false,
            clear_color: Vec3::ONE,
            camera: Camera::new(
                Vec3::splat(10.0),
                Vec3::ZERO,
                Projection::Perspective { fovy: 70.0 },
                1.0,
                100.0,
            ),
        }
    }

    #[test]
    fn uniform_layout_matches_shader() {
        // camera 80 + flags 16 + three padded vec3s 48 + 32 lights * 32
        assert_eq!(size_of::<CameraUniform>(), 80);
        assert_eq!(size_of::<FrameUniform>(), 144 + MAX_POINT_LIGHTS * 32);
        assert_eq!(size_of::<Instance>(), 80);
    }

    #[test]
    fn excess_point_lights_are_dropped() {
        let uniform = FrameUniform::from_frame(&frame(vec![], 40));
        assert_eq!(uniform.point_count, MAX_POINT_LIGHTS as u32);
        assert_eq!(uniform.shading, 1);
        assert_eq!(uniform.directional_on, 0);
    }

    #[test]
    fn items_batch_by_mesh() {
        let mut library = MeshLibrary::new();
        let a = library.add(MeshData::cuboid(Vec3::ONE));
        let b = library.add(MeshData::cuboid(Vec3::ONE));
        let items = [b, a, b, a, a].map(|mesh| {
            DrawItem::new(mesh, Mat4::IDENTITY, Vec3::ONE)
        });
        let (instances, batches) = batch_items(&items);
        assert_eq!(instances.len(), 5);
        assert_eq!(
            batches,
            [
                Batch {
                    mesh: 0,
                    instances: 0..3
                },
                Batch {
                    mesh: 1,
                    instances: 3..5
                },
            ]
        );
    }
}
