mod shader;

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use bytemuck::{bytes_of, Pod, Zeroable};
use glam::{Mat4, Vec3};
use log::error;
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::{Window, WindowId};

use crate::geometry::{Mesh, MeshCache, Primitive, Topology};
use crate::scene::Drawable;
use crate::texture::LoadedImage;

use shader::SHADER;

/// Number of texture units the pipeline binds.
pub const TEXTURE_UNIT_COUNT: usize = 3;

/// Shared per-frame parameters consumed by the global uniform buffer.
#[derive(Clone, Debug)]
pub struct GlobalParams {
    pub projection: Mat4,
    pub view: Mat4,
    pub global_rotation: Mat4,
    pub camera_position: Vec3,
    pub light_position: Vec3,
    pub light_color: Vec3,
    pub spot_direction: Vec3,
    pub spot_cutoff: f32,
    pub light_on: bool,
    pub tint_on: bool,
    pub spot_on: bool,
    pub normal_debug: bool,
}

/// GPU renderer backed by wgpu that draws the per-frame scene list.
pub struct Renderer {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    depth: DepthBuffer,
    list_pipeline: wgpu::RenderPipeline,
    strip_pipeline: wgpu::RenderPipeline,
    global_buffer: wgpu::Buffer,
    global_bind_group: wgpu::BindGroup,
    object_layout: wgpu::BindGroupLayout,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    texture_slots: Vec<TextureSlot>,
    texture_bind_group: wgpu::BindGroup,
    mesh_cache: MeshCache,
    buffer_cache: HashMap<Primitive, MeshBuffers>,
}

impl Renderer {
    /// Initializes the GPU renderer for the provided window.
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();
        if size.width == 0 || size.height == 0 {
            return Err(anyhow!("window has zero area"));
        }

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = instance.create_surface(Arc::clone(&window))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to acquire GPU adapter")?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("renderer-device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await
            .context("failed to create GPU device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|format| format.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps
                .present_modes
                .iter()
                .copied()
                .find(|mode| {
                    matches!(
                        mode,
                        wgpu::PresentMode::Mailbox | wgpu::PresentMode::Immediate
                    )
                })
                .unwrap_or(wgpu::PresentMode::Fifo),
            desired_maximum_frame_latency: 2,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let depth = DepthBuffer::create(&device, config.width, config.height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("renderer-shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER.into()),
        });

        let global_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("global-bind-layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(
                        std::num::NonZeroU64::new(std::mem::size_of::<GlobalUniform>() as u64)
                            .unwrap(),
                    ),
                },
                count: None,
            }],
        });

        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object-bind-layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(
                        std::num::NonZeroU64::new(std::mem::size_of::<ObjectConstants>() as u64)
                            .unwrap(),
                    ),
                },
                count: None,
            }],
        });

        let mut texture_entries = vec![wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        }];
        for unit in 0..TEXTURE_UNIT_COUNT as u32 {
            texture_entries.push(wgpu::BindGroupLayoutEntry {
                binding: unit + 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            });
        }
        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture-bind-layout"),
            entries: &texture_entries,
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("renderer-pipeline-layout"),
            bind_group_layouts: &[&global_layout, &object_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let global_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("global-uniform"),
            size: std::mem::size_of::<GlobalUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let global_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("global-bind-group"),
            layout: &global_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: global_buffer.as_entire_binding(),
            }],
        });

        let list_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            surface_format,
            wgpu::PrimitiveTopology::TriangleList,
        );
        let strip_pipeline = create_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            surface_format,
            wgpu::PrimitiveTopology::TriangleStrip,
        );

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("texture-sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        // Every unit starts on a 1x1 white placeholder so frames rendered
        // before the image files finish decoding are well defined.
        let texture_slots: Vec<TextureSlot> = (0..TEXTURE_UNIT_COUNT)
            .map(|unit| {
                TextureSlot::from_rgba(
                    &device,
                    &queue,
                    1,
                    1,
                    &[255, 255, 255, 255],
                    &format!("placeholder-{unit}"),
                )
            })
            .collect();
        let texture_bind_group =
            build_texture_bind_group(&device, &texture_layout, &sampler, &texture_slots);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            size,
            depth,
            list_pipeline,
            strip_pipeline,
            global_buffer,
            global_bind_group,
            object_layout,
            texture_layout,
            sampler,
            texture_slots,
            texture_bind_group,
            mesh_cache: MeshCache::new(),
            buffer_cache: HashMap::new(),
        })
    }

    /// Returns the identifier of the window owned by the renderer.
    pub fn window_id(&self) -> WindowId {
        self.window.id()
    }

    /// Exposes the inner window for event handling.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Resizes the swap chain to match the new dimensions.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.depth = DepthBuffer::create(&self.device, new_size.width, new_size.height);
    }

    /// Viewport aspect ratio for the projection matrix.
    pub fn aspect(&self) -> f32 {
        if self.size.height == 0 {
            1.0
        } else {
            self.size.width as f32 / self.size.height as f32
        }
    }

    /// Uploads a finished image into its texture unit, replacing the
    /// placeholder.
    pub fn apply_texture(&mut self, image: &LoadedImage) {
        let Some(slot) = self.texture_slots.get_mut(image.unit as usize) else {
            error!("texture unit {} is out of range", image.unit);
            return;
        };
        *slot = TextureSlot::from_rgba(
            &self.device,
            &self.queue,
            image.width,
            image.height,
            &image.pixels,
            &format!("texture-{}", image.unit),
        );
        self.texture_bind_group = build_texture_bind_group(
            &self.device,
            &self.texture_layout,
            &self.sampler,
            &self.texture_slots,
        );
    }

    /// Updates the shared camera and lighting uniforms before rendering.
    pub fn update_globals(&self, params: &GlobalParams) {
        self.queue
            .write_buffer(&self.global_buffer, 0, bytes_of(&global_uniform(params)));
    }

    /// Draws the per-frame scene list.
    pub fn render(&mut self, drawables: &[Drawable]) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("renderer-encoder"),
            });

        for drawable in drawables {
            self.ensure_mesh_uploaded(drawable.primitive);
        }

        // Drawables are per-frame values; their uniforms live in fresh
        // buffers that die with the frame.
        let mut object_bind_groups = Vec::with_capacity(drawables.len());
        for drawable in drawables {
            let object_buffer = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("object-uniform"),
                    contents: bytes_of(&object_constants(drawable)),
                    usage: wgpu::BufferUsages::UNIFORM,
                });
            object_bind_groups.push(self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("object-bind-group"),
                layout: &self.object_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: object_buffer.as_entire_binding(),
                }],
            }));
        }

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("main-pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        pass.set_bind_group(0, &self.global_bind_group, &[]);
        pass.set_bind_group(2, &self.texture_bind_group, &[]);

        for (drawable, bind_group) in drawables.iter().zip(&object_bind_groups) {
            let Some(mesh) = self.buffer_cache.get(&drawable.primitive) else {
                continue;
            };
            pass.set_bind_group(1, bind_group, &[]);
            pass.set_vertex_buffer(0, mesh.positions.slice(..));
            pass.set_vertex_buffer(1, mesh.normals.slice(..));
            pass.set_vertex_buffer(2, mesh.uvs.slice(..));
            match mesh.topology {
                Topology::TriangleList => {
                    pass.set_pipeline(&self.list_pipeline);
                    pass.draw(0..mesh.vertex_count, 0..1);
                }
                Topology::TriangleStrip { verts_per_strip } => {
                    pass.set_pipeline(&self.strip_pipeline);
                    let mut start = 0;
                    while start < mesh.vertex_count {
                        pass.draw(start..start + verts_per_strip, 0..1);
                        start += verts_per_strip;
                    }
                }
            }
        }

        drop(pass); // explicit to satisfy lifetimes on some backends
        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn ensure_mesh_uploaded(&mut self, primitive: Primitive) {
        if self.buffer_cache.contains_key(&primitive) {
            return;
        }
        let mesh = self.mesh_cache.get_or_create(primitive);
        let label = match primitive {
            Primitive::Box => "box",
            Primitive::Sphere(_) => "sphere",
        };
        self.buffer_cache
            .insert(primitive, MeshBuffers::from_mesh(&self.device, &mesh, label));
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    topology: wgpu::PrimitiveTopology,
) -> wgpu::RenderPipeline {
    let label = match topology {
        wgpu::PrimitiveTopology::TriangleStrip => "strip-pipeline",
        _ => "list-pipeline",
    };
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: "vs_main",
            buffers: &[
                wgpu::VertexBufferLayout {
                    array_stride: (3 * std::mem::size_of::<f32>()) as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &POSITION_ATTRIBUTES,
                },
                wgpu::VertexBufferLayout {
                    array_stride: (3 * std::mem::size_of::<f32>()) as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &NORMAL_ATTRIBUTES,
                },
                wgpu::VertexBufferLayout {
                    array_stride: (2 * std::mem::size_of::<f32>()) as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &UV_ATTRIBUTES,
                },
            ],
        },
        primitive: wgpu::PrimitiveState {
            topology,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DepthBuffer::FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: Default::default(),
            bias: Default::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: "fs_main",
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        multiview: None,
    })
}

const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![0 => Float32x3];
const NORMAL_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];
const UV_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![2 => Float32x2];

fn build_texture_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    slots: &[TextureSlot],
) -> wgpu::BindGroup {
    let mut entries = vec![wgpu::BindGroupEntry {
        binding: 0,
        resource: wgpu::BindingResource::Sampler(sampler),
    }];
    for (unit, slot) in slots.iter().enumerate() {
        entries.push(wgpu::BindGroupEntry {
            binding: unit as u32 + 1,
            resource: wgpu::BindingResource::TextureView(&slot.view),
        });
    }
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("texture-bind-group"),
        layout,
        entries: &entries,
    })
}

fn object_constants(drawable: &Drawable) -> ObjectConstants {
    ObjectConstants {
        model: drawable.model.to_cols_array_2d(),
        color: drawable.material.base_color().into(),
        selector: [drawable.material.selector(), 0, 0, 0],
    }
}

fn global_uniform(params: &GlobalParams) -> GlobalUniform {
    GlobalUniform {
        projection: params.projection.to_cols_array_2d(),
        view: params.view.to_cols_array_2d(),
        global_rotation: params.global_rotation.to_cols_array_2d(),
        camera_position: params.camera_position.extend(1.0).into(),
        light_position: params.light_position.extend(1.0).into(),
        light_color: params.light_color.extend(1.0).into(),
        spot_direction: params.spot_direction.extend(params.spot_cutoff).into(),
        flags: [
            params.light_on as i32,
            params.tint_on as i32,
            params.spot_on as i32,
            params.normal_debug as i32,
        ],
    }
}

/// Vertex buffers for one cached primitive, uploaded once and shared by
/// every instance drawn afterwards.
struct MeshBuffers {
    positions: wgpu::Buffer,
    normals: wgpu::Buffer,
    uvs: wgpu::Buffer,
    vertex_count: u32,
    topology: Topology,
}

impl MeshBuffers {
    fn from_mesh(device: &wgpu::Device, mesh: &Mesh, label: &str) -> Self {
        let make = |name: &str, contents: &[f32]| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label}-{name}")),
                contents: bytemuck::cast_slice(contents),
                usage: wgpu::BufferUsages::VERTEX,
            })
        };
        Self {
            positions: make("positions", &mesh.positions),
            normals: make("normals", &mesh.normals),
            uvs: make("uvs", &mesh.uvs),
            vertex_count: mesh.vertex_count,
            topology: mesh.topology,
        }
    }
}

struct TextureSlot {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl TextureSlot {
    fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        width: u32,
        height: u32,
        pixels: &[u8],
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            _texture: texture,
            view,
        }
    }
}

struct DepthBuffer {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl DepthBuffer {
    const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

    fn create(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth-texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            _texture: texture,
            view,
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct GlobalUniform {
    projection: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    global_rotation: [[f32; 4]; 4],
    camera_position: [f32; 4],
    light_position: [f32; 4],
    light_color: [f32; 4],
    spot_direction: [f32; 4],
    flags: [i32; 4],
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct ObjectConstants {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    selector: [i32; 4],
}
