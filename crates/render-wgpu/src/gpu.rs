use crate::GpuError;
use crate::mesh::{GpuMesh, primitive_topology};
use meshview_common::{Topology, Vertex};
use meshview_kernel::{ObjectKind, Scene};
use meshview_render::{
    FrameBackend, FrameUniforms, ObjectUniforms, RenderError, Uniform, UniformTable, UniformValue,
};
use wgpu::util::DeviceExt;

/// Per-draw uniform slots available in one frame.
pub const MAX_DRAWS_PER_FRAME: u32 = 64;

const OBJECT_UNIFORM_SIZE: u64 = std::mem::size_of::<ObjectUniforms>() as u64;

/// Distance between per-draw slots for a device's offset alignment.
fn slot_stride(alignment: u32) -> u64 {
    wgpu::util::align_to(OBJECT_UNIFORM_SIZE, alignment as u64)
}

/// Scene pipelines, uniform buffers and the uploaded meshes.
pub struct WgpuRenderer {
    line_pipeline: wgpu::RenderPipeline,
    triangle_pipeline: wgpu::RenderPipeline,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    object_buffer: wgpu::Buffer,
    object_bind_group: wgpu::BindGroup,
    object_stride: u64,
    meshes: Vec<GpuMesh>,
    uniforms: UniformTable,
    depth_texture: wgpu::TextureView,
}

impl WgpuRenderer {
    /// Build the program from `shader_source` and upload every mesh in `scene`.
    ///
    /// Compile and link errors are captured through error scopes and returned
    /// instead of reaching the device's uncaptured-error handler.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        shader_source: &str,
        scene: &Scene,
    ) -> Result<Self, GpuError> {
        UniformTable::verify_source(shader_source)?;

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });
        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(GpuError::ShaderCompile(err.to_string()));
        }

        let frame_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("frame_uniform_buffer"),
            contents: bytemuck::bytes_of(&FrameUniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let object_stride = slot_stride(device.limits().min_uniform_buffer_offset_alignment);
        let object_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("object_uniform_buffer"),
            size: object_stride * MAX_DRAWS_PER_FRAME as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame_bind_group_layout"),
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

        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(OBJECT_UNIFORM_SIZE),
                },
                count: None,
            }],
        });

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame_bind_group"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        let object_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("object_bind_group"),
            layout: &object_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &object_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(OBJECT_UNIFORM_SIZE),
                }),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pipeline_layout"),
            bind_group_layouts: &[&frame_layout, &object_layout],
            push_constant_ranges: &[],
        });

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let line_pipeline = Self::create_pipeline(
            device,
            &pipeline_layout,
            &shader,
            surface_format,
            Topology::LineList,
        );
        let triangle_pipeline = Self::create_pipeline(
            device,
            &pipeline_layout,
            &shader,
            surface_format,
            Topology::TriangleList,
        );
        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(GpuError::ProgramLink(err.to_string()));
        }

        let meshes = scene
            .objects()
            .map(|object| GpuMesh::create(device, object))
            .collect();

        let depth_texture = Self::create_depth_texture(device, width, height);

        tracing::info!(
            draw_slots = MAX_DRAWS_PER_FRAME,
            slot_stride = object_stride,
            "scene renderer ready"
        );

        Ok(Self {
            line_pipeline,
            triangle_pipeline,
            frame_buffer,
            frame_bind_group,
            object_buffer,
            object_bind_group,
            object_stride,
            meshes,
            uniforms: UniformTable::new(),
            depth_texture,
        })
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn mesh(&self, object: ObjectKind) -> Option<&GpuMesh> {
        self.meshes.iter().find(|m| m.info().object == object)
    }

    /// Start recording a frame that renders into `target`.
    pub fn begin_frame<'a>(
        &'a mut self,
        device: &wgpu::Device,
        queue: &'a wgpu::Queue,
        target: &'a wgpu::TextureView,
    ) -> WgpuFrame<'a> {
        let encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("scene_encoder"),
        });
        WgpuFrame {
            renderer: self,
            queue,
            target,
            encoder,
            pass: None,
            program_bound: false,
            draws: 0,
        }
    }

    fn create_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
        topology: Topology,
    ) -> wgpu::RenderPipeline {
        let label = match topology {
            Topology::LineList => "scene_line_pipeline",
            Topology::TriangleList => "scene_triangle_pipeline",
        };
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[GpuMesh::vertex_layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: primitive_topology(topology),
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        })
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

/// One frame being recorded. Implements [`FrameBackend`]; call
/// [`finish`](Self::finish) to submit.
pub struct WgpuFrame<'a> {
    renderer: &'a mut WgpuRenderer,
    queue: &'a wgpu::Queue,
    target: &'a wgpu::TextureView,
    encoder: wgpu::CommandEncoder,
    pass: Option<wgpu::RenderPass<'static>>,
    program_bound: bool,
    draws: u32,
}

impl WgpuFrame<'_> {
    /// End the render pass and submit the frame. Returns the number of draws.
    pub fn finish(self) -> u32 {
        let Self {
            pass,
            encoder,
            queue,
            draws,
            ..
        } = self;
        drop(pass);
        queue.submit(std::iter::once(encoder.finish()));
        draws
    }
}

impl FrameBackend for WgpuFrame<'_> {
    fn clear(&mut self) -> Result<(), RenderError> {
        self.pass = None;
        let pass = self
            .encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: self.target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.renderer.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            })
            .forget_lifetime();
        self.pass = Some(pass);
        self.program_bound = false;
        Ok(())
    }

    fn reupload(&mut self, object: ObjectKind, vertices: &[Vertex]) -> Result<(), RenderError> {
        let mesh = self
            .renderer
            .mesh(object)
            .ok_or(RenderError::UnknownMesh(object))?;
        mesh.reupload(self.queue, vertices)
    }

    fn use_program(&mut self) -> Result<(), RenderError> {
        let pass = self.pass.as_mut().ok_or(RenderError::PassNotStarted)?;
        pass.set_bind_group(0, &self.renderer.frame_bind_group, &[]);
        self.program_bound = true;
        Ok(())
    }

    fn set_uniform(&mut self, uniform: Uniform, value: UniformValue) -> Result<(), RenderError> {
        if !self.program_bound {
            return Err(RenderError::ProgramNotBound);
        }
        self.renderer.uniforms.set(uniform, value)
    }

    fn draw(
        &mut self,
        object: ObjectKind,
        topology: Topology,
        index_count: u32,
    ) -> Result<(), RenderError> {
        if self.pass.is_none() {
            return Err(RenderError::PassNotStarted);
        }
        if !self.program_bound {
            return Err(RenderError::ProgramNotBound);
        }
        if self.draws >= MAX_DRAWS_PER_FRAME {
            return Err(RenderError::DrawBudgetExceeded(MAX_DRAWS_PER_FRAME));
        }
        self.renderer
            .mesh(object)
            .ok_or(RenderError::UnknownMesh(object))?
            .info()
            .check_draw(topology, index_count)?;

        // Frame uniforms hold one value per submission; the last write wins.
        if self.renderer.uniforms.take_frame_dirty() {
            self.queue.write_buffer(
                &self.renderer.frame_buffer,
                0,
                bytemuck::bytes_of(&self.renderer.uniforms.frame()),
            );
        }
        let offset = self.draws as u64 * self.renderer.object_stride;
        self.queue.write_buffer(
            &self.renderer.object_buffer,
            offset,
            bytemuck::bytes_of(&self.renderer.uniforms.object()),
        );

        let renderer = &*self.renderer;
        let mesh = renderer
            .mesh(object)
            .ok_or(RenderError::UnknownMesh(object))?;
        let pipeline = match topology {
            Topology::LineList => &renderer.line_pipeline,
            Topology::TriangleList => &renderer.triangle_pipeline,
        };
        let Some(pass) = self.pass.as_mut() else {
            return Err(RenderError::PassNotStarted);
        };
        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, &renderer.frame_bind_group, &[]);
        pass.set_bind_group(1, &renderer.object_bind_group, &[offset as u32]);
        mesh.draw(pass, topology, index_count)?;

        self.draws += 1;
        Ok(())
    }
}
