use meshview_common::{Topology, UsageHint, Vertex};
use meshview_kernel::SceneObject;
use meshview_render::{MeshInfo, RenderError};
use wgpu::util::DeviceExt;

static VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 2] = [
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 0,
        shader_location: 0,
    },
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x4,
        offset: Vertex::COLOR_OFFSET as u64,
        shader_location: 1,
    },
];

/// Vertex and index buffers for one mesh. Dropping it releases both.
pub struct GpuMesh {
    info: MeshInfo,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
}

impl GpuMesh {
    /// Upload `object`'s mesh. Only dynamic meshes get a writable vertex buffer.
    pub fn create(device: &wgpu::Device, object: &SceneObject) -> Self {
        let info = MeshInfo::of(object);
        let label = object.kind.label();

        let vertex_usage = match info.usage {
            UsageHint::Static => wgpu::BufferUsages::VERTEX,
            UsageHint::Dynamic => wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        };
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_vertex_buffer")),
            contents: bytemuck::cast_slice(&object.mesh.vertices),
            usage: vertex_usage,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_index_buffer")),
            contents: bytemuck::cast_slice(&object.mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        tracing::debug!(
            object = label,
            vertices = info.vertex_count,
            indices = info.index_count,
            usage = ?info.usage,
            "mesh uploaded"
        );

        Self {
            info,
            vertex_buffer,
            index_buffer,
        }
    }

    pub fn info(&self) -> &MeshInfo {
        &self.info
    }

    /// Refill the vertex buffer in place. The index buffer is left as is.
    pub fn reupload(&self, queue: &wgpu::Queue, vertices: &[Vertex]) -> Result<(), RenderError> {
        self.info.check_reupload(vertices)?;
        queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(vertices));
        Ok(())
    }

    /// Bind this mesh's buffers and issue an indexed draw.
    pub fn draw(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        topology: Topology,
        index_count: u32,
    ) -> Result<(), RenderError> {
        self.info.check_draw(topology, index_count)?;
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..index_count, 0, 0..1);
        Ok(())
    }

    /// Layout shared by every mesh: position then colour, one [`Vertex`] per step.
    pub fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: Vertex::STRIDE as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &VERTEX_ATTRIBUTES,
        }
    }
}

pub(crate) fn primitive_topology(topology: Topology) -> wgpu::PrimitiveTopology {
    match topology {
        Topology::LineList => wgpu::PrimitiveTopology::LineList,
        Topology::TriangleList => wgpu::PrimitiveTopology::TriangleList,
    }
}
