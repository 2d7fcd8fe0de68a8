use crate::{RenderError, Uniform, UniformValue};
use meshview_common::{Topology, Vertex};
use meshview_kernel::ObjectKind;

/// Graphics-API seam for one frame. All backends implement this trait.
///
/// Calls arrive in the order defined by [`ScenePass`](crate::ScenePass):
/// clear, re-upload dynamic meshes, bind the program, set uniforms, then draw.
/// Uniform values persist across calls until overwritten, and each draw sees
/// exactly the values set before it.
pub trait FrameBackend {
    /// Clear the colour and depth targets. Starts the frame.
    fn clear(&mut self) -> Result<(), RenderError>;

    /// Refill a dynamic mesh's vertex buffer in place. The index buffer is untouched.
    fn reupload(&mut self, object: ObjectKind, vertices: &[Vertex]) -> Result<(), RenderError>;

    /// Bind the shared shader program for the rest of the frame.
    fn use_program(&mut self) -> Result<(), RenderError>;

    fn set_uniform(&mut self, uniform: Uniform, value: UniformValue) -> Result<(), RenderError>;

    /// Issue an indexed draw of `object`'s mesh. No binding state survives the call.
    fn draw(
        &mut self,
        object: ObjectKind,
        topology: Topology,
        index_count: u32,
    ) -> Result<(), RenderError>;
}
