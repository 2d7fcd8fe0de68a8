use meshview_render::RenderError;
use std::path::PathBuf;

/// Setup and runtime failures of the wgpu backend.
#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("shader file not found: {}", path.display())]
    ShaderNotFound { path: PathBuf },
    #[error("failed to read shader {}: {source}", path.display())]
    ShaderRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("shader failed to compile: {0}")]
    ShaderCompile(String),
    #[error("shader program failed to link: {0}")]
    ProgramLink(String),
    #[error(transparent)]
    Render(#[from] RenderError),
}
