use crate::GpuError;
use std::borrow::Cow;
use std::path::Path;

/// Built-in scene shader.
///
/// Uniform field names are the program's uniform names; they are checked
/// against [`Uniform::ALL`](meshview_render::Uniform::ALL) when the
/// pipelines are built.
pub const SCENE_SHADER: &str = r#"
struct FrameUniforms {
    uTime: f32,
    uAnimSpeed: f32,
    uRotateAnimX: u32,
    uRotateAnimY: u32,
    uRotateAnimZ: u32,
    pad0: u32,
    pad1: u32,
    pad2: u32,
};

struct ObjectUniforms {
    uMVP: mat4x4<f32>,
    uObjectID: i32,
    uPyAnim: u32,
    uGridAnim: u32,
    pad0: u32,
};

@group(0) @binding(0)
var<uniform> per_frame: FrameUniforms;

@group(1) @binding(0)
var<uniform> per_draw: ObjectUniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

fn rotate_x(p: vec3<f32>, a: f32) -> vec3<f32> {
    let c = cos(a);
    let s = sin(a);
    return vec3<f32>(p.x, c * p.y - s * p.z, s * p.y + c * p.z);
}

fn rotate_y(p: vec3<f32>, a: f32) -> vec3<f32> {
    let c = cos(a);
    let s = sin(a);
    return vec3<f32>(c * p.x + s * p.z, p.y, -s * p.x + c * p.z);
}

fn rotate_z(p: vec3<f32>, a: f32) -> vec3<f32> {
    let c = cos(a);
    let s = sin(a);
    return vec3<f32>(c * p.x - s * p.y, s * p.x + c * p.y, p.z);
}

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var position = vertex.position;

    let animated = (per_draw.uObjectID == 0 && per_draw.uPyAnim != 0u)
        || (per_draw.uObjectID == 1 && per_draw.uGridAnim != 0u);
    if animated {
        let angle = per_frame.uTime * per_frame.uAnimSpeed;
        if per_frame.uRotateAnimX != 0u {
            position = rotate_x(position, angle);
        }
        if per_frame.uRotateAnimY != 0u {
            position = rotate_y(position, angle);
        }
        if per_frame.uRotateAnimZ != 0u {
            position = rotate_z(position, angle);
        }
    }

    var out: VertexOutput;
    out.clip_position = per_draw.uMVP * vec4<f32>(position, 1.0);
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

/// Read a WGSL override from disk, or fall back to [`SCENE_SHADER`].
pub fn load_shader_source(path: Option<&Path>) -> Result<Cow<'static, str>, GpuError> {
    let Some(path) = path else {
        return Ok(Cow::Borrowed(SCENE_SHADER));
    };
    match std::fs::read_to_string(path) {
        Ok(source) => {
            tracing::info!(path = %path.display(), "loaded shader override");
            Ok(Cow::Owned(source))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(GpuError::ShaderNotFound {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(GpuError::ShaderRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshview_render::{FrameUniforms, ObjectUniforms, UniformTable};

    #[test]
    fn builtin_shader_declares_every_uniform() {
        assert!(UniformTable::verify_source(SCENE_SHADER).is_ok());
    }

    #[test]
    fn builtin_shader_blocks_match_rust_layout() {
        // Eight 4-byte fields and a mat4 plus four 4-byte fields.
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 8 * 4);
        assert_eq!(std::mem::size_of::<ObjectUniforms>(), 64 + 4 * 4);
        assert!(SCENE_SHADER.contains("fn vs_main"));
        assert!(SCENE_SHADER.contains("fn fs_main"));
    }

    #[test]
    fn no_path_uses_builtin() {
        let source = load_shader_source(None).unwrap();
        assert_eq!(source, SCENE_SHADER);
    }

    #[test]
    fn missing_file_is_reported() {
        let path = std::env::temp_dir().join("meshview-missing-shader.wgsl");
        let err = load_shader_source(Some(&path)).unwrap_err();
        assert!(matches!(err, GpuError::ShaderNotFound { .. }));
    }

    #[test]
    fn override_is_read_from_disk() {
        let path = std::env::temp_dir().join(format!("meshview-shader-{}.wgsl", std::process::id()));
        std::fs::write(&path, "// custom").unwrap();
        let source = load_shader_source(Some(&path)).unwrap();
        assert_eq!(source, "// custom");
        std::fs::remove_file(&path).unwrap();
    }
}
