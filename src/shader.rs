use std::ffi::{c_char, CString};
use std::fmt;

use gl::types::{GLenum, GLuint};
use thiserror::Error;

/// Info logs are truncated to this many bytes, NUL terminator included.
const INFO_LOG_LEN: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_kind(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// A compiled shader object. The GL handle is deleted on drop, so a shader
/// that failed to link, or was never attached at all, is still released.
pub struct Shader {
    id: GLuint,
    stage: ShaderStage,
}

impl Shader {
    /// Compiles `source` for `stage`. Each call creates a fresh shader
    /// object, compiling identical source twice yields two handles.
    pub fn compile(stage: ShaderStage, source: &str) -> Result<Self, ShaderError> {
        let source = CString::new(source)?;

        let shader = unsafe {
            let id = gl::CreateShader(stage.gl_kind());

            gl::ShaderSource(
                id,
                1,
                (&source.as_ptr()) as *const *const c_char,
                std::ptr::null(),
            );
            gl::CompileShader(id);

            Self { id, stage }
        };

        let mut success = 0;
        unsafe {
            gl::GetShaderiv(shader.id, gl::COMPILE_STATUS, &mut success);
        }

        if success != 1 {
            let mut buf = [0_u8; INFO_LOG_LEN];

            unsafe {
                gl::GetShaderInfoLog(
                    shader.id,
                    INFO_LOG_LEN as i32,
                    std::ptr::null_mut(),
                    buf.as_mut_ptr() as *mut c_char,
                );
            }

            // `shader` drops here and deletes the failed object
            return Err(ShaderError::Compile {
                stage,
                log: read_info_log(&buf),
            });
        }

        Ok(shader)
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe { gl::DeleteShader(self.id) }
    }
}

/// Collects compiled stages and links them into a [`Program`].
pub struct ProgramBuilder {
    stages: Vec<Shader>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Compiles the usual vertex + fragment pair in one go.
    pub fn from_sources(vert_src: &str, frag_src: &str) -> Result<Self, ShaderError> {
        Ok(Self::new()
            .with_stage(Shader::compile(ShaderStage::Vertex, vert_src)?)
            .with_stage(Shader::compile(ShaderStage::Fragment, frag_src)?))
    }

    pub fn with_stage(mut self, shader: Shader) -> Self {
        self.stages.push(shader);
        self
    }

    pub fn link(self) -> Result<Program, ShaderError> {
        let program = unsafe {
            let id = gl::CreateProgram();

            for stage in &self.stages {
                gl::AttachShader(id, stage.id);
            }
            gl::LinkProgram(id);

            Program { id }
        };

        let mut success = 0;
        unsafe {
            gl::GetProgramiv(program.id, gl::LINK_STATUS, &mut success);
        }

        if success != 1 {
            let mut buf = [0_u8; INFO_LOG_LEN];

            unsafe {
                gl::GetProgramInfoLog(
                    program.id,
                    INFO_LOG_LEN as i32,
                    std::ptr::null_mut(),
                    buf.as_mut_ptr() as *mut c_char,
                );
            }

            return Err(ShaderError::Link {
                log: read_info_log(&buf),
            });
        }

        // the stage objects are not needed once linked; they drop with `self`
        Ok(program)
    }
}

impl Default for ProgramBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A linked program. Deleted on drop.
pub struct Program {
    id: GLuint,
}

impl Program {
    pub fn id(&self) -> GLuint {
        self.id
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) }
    }
}

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("{stage} shader compilation failed: {log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("shader program linking failed: {log}")]
    Link { log: String },
    #[error("shader source contains an interior NUL byte")]
    SourceNul(#[from] std::ffi::NulError),
}

/// Cuts a raw info log buffer at its NUL terminator, if any.
fn read_info_log(buf: &[u8]) -> String {
    let bytes = match buf.iter().position(|b| *b == 0) {
        Some(end) => &buf[..end],
        None => buf,
    };

    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_maps_to_gl_enum() {
        assert_eq!(ShaderStage::Vertex.gl_kind(), gl::VERTEX_SHADER);
        assert_eq!(ShaderStage::Fragment.gl_kind(), gl::FRAGMENT_SHADER);
    }

    #[test]
    fn stage_display_names() {
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
        assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
    }

    #[test]
    fn info_log_cut_at_nul() {
        let mut buf = [0_u8; 16];
        buf[..5].copy_from_slice(b"oops\n");

        assert_eq!(read_info_log(&buf), "oops\n");
    }

    #[test]
    fn info_log_without_nul_taken_whole() {
        assert_eq!(read_info_log(b"full"), "full");
    }

    #[test]
    fn info_log_empty() {
        assert_eq!(read_info_log(&[0_u8; 8]), "");
    }

    #[test]
    fn compile_error_names_stage_and_log() {
        let err = ShaderError::Compile {
            stage: ShaderStage::Fragment,
            log: "0:3(1): error: syntax error".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "fragment shader compilation failed: 0:3(1): error: syntax error"
        );
    }

    #[test]
    fn link_error_carries_log() {
        let err = ShaderError::Link {
            log: "unresolved varying".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "shader program linking failed: unresolved varying"
        );
    }
}
