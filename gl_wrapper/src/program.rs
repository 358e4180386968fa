use std::ffi::{c_char, CString};
use std::fmt::{Display, Formatter};
use std::path::Path;

use gl::types::{GLenum, GLint, GLuint};
use thiserror::Error;

use crate::source::load_source;

const INFO_LOG_LEN: usize = 1024;

/// Builds a linked program out of a vertex and a fragment stage.
pub struct ProgramBuilder {
    vert: String,
    frag: String,
}

impl ProgramBuilder {
    pub fn new(vert_src: &str, frag_src: &str) -> Self {
        Self {
            vert: vert_src.to_owned(),
            frag: frag_src.to_owned(),
        }
    }

    /// Reads both stages from disk. A missing file turns into an empty source,
    /// which then fails to compile with the driver's diagnostic.
    pub fn from_files<V: AsRef<Path>, F: AsRef<Path>>(vert_path: V, frag_path: F) -> Self {
        Self {
            vert: load_source(vert_path),
            frag: load_source(frag_path),
        }
    }

    pub fn build(self) -> Result<Program, ProgramError> {
        let vert = compile_stage(Stage::Vertex, &self.vert)?;

        let frag = match compile_stage(Stage::Fragment, &self.frag) {
            Ok(frag) => frag,
            Err(e) => {
                unsafe { gl::DeleteShader(vert) };
                return Err(e);
            }
        };

        let mut success: GLint = 0;

        unsafe {
            let program = gl::CreateProgram();
            gl::AttachShader(program, vert);
            gl::AttachShader(program, frag);
            gl::LinkProgram(program);

            gl::GetProgramiv(program, gl::LINK_STATUS, (&mut success) as *mut GLint);

            // stages are flagged for deletion here, the driver frees them once detached
            gl::DetachShader(program, vert);
            gl::DetachShader(program, frag);
            gl::DeleteShader(vert);
            gl::DeleteShader(frag);

            if success != gl::TRUE as GLint {
                let mut buf = [0_u8; INFO_LOG_LEN];

                gl::GetProgramInfoLog(
                    program,
                    INFO_LOG_LEN as i32,
                    std::ptr::null_mut(),
                    buf.as_mut_ptr() as *mut c_char,
                );
                gl::DeleteProgram(program);

                let log = info_log_to_string(&buf);
                log::error!("Failed to link program:\n{log}");

                return Err(ProgramError::Link(log));
            }

            log::debug!("Linked program {program}");

            Ok(Program { id: program })
        }
    }
}

fn compile_stage(stage: Stage, src: &str) -> Result<GLuint, ProgramError> {
    let src = CString::new(src).map_err(|_| {
        log::error!("The {stage} shader source contains a NUL byte");
        ProgramError::InvalidSource(stage)
    })?;

    let mut success: GLint = 0;

    unsafe {
        let shader = gl::CreateShader(stage.gl_enum());

        gl::ShaderSource(
            shader,
            1,
            (&src.as_ptr()) as *const *const c_char,
            std::ptr::null(),
        );

        gl::CompileShader(shader);
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, (&mut success) as *mut GLint);

        if success != gl::TRUE as GLint {
            let mut buf = [0_u8; INFO_LOG_LEN];

            gl::GetShaderInfoLog(
                shader,
                INFO_LOG_LEN as i32,
                std::ptr::null_mut(),
                buf.as_mut_ptr() as *mut c_char,
            );
            gl::DeleteShader(shader);

            let log = info_log_to_string(&buf);
            log::error!("Failed to compile {stage} shader:\n{log}");

            return Err(ProgramError::Compile { stage, log });
        }

        Ok(shader)
    }
}

/// Driver logs are NUL terminated inside a fixed buffer.
fn info_log_to_string(buf: &[u8]) -> String {
    let data = match buf.iter().position(|b| *b == 0) {
        Some(end) => &buf[..end],
        None => buf,
    };

    String::from_utf8_lossy(data).trim_end().to_owned()
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl Stage {
    fn gl_enum(&self) -> GLenum {
        match self {
            Stage::Vertex => gl::VERTEX_SHADER,
            Stage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Vertex => f.write_str("vertex"),
            Stage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("{0} shader source contains a NUL byte")]
    InvalidSource(Stage),
    #[error("failed to compile {stage} shader: {log}")]
    Compile { stage: Stage, log: String },
    #[error("failed to link program: {0}")]
    Link(String),
}

pub struct Program {
    id: GLuint,
}

impl Program {
    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn bind(&self) {
        unsafe { gl::UseProgram(self.id) }
    }

    pub fn unbind(&self) {
        unsafe { gl::UseProgram(0) }
    }

    /// Looks up an active uniform. Names the linker optimized away report `None`.
    pub fn uniform_location(&self, name: &str) -> Option<GLint> {
        let name = CString::new(name).ok()?;

        let location = unsafe { gl::GetUniformLocation(self.id, name.as_ptr()) };

        if location < 0 {
            None
        } else {
            Some(location)
        }
    }

    /// Sets a `vec4` uniform. The program must be bound.
    pub fn set_uniform_4f(&self, location: GLint, value: [f32; 4]) {
        unsafe { gl::Uniform4f(location, value[0], value[1], value[2], value[3]) }
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_log_stops_at_nul() {
        let mut buf = [0_u8; 32];
        buf[..11].copy_from_slice(b"0:1: error\n");
        buf[12] = b'x';

        assert_eq!(info_log_to_string(&buf), "0:1: error");
    }

    #[test]
    fn info_log_without_terminator() {
        assert_eq!(info_log_to_string(b"full buffer"), "full buffer");
    }

    #[test]
    fn empty_info_log() {
        assert_eq!(info_log_to_string(&[0; 8]), "");
    }

    #[test]
    fn stage_names() {
        assert_eq!(Stage::Vertex.to_string(), "vertex");
        assert_eq!(Stage::Fragment.to_string(), "fragment");
    }

    #[test]
    fn nul_in_source_fails_before_any_gl_call() {
        let err = compile_stage(Stage::Vertex, "void main() {}\0").unwrap_err();

        assert!(matches!(err, ProgramError::InvalidSource(Stage::Vertex)));
    }

    #[test]
    fn compile_error_message_names_stage() {
        let err = ProgramError::Compile {
            stage: Stage::Fragment,
            log: "0:3: syntax error".into(),
        };

        assert_eq!(
            err.to_string(),
            "failed to compile fragment shader: 0:3: syntax error"
        );
    }

    #[test]
    fn invalid_source_message_names_stage() {
        let err = ProgramError::InvalidSource(Stage::Fragment);

        assert_eq!(err.to_string(), "fragment shader source contains a NUL byte");
    }
}
