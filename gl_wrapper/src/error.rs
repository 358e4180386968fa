use gl::types::GLenum;
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum GlError {
    #[error("GL_INVALID_ENUM")]
    InvalidEnum,
    #[error("GL_INVALID_VALUE")]
    InvalidValue,
    #[error("GL_INVALID_OPERATION")]
    InvalidOperation,
    #[error("GL_STACK_OVERFLOW")]
    StackOverflow,
    #[error("GL_STACK_UNDERFLOW")]
    StackUnderflow,
    #[error("GL_OUT_OF_MEMORY")]
    OutOfMemory,
    #[error("GL_INVALID_FRAMEBUFFER_OPERATION")]
    InvalidFramebufferOperation,
    #[error("unknown GL error 0x{0:04x}")]
    Unknown(GLenum),
}

impl GlError {
    pub fn from_code(code: GLenum) -> Option<Self> {
        let err = match code {
            gl::NO_ERROR => return None,
            gl::INVALID_ENUM => Self::InvalidEnum,
            gl::INVALID_VALUE => Self::InvalidValue,
            gl::INVALID_OPERATION => Self::InvalidOperation,
            gl::STACK_OVERFLOW => Self::StackOverflow,
            gl::STACK_UNDERFLOW => Self::StackUnderflow,
            gl::OUT_OF_MEMORY => Self::OutOfMemory,
            gl::INVALID_FRAMEBUFFER_OPERATION => Self::InvalidFramebufferOperation,
            e => Self::Unknown(e),
        };

        Some(err)
    }
}

// A lost context may keep reporting errors forever.
const MAX_DRAINED: usize = 32;

/// Drains the GL error queue and returns the first error found.
pub fn check_errors() -> Result<(), GlError> {
    let mut first = None;

    for _ in 0..MAX_DRAINED {
        let Some(err) = GlError::from_code(unsafe { gl::GetError() }) else {
            break;
        };

        log::warn!("OpenGL error: {err}");
        first.get_or_insert(err);
    }

    match first {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_error_maps_to_none() {
        assert_eq!(GlError::from_code(gl::NO_ERROR), None);
    }

    #[test]
    fn known_codes() {
        assert_eq!(
            GlError::from_code(gl::INVALID_OPERATION),
            Some(GlError::InvalidOperation)
        );
        assert_eq!(
            GlError::from_code(gl::OUT_OF_MEMORY),
            Some(GlError::OutOfMemory)
        );
    }

    #[test]
    fn unknown_code_is_kept() {
        let err = GlError::from_code(0x1234).unwrap();

        assert_eq!(err, GlError::Unknown(0x1234));
        assert_eq!(err.to_string(), "unknown GL error 0x1234");
    }
}
