use std::ffi::c_void;

use gl::types::{GLenum, GLsizeiptr, GLuint};
use thiserror::Error;

pub struct VertexBuffer {
    id: GLuint,
    len: usize,
}

impl VertexBuffer {
    /// Uploads `data` once. The buffer is left bound to `ARRAY_BUFFER`.
    pub fn new(data: &[f32]) -> Result<Self, BufferError> {
        let id = upload(gl::ARRAY_BUFFER, data)?;

        Ok(Self {
            id,
            len: data.len(),
        })
    }

    pub fn bind(&self) {
        unsafe { gl::BindBuffer(gl::ARRAY_BUFFER, self.id) }
    }

    pub fn unbind(&self) {
        unsafe { gl::BindBuffer(gl::ARRAY_BUFFER, 0) }
    }

    /// Number of floats stored.
    pub fn len(&self) -> usize {
        self.len
    }
}

impl Drop for VertexBuffer {
    fn drop(&mut self) {
        unsafe { gl::DeleteBuffers(1, (&self.id) as *const u32) }
    }
}

pub struct IndexBuffer {
    id: GLuint,
    count: usize,
}

impl IndexBuffer {
    /// Uploads `indices` once. The buffer is left bound to `ELEMENT_ARRAY_BUFFER`,
    /// so creating it with a VAO bound records it in that VAO.
    pub fn new(indices: &[u32]) -> Result<Self, BufferError> {
        let id = upload(gl::ELEMENT_ARRAY_BUFFER, indices)?;

        Ok(Self {
            id,
            count: indices.len(),
        })
    }

    pub fn bind(&self) {
        unsafe { gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, self.id) }
    }

    pub fn unbind(&self) {
        unsafe { gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, 0) }
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl Drop for IndexBuffer {
    fn drop(&mut self) {
        unsafe { gl::DeleteBuffers(1, (&self.id) as *const u32) }
    }
}

fn upload<T>(target: GLenum, data: &[T]) -> Result<GLuint, BufferError> {
    if data.is_empty() {
        return Err(BufferError::Empty);
    }

    let mut id = 0;

    unsafe { gl::GenBuffers(1, (&mut id) as *mut u32) };

    if id == 0 {
        return Err(BufferError::Creation);
    }

    unsafe {
        gl::BindBuffer(target, id);
        gl::BufferData(
            target,
            std::mem::size_of_val(data) as GLsizeiptr,
            data.as_ptr() as *const c_void,
            gl::STATIC_DRAW,
        );
    }

    Ok(id)
}

#[derive(Debug, Error)]
pub enum BufferError {
    #[error("Buffer data is empty")]
    Empty,
    #[error("Driver did not return a buffer handle")]
    Creation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_vertex_data_is_rejected() {
        assert!(matches!(VertexBuffer::new(&[]), Err(BufferError::Empty)));
    }

    #[test]
    fn empty_index_data_is_rejected() {
        assert!(matches!(IndexBuffer::new(&[]), Err(BufferError::Empty)));
    }
}
