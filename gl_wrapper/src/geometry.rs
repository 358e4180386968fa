use std::ffi::c_void;

use gl::types::GLuint;
use thiserror::Error;

use crate::buffer::{BufferError, IndexBuffer, VertexBuffer};

pub struct GeometryBuilder<'a> {
    layout: VertexLayout,
    data: &'a [f32],
    indices: Option<&'a [u32]>,
}

impl<'a> GeometryBuilder<'a> {
    pub fn new(data: &'a [f32]) -> Self {
        Self {
            data,
            layout: VertexLayout::default(),
            indices: None,
        }
    }

    pub fn with_attribute(mut self, attr: VertexAttribute) -> Self {
        self.layout.push(attr);
        self
    }

    pub fn with_indices(mut self, indices: &'a [u32]) -> Self {
        self.indices = Some(indices);
        self
    }

    /// Checks the data against the layout without touching GL.
    pub fn validate(&self) -> Result<usize, GeometryError> {
        let stride = self.layout.stride();

        if stride == 0 {
            return Err(GeometryError::NoAttributes);
        }

        if self.data.len() % stride != 0 {
            return Err(GeometryError::InvalidDataLength);
        }

        let vertices = self.data.len() / stride;

        if let Some(indices) = self.indices {
            if let Some(&index) = indices.iter().find(|i| **i as usize >= vertices) {
                return Err(GeometryError::IndexOutOfRange { index, vertices });
            }
        }

        Ok(vertices)
    }

    pub fn build(self) -> Result<Geometry, GeometryError> {
        let vertex_count = self.validate()?;

        let mut vao = 0;

        unsafe {
            gl::GenVertexArrays(1, (&mut vao) as *mut u32);
            gl::BindVertexArray(vao);
        }

        let buffers = VertexBuffer::new(self.data).and_then(|vertices| {
            let indices = self.indices.map(IndexBuffer::new).transpose()?;
            Ok((vertices, indices))
        });

        let (vertices, indices) = match buffers {
            Ok(b) => b,
            Err(e) => {
                unsafe {
                    gl::BindVertexArray(0);
                    gl::DeleteVertexArrays(1, (&vao) as *const u32);
                }
                return Err(e.into());
            }
        };

        let stride_bytes = self.layout.stride_bytes() as i32;

        unsafe {
            for (i, (attr, offset)) in self
                .layout
                .attributes()
                .iter()
                .zip(self.layout.offsets())
                .enumerate()
            {
                gl::VertexAttribPointer(
                    i as u32,
                    attr.size() as i32,
                    gl::FLOAT,
                    gl::FALSE,
                    stride_bytes,
                    (offset * std::mem::size_of::<f32>()) as *const c_void,
                );
                gl::EnableVertexAttribArray(i as u32);
            }

            gl::BindVertexArray(0);
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        }

        Ok(Geometry {
            vao,
            vertices,
            indices,
            vertex_count,
        })
    }
}

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("Geometry needs at least one vertex attribute")]
    NoAttributes,
    #[error("Invalid data length for given attributes")]
    InvalidDataLength,
    #[error("Index {index} is out of range for {vertices} vertices")]
    IndexOutOfRange { index: u32, vertices: usize },
    #[error(transparent)]
    Buffer(#[from] BufferError),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VertexAttribute {
    Float,
    Vec2,
    Vec3,
}

impl VertexAttribute {
    pub fn size(&self) -> usize {
        match self {
            VertexAttribute::Float => 1,
            VertexAttribute::Vec2 => 2,
            VertexAttribute::Vec3 => 3,
        }
    }
}

/// Interleaved float attributes, in shader location order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexLayout {
    attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    pub fn new(attributes: &[VertexAttribute]) -> Self {
        Self {
            attributes: attributes.to_vec(),
        }
    }

    pub fn push(&mut self, attr: VertexAttribute) {
        self.attributes.push(attr);
    }

    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    /// Floats per vertex.
    pub fn stride(&self) -> usize {
        self.attributes.iter().map(|a| a.size()).sum()
    }

    pub fn stride_bytes(&self) -> usize {
        self.stride() * std::mem::size_of::<f32>()
    }

    /// Offset of each attribute, in floats.
    pub fn offsets(&self) -> Vec<usize> {
        self.attributes
            .iter()
            .scan(0, |offset, attr| {
                let current = *offset;
                *offset += attr.size();
                Some(current)
            })
            .collect()
    }
}

pub struct Geometry {
    vao: GLuint,
    vertices: VertexBuffer,
    indices: Option<IndexBuffer>,
    vertex_count: usize,
}

impl Geometry {
    pub fn vao(&self) -> GLuint {
        self.vao
    }

    pub fn bind(&self) {
        unsafe { gl::BindVertexArray(self.vao) }
    }

    pub fn unbind(&self) {
        unsafe { gl::BindVertexArray(0) }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn vertex_buffer(&self) -> &VertexBuffer {
        &self.vertices
    }

    pub fn index_buffer(&self) -> Option<&IndexBuffer> {
        self.indices.as_ref()
    }

    pub fn index_count(&self) -> Option<usize> {
        self.indices.as_ref().map(|i| i.count())
    }
}

impl Drop for Geometry {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteVertexArrays(1, (&self.vao) as *const u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rustfmt::skip]
    const COLORED: [f32; 10] = [
        -0.5, -0.5, 1.0, 0.0, 0.0,
         0.5, -0.5, 0.0, 1.0, 0.0,
    ];

    #[test]
    fn layout_stride_and_offsets() {
        let layout = VertexLayout::new(&[
            VertexAttribute::Vec2,
            VertexAttribute::Vec3,
            VertexAttribute::Float,
        ]);

        assert_eq!(layout.stride(), 6);
        assert_eq!(layout.stride_bytes(), 24);
        assert_eq!(layout.offsets(), vec![0, 2, 5]);
    }

    #[test]
    fn empty_layout() {
        let layout = VertexLayout::default();

        assert_eq!(layout.stride(), 0);
        assert!(layout.offsets().is_empty());
    }

    #[test]
    fn counts_vertices() {
        let builder = GeometryBuilder::new(&COLORED)
            .with_attribute(VertexAttribute::Vec2)
            .with_attribute(VertexAttribute::Vec3);

        assert_eq!(builder.validate().unwrap(), 2);
    }

    #[test]
    fn rejects_missing_attributes() {
        let res = GeometryBuilder::new(&COLORED).build();

        assert!(matches!(res, Err(GeometryError::NoAttributes)));
    }

    #[test]
    fn rejects_partial_vertex() {
        let res = GeometryBuilder::new(&COLORED)
            .with_attribute(VertexAttribute::Vec3)
            .build();

        assert!(matches!(res, Err(GeometryError::InvalidDataLength)));
    }

    #[test]
    fn rejects_out_of_range_index() {
        let res = GeometryBuilder::new(&COLORED)
            .with_attribute(VertexAttribute::Vec2)
            .with_attribute(VertexAttribute::Vec3)
            .with_indices(&[0, 1, 2])
            .build();

        match res {
            Err(GeometryError::IndexOutOfRange { index, vertices }) => {
                assert_eq!(index, 2);
                assert_eq!(vertices, 2);
            }
            _ => panic!("expected an index error"),
        }
    }
}
