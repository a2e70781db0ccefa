use std::ffi::c_void;

use thiserror::Error;

#[derive(Debug, Clone, Copy)]
pub enum VertexAttribute {
    Float,
    Vec2,
    Vec3,
}

impl VertexAttribute {
    pub fn components(self) -> usize {
        match self {
            VertexAttribute::Float => 1,
            VertexAttribute::Vec2 => 2,
            VertexAttribute::Vec3 => 3,
        }
    }
}

/// Uploads a flat f32 stream into a VBO and describes its layout in a VAO.
pub struct GeometryBuilder<'a> {
    data: &'a [f32],
    attributes: Vec<VertexAttribute>,
}

impl<'a> GeometryBuilder<'a> {
    pub fn new(data: &'a [f32]) -> Self {
        Self {
            data,
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, attr: VertexAttribute) -> Self {
        self.attributes.push(attr);
        self
    }

    pub fn build(self) -> Result<Geometry, GeometryError> {
        let vertices = vertex_count(self.data.len(), &self.attributes)?;
        let stride: usize = self.attributes.iter().map(|a| a.components()).sum();

        let mut vao = 0;
        let mut vbo = 0;

        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);

            gl::BufferData(
                gl::ARRAY_BUFFER,
                (self.data.len() * std::mem::size_of::<f32>()) as isize,
                self.data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );

            let mut offset = 0;

            for (slot, attr) in self.attributes.iter().enumerate() {
                gl::VertexAttribPointer(
                    slot as u32,
                    attr.components() as i32,
                    gl::FLOAT,
                    gl::FALSE,
                    (stride * std::mem::size_of::<f32>()) as i32,
                    (offset * std::mem::size_of::<f32>()) as *const c_void,
                );
                gl::EnableVertexAttribArray(slot as u32);

                offset += attr.components();
            }

            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        }

        Ok(Geometry { vao, vbo, vertices })
    }
}

/// How many whole vertices `len` floats hold under the given layout.
fn vertex_count(len: usize, attributes: &[VertexAttribute]) -> Result<usize, GeometryError> {
    let stride: usize = attributes.iter().map(|a| a.components()).sum();

    if stride == 0 || len == 0 || len % stride != 0 {
        return Err(GeometryError::InvalidDataLength { len, stride });
    }

    Ok(len / stride)
}

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("{len} floats do not divide into whole vertices of {stride} floats")]
    InvalidDataLength { len: usize, stride: usize },
}

pub struct Geometry {
    vao: u32,
    vbo: u32,
    vertices: usize,
}

impl Geometry {
    pub fn vao(&self) -> u32 {
        self.vao
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices
    }
}

impl Drop for Geometry {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.vbo);
            gl::DeleteVertexArrays(1, &self.vao);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{QUAD, TRIANGLE};

    #[test]
    fn triangle_stream_is_three_vertices() {
        let count = vertex_count(TRIANGLE.len(), &[VertexAttribute::Vec3]).unwrap();

        assert_eq!(count, 3);
    }

    #[test]
    fn quad_stream_is_six_vertices() {
        let count = vertex_count(QUAD.len(), &[VertexAttribute::Vec3]).unwrap();

        assert_eq!(count, 6);
    }

    #[test]
    fn interleaved_layout_counts_whole_vertices() {
        // position + uv, 5 floats per vertex
        let count = vertex_count(20, &[VertexAttribute::Vec3, VertexAttribute::Vec2]).unwrap();

        assert_eq!(count, 4);
    }

    #[test]
    fn partial_vertex_is_rejected() {
        let err = vertex_count(10, &[VertexAttribute::Vec3]).unwrap_err();

        assert!(matches!(
            err,
            GeometryError::InvalidDataLength { len: 10, stride: 3 }
        ));
    }

    #[test]
    fn empty_stream_is_rejected() {
        assert!(vertex_count(0, &[VertexAttribute::Vec3]).is_err());
    }

    #[test]
    fn layout_without_attributes_is_rejected() {
        assert!(vertex_count(9, &[]).is_err());
    }
}
