//! Vertex arrays: the single bind point for a draw call.
//!
//! A [`VertexArray`] is the lifetime root of the buffers linked into it. It
//! owns one or more vertex buffers, at most one index buffer, and the
//! ordered attribute descriptors that map vertex bytes to shader inputs.

use std::sync::Arc;

use glow::HasContext;

use crate::abs::{IndexBuffer, IndexType, VertexBuffer};
use crate::error::{EngineError, Result};

/// Describes how a slice of vertex-buffer bytes feeds one shader input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttrib {
    pub index: u32,
    pub component_count: i32,
    pub normalized: bool,
    pub byte_offset: i32,
}

impl VertexAttrib {
    /// Size in bytes of one attribute component (`f32`).
    pub const COMPONENT_SIZE: i32 = 4;

    /// Checks that the descriptor fits inside a vertex of the given stride.
    pub fn validate(&self, stride: i32) -> Result<()> {
        let fits = (1..=4).contains(&self.component_count)
            && self.byte_offset >= 0
            && self.byte_offset + self.component_count * Self::COMPONENT_SIZE <= stride;
        if fits {
            Ok(())
        } else {
            Err(EngineError::InvalidAttributeLayout {
                index: self.index,
                component_count: self.component_count,
                byte_offset: self.byte_offset,
                stride,
            })
        }
    }
}

/// A vertex array object plus the buffers it owns.
pub struct VertexArray {
    gl: Arc<glow::Context>,
    id: glow::VertexArray,
    vbos: Vec<VertexBuffer>,
    ibo: Option<IndexBuffer>,
    attribs: Vec<VertexAttrib>,
}

impl VertexArray {
    pub fn new(gl: &Arc<glow::Context>) -> Result<Self> {
        unsafe {
            let id = gl
                .create_vertex_array()
                .map_err(EngineError::ResourceCreation)?;
            Ok(Self {
                gl: Arc::clone(gl),
                id,
                vbos: Vec::new(),
                ibo: None,
                attribs: Vec::new(),
            })
        }
    }

    /// Appends a vertex buffer, taking ownership of it.
    pub fn link_vbo(&mut self, vbo: VertexBuffer) {
        self.vbos.push(vbo);
    }

    /// Sets the index buffer, taking ownership. A previously linked index
    /// buffer is dropped, which releases its GL handle.
    pub fn link_ibo(&mut self, ibo: IndexBuffer) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.id));
        }
        ibo.bind();
        unsafe {
            self.gl.bind_vertex_array(None);
        }
        ibo.unbind();
        self.ibo = Some(ibo);
    }

    /// Registers an attribute descriptor against the most recently linked
    /// vertex buffer, validating it against that buffer's stride.
    pub fn push_attrib(
        &mut self,
        index: u32,
        component_count: i32,
        normalized: bool,
        byte_offset: i32,
    ) -> Result<()> {
        let vbo = self.vbos.last().ok_or(EngineError::MissingVertexBuffer)?;
        let attrib = VertexAttrib {
            index,
            component_count,
            normalized,
            byte_offset,
        };
        attrib.validate(vbo.stride())?;

        unsafe {
            self.gl.bind_vertex_array(Some(self.id));
            vbo.bind();
            self.gl.vertex_attrib_pointer_f32(
                index,
                component_count,
                glow::FLOAT,
                normalized,
                vbo.stride(),
                byte_offset,
            );
            self.gl.enable_vertex_attrib_array(index);
            self.gl.bind_vertex_array(None);
        }
        vbo.unbind();

        self.attribs.push(attrib);
        log::trace!(
            "vertex array attribute {index} registered ({} total)",
            self.attribs.len()
        );
        Ok(())
    }

    /// Binds the array and all linked buffers: vertex buffers in link order,
    /// the index buffer last.
    pub fn bind(&self) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.id));
        }
        for vbo in &self.vbos {
            vbo.bind();
        }
        if let Some(ibo) = &self.ibo {
            ibo.bind();
        }
    }

    pub fn unbind(&self) {
        unsafe {
            self.gl.bind_vertex_array(None);
            self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
            self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);
        }
    }

    /// Ordered read-only view of the linked vertex buffers.
    pub fn linked_vbos(&self) -> &[VertexBuffer] {
        &self.vbos
    }

    /// Index count of the linked index buffer, or zero without one.
    pub fn index_count(&self) -> usize {
        self.ibo.as_ref().map_or(0, |ibo| ibo.index_count())
    }

    pub fn index_type(&self) -> Option<IndexType> {
        self.ibo.as_ref().map(|ibo| ibo.index_type())
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_vertex_array(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abs::Vertex;

    fn attrib(index: u32, component_count: i32, byte_offset: i32) -> VertexAttrib {
        VertexAttrib {
            index,
            component_count,
            normalized: false,
            byte_offset,
        }
    }

    #[test]
    fn standard_vertex_attributes_validate() {
        assert!(attrib(0, 3, Vertex::POSITION_OFFSET).validate(Vertex::STRIDE).is_ok());
        assert!(attrib(1, 3, Vertex::COLOR_OFFSET).validate(Vertex::STRIDE).is_ok());
        assert!(attrib(2, 2, Vertex::TEXCOORD_OFFSET).validate(Vertex::STRIDE).is_ok());
    }

    #[test]
    fn descriptor_may_end_exactly_at_the_stride() {
        assert!(attrib(0, 4, 16).validate(32).is_ok());
        assert!(attrib(0, 1, 28).validate(32).is_ok());
    }

    #[test]
    fn descriptor_past_the_stride_is_rejected() {
        for (component_count, byte_offset, stride) in
            [(3, 24, 32), (4, 20, 32), (2, 28, 32), (1, 32, 32), (4, 0, 12)]
        {
            let err = attrib(0, component_count, byte_offset)
                .validate(stride)
                .unwrap_err();
            assert!(
                matches!(err, EngineError::InvalidAttributeLayout { .. }),
                "({component_count}, {byte_offset}, {stride}) should not fit"
            );
        }
    }

    #[test]
    fn degenerate_descriptors_are_rejected() {
        assert!(attrib(0, 0, 0).validate(32).is_err());
        assert!(attrib(0, 5, 0).validate(32).is_err());
        assert!(attrib(0, 2, -4).validate(32).is_err());
    }
}
