//! GPU-side vertex and index buffers.
//!
//! A buffer owns its GL handle for its whole lifetime and releases it on
//! drop. Buffers created with [`StorageType::Dynamic`] accept partial
//! re-uploads; static buffers reject them.

use std::sync::Arc;

use glow::HasContext;

use crate::abs::Vertex;
use crate::error::{EngineError, Result};

/// Mutability hint for the GPU-side storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    Static,
    Dynamic,
}

impl StorageType {
    fn gl_usage(self) -> u32 {
        match self {
            StorageType::Static => glow::STATIC_DRAW,
            StorageType::Dynamic => glow::DYNAMIC_DRAW,
        }
    }
}

/// Element type of an index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexType {
    UByte,
    UShort,
    UInt,
}

impl IndexType {
    pub fn gl_type(self) -> u32 {
        match self {
            IndexType::UByte => glow::UNSIGNED_BYTE,
            IndexType::UShort => glow::UNSIGNED_SHORT,
            IndexType::UInt => glow::UNSIGNED_INT,
        }
    }

    /// Size of one index element in bytes.
    pub fn size(self) -> usize {
        match self {
            IndexType::UByte => 1,
            IndexType::UShort => 2,
            IndexType::UInt => 4,
        }
    }
}

/// Integer types usable as index-buffer elements.
pub trait IndexElement: Copy {
    const INDEX_TYPE: IndexType;
}

impl IndexElement for u8 {
    const INDEX_TYPE: IndexType = IndexType::UByte;
}

impl IndexElement for u16 {
    const INDEX_TYPE: IndexType = IndexType::UShort;
}

impl IndexElement for u32 {
    const INDEX_TYPE: IndexType = IndexType::UInt;
}

fn byte_view<T: Copy>(slice: &[T]) -> &[u8] {
    unsafe {
        std::slice::from_raw_parts(slice.as_ptr() as *const u8, std::mem::size_of_val(slice))
    }
}

/// A vertex buffer stored on the GPU side.
pub struct VertexBuffer {
    gl: Arc<glow::Context>,
    id: glow::Buffer,
    storage: StorageType,
    stride: i32,
    vertex_count: usize,
}

impl VertexBuffer {
    /// Creates a buffer from the given vertices, uploading them immediately.
    pub fn create<const N: usize>(
        gl: &Arc<glow::Context>,
        storage: StorageType,
        vertices: [Vertex; N],
    ) -> Result<Self> {
        unsafe {
            let id = gl.create_buffer().map_err(EngineError::ResourceCreation)?;
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(id));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, byte_view(&vertices), storage.gl_usage());
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            Ok(Self {
                gl: Arc::clone(gl),
                id,
                storage,
                stride: Vertex::STRIDE,
                vertex_count: N,
            })
        }
    }

    pub fn bind(&self) {
        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.id));
        }
    }

    pub fn unbind(&self) {
        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }
    }

    /// Re-uploads a range of vertices starting at `first_vertex`. Only
    /// dynamic-storage buffers accept this; the range must fit inside the
    /// buffer as created.
    pub fn update(&mut self, first_vertex: usize, vertices: &[Vertex]) -> Result<()> {
        if self.storage != StorageType::Dynamic {
            return Err(EngineError::StaticBufferWrite);
        }
        debug_assert!(first_vertex + vertices.len() <= self.vertex_count);
        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.id));
            self.gl.buffer_sub_data_u8_slice(
                glow::ARRAY_BUFFER,
                first_vertex as i32 * self.stride,
                byte_view(vertices),
            );
            self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn stride(&self) -> i32 {
        self.stride
    }
}

impl Drop for VertexBuffer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.id);
        }
    }
}

/// An index buffer stored on the GPU side.
pub struct IndexBuffer {
    gl: Arc<glow::Context>,
    id: glow::Buffer,
    index_type: IndexType,
    index_count: usize,
}

impl IndexBuffer {
    /// Creates a buffer from the given indices, uploading them immediately.
    /// The element type of the array determines the index type.
    pub fn create<I: IndexElement, const N: usize>(
        gl: &Arc<glow::Context>,
        storage: StorageType,
        indices: [I; N],
    ) -> Result<Self> {
        debug_assert_eq!(std::mem::size_of::<I>(), I::INDEX_TYPE.size());
        unsafe {
            let id = gl.create_buffer().map_err(EngineError::ResourceCreation)?;
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(id));
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                byte_view(&indices),
                storage.gl_usage(),
            );
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);

            Ok(Self {
                gl: Arc::clone(gl),
                id,
                index_type: I::INDEX_TYPE,
                index_count: N,
            })
        }
    }

    pub fn bind(&self) {
        unsafe {
            self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(self.id));
        }
    }

    pub fn unbind(&self) {
        unsafe {
            self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);
        }
    }

    pub fn index_count(&self) -> usize {
        self.index_count
    }

    pub fn index_type(&self) -> IndexType {
        self.index_type
    }
}

impl Drop for IndexBuffer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};

    #[test]
    fn index_types_report_their_element_sizes() {
        assert_eq!(IndexType::UByte.size(), 1);
        assert_eq!(IndexType::UShort.size(), 2);
        assert_eq!(IndexType::UInt.size(), 4);
        assert_eq!(u8::INDEX_TYPE, IndexType::UByte);
        assert_eq!(u16::INDEX_TYPE, IndexType::UShort);
        assert_eq!(u32::INDEX_TYPE, IndexType::UInt);
    }

    #[test]
    fn index_types_map_to_gl_constants() {
        assert_eq!(IndexType::UByte.gl_type(), glow::UNSIGNED_BYTE);
        assert_eq!(IndexType::UShort.gl_type(), glow::UNSIGNED_SHORT);
        assert_eq!(IndexType::UInt.gl_type(), glow::UNSIGNED_INT);
    }

    #[test]
    fn byte_view_covers_the_whole_vertex_slice() {
        let vertices = [
            Vertex::new(Vec3::ZERO, Vec3::ONE, Vec2::ZERO),
            Vertex::new(Vec3::ONE, Vec3::ZERO, Vec2::ONE),
        ];
        assert_eq!(byte_view(&vertices).len(), 2 * Vertex::STRIDE as usize);
    }
}
