//! The vertex record uploaded to the GPU.
//!
//! Field order defines the byte offsets consumed by the attribute
//! descriptors, so the struct is `#[repr(C)]` and the offsets are exposed as
//! constants next to it.

use glam::{Vec2, Vec3};

/// A single vertex: position, color, texture coordinates.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub color: Vec3,
    pub texcoord: Vec2,
}

impl Vertex {
    /// Byte distance between consecutive vertices in a buffer.
    pub const STRIDE: i32 = std::mem::size_of::<Vertex>() as i32;

    pub const POSITION_OFFSET: i32 = 0;
    pub const COLOR_OFFSET: i32 = std::mem::size_of::<Vec3>() as i32;
    pub const TEXCOORD_OFFSET: i32 = (std::mem::size_of::<Vec3>() * 2) as i32;

    pub const fn new(position: Vec3, color: Vec3, texcoord: Vec2) -> Self {
        Self {
            position,
            color,
            texcoord,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_the_attribute_offsets() {
        assert_eq!(Vertex::STRIDE, 32);
        assert_eq!(
            std::mem::offset_of!(Vertex, position) as i32,
            Vertex::POSITION_OFFSET
        );
        assert_eq!(
            std::mem::offset_of!(Vertex, color) as i32,
            Vertex::COLOR_OFFSET
        );
        assert_eq!(
            std::mem::offset_of!(Vertex, texcoord) as i32,
            Vertex::TEXCOORD_OFFSET
        );
    }

    #[test]
    fn vertices_pack_contiguously() {
        assert_eq!(
            std::mem::size_of::<[Vertex; 4]>(),
            4 * Vertex::STRIDE as usize
        );
    }
}
