//! This module contains the core components for the rendering engine:
//! window/context setup, geometry buffers, vertex arrays, shaders,
//! textures, framebuffers, the renderer and the editor overlay.

pub mod app;
pub mod buffer;
pub mod framebuffer;
pub mod renderer;
pub mod shader;
pub mod texture;
pub mod ui;
pub mod vertex;
pub mod vertex_array;

pub use app::*;
pub use buffer::*;
pub use framebuffer::*;
pub use renderer::*;
pub use shader::*;
pub use texture::*;
pub use ui::*;
pub use vertex::*;
pub use vertex_array::*;
