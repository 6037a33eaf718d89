//! Editor overlay rendering.
//!
//! The [`EditorUi`] is the presentation surface the frame loop hands the
//! offscreen result to: it draws the framebuffer's color texture to the
//! backbuffer through a fullscreen quad, applies a frame-count-driven
//! fade-in, and reports the renderer statistics on the log.

use std::sync::Arc;

use glam::{Vec3, vec2, vec3};
use glow::HasContext;

use crate::abs::{
    IndexBuffer, RendererStatistics, ShaderProgram, StorageType, Texture, Vertex, VertexArray,
    VertexBuffer,
};
use crate::error::Result;

const PRESENT_VERT: &str = include_str!("../shaders/present/vert.glsl");
const PRESENT_FRAG: &str = include_str!("../shaders/present/frag.glsl");

/// Frames between two statistics log lines.
const STATS_LOG_INTERVAL: u32 = 120;

/// Presents an offscreen color texture to the window backbuffer.
pub struct EditorUi {
    gl: Arc<glow::Context>,
    program: ShaderProgram,
    quad: VertexArray,
}

impl EditorUi {
    pub fn new(gl: &Arc<glow::Context>) -> Result<Self> {
        let program = ShaderProgram::from_sources(gl, PRESENT_VERT, PRESENT_FRAG)?;

        let vertices = [
            Vertex::new(vec3(-1.0, 1.0, 0.0), Vec3::ONE, vec2(0.0, 1.0)),
            Vertex::new(vec3(1.0, 1.0, 0.0), Vec3::ONE, vec2(1.0, 1.0)),
            Vertex::new(vec3(-1.0, -1.0, 0.0), Vec3::ONE, vec2(0.0, 0.0)),
            Vertex::new(vec3(1.0, -1.0, 0.0), Vec3::ONE, vec2(1.0, 0.0)),
        ];
        let indices: [u8; 6] = [0, 1, 2, 1, 2, 3];

        let mut quad = VertexArray::new(gl)?;
        quad.link_vbo(VertexBuffer::create(gl, StorageType::Static, vertices)?);
        quad.push_attrib(0, 3, false, Vertex::POSITION_OFFSET)?;
        quad.push_attrib(1, 3, false, Vertex::COLOR_OFFSET)?;
        quad.push_attrib(2, 2, false, Vertex::TEXCOORD_OFFSET)?;
        quad.link_ibo(IndexBuffer::create(gl, StorageType::Static, indices)?);

        Ok(Self {
            gl: Arc::clone(gl),
            program,
            quad,
        })
    }

    /// Draws one overlay frame from the scene texture. The default
    /// framebuffer must be bound.
    pub fn draw(&self, scene: &Texture, frame_count: u32, stats: RendererStatistics) -> Result<()> {
        unsafe {
            self.gl.disable(glow::DEPTH_TEST);
        }

        self.program.use_program();
        scene.bind_to_unit(0)?;
        self.program.set_uniform("u_scene", 0)?;
        self.program.set_uniform("u_frame", frame_count as i32)?;

        self.quad.bind();
        unsafe {
            self.gl.draw_elements(
                glow::TRIANGLES,
                self.quad.index_count() as i32,
                glow::UNSIGNED_BYTE,
                0,
            );
        }
        self.quad.unbind();

        unsafe {
            self.gl.enable(glow::DEPTH_TEST);
        }

        if frame_count % STATS_LOG_INTERVAL == 0 {
            log::debug!(
                "frame {frame_count}: {} draw calls, {} triangles, {} vertices",
                stats.draw_calls,
                stats.triangle_count,
                stats.vertex_count
            );
        }
        Ok(())
    }
}
