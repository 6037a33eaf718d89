//! Application lifecycle and the frame loop.
//!
//! The [`Application`] exclusively owns the window and the scene. Only one
//! may exist per process: construction is guarded, and a second attempt
//! fails with [`EngineError::ApplicationExists`]. [`Application::run`]
//! performs the one-time resource setup and then drives the per-frame
//! sequence until the window reports closed.

use std::sync::atomic::{AtomicBool, Ordering};

use glam::{Mat4, Vec3, vec2, vec3};

use crate::abs::{
    App, Framebuffer, IndexBuffer, Renderer, RendererStatistics, ShaderProgram, StorageType,
    Texture, TextureCreateInfo, Vertex, VertexArray, VertexBuffer,
};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::scene::Scene;

static APPLICATION_CLAIMED: AtomicBool = AtomicBool::new(false);

/// The demo quad: four corners with distinct colors, as one unit square.
const QUAD_VERTICES: [Vertex; 4] = [
    Vertex::new(vec3(-0.5, 0.5, 0.0), vec3(1.0, 0.0, 0.0), vec2(0.0, 1.0)),
    Vertex::new(vec3(0.5, 0.5, 0.0), vec3(0.0, 1.0, 0.0), vec2(1.0, 1.0)),
    Vertex::new(vec3(-0.5, -0.5, 0.0), vec3(0.0, 0.0, 1.0), vec2(0.0, 0.0)),
    Vertex::new(vec3(0.5, -0.5, 0.0), vec3(1.0, 1.0, 0.0), vec2(1.0, 0.0)),
];

/// Two triangles sharing the quad's diagonal edge.
const QUAD_INDICES: [u8; 6] = [0, 1, 2, 1, 2, 3];

/// Half-height of the orthographic view volume.
const ORTHO_EXTENT: f32 = 2.75;

fn claim(flag: &AtomicBool) -> Result<()> {
    if flag.swap(true, Ordering::SeqCst) {
        Err(EngineError::ApplicationExists)
    } else {
        Ok(())
    }
}

/// The engine runtime: one window, one scene, one frame loop.
pub struct Application {
    window: App,
    scene: Scene,
    config: EngineConfig,
}

impl Application {
    /// Constructs the process's single application. Fails with
    /// [`EngineError::ApplicationExists`] if one was already constructed,
    /// or with [`EngineError::WindowInit`] if the window cannot be
    /// initialized; no partial application is returned.
    pub fn new(config: EngineConfig) -> Result<Self> {
        claim(&APPLICATION_CLAIMED)?;
        let window = App::new(&config.window)?;
        log::info!("application initialized");
        Ok(Self {
            window,
            scene: Scene::new(),
            config,
        })
    }

    /// Builds the render resources and runs the frame loop until the
    /// window reports closed. Any failed step aborts the frame and the
    /// loop; resources are released on every exit path.
    pub fn run(&mut self) -> Result<()> {
        let gl = self.window.gl().clone();
        let config = self.config.clone();

        let shader = ShaderProgram::from_files(
            &gl,
            &config.assets.vertex_shader,
            &config.assets.fragment_shader,
        )?;
        shader.use_program();
        let (width, height) = self.window.size();
        let aspect = width as f32 / height as f32;
        shader.set_uniform(
            "u_proj",
            Mat4::orthographic_rh_gl(
                -ORTHO_EXTENT * aspect,
                ORTHO_EXTENT * aspect,
                -ORTHO_EXTENT,
                ORTHO_EXTENT,
                -1.0,
                1.0,
            ),
        )?;
        shader.set_uniform("u_tex_image", 0)?;

        let texture = Texture::from_file(
            &gl,
            &TextureCreateInfo {
                path: config.assets.texture.clone(),
                format: config.assets.texture_format,
                filter: config.assets.texture_filter,
                flip_y: config.assets.flip_texture_y,
            },
        )?;
        log::info!(
            "scene texture loaded ({}x{} from {})",
            texture.width(),
            texture.height(),
            config.assets.texture.display()
        );

        let (max_width, max_height) = self.window.max_size();
        let framebuffer = Framebuffer::new(&gl, max_width as i32, max_height as i32, true)?;
        log::info!(
            "offscreen framebuffer created ({}x{})",
            framebuffer.width(),
            framebuffer.height()
        );

        let mut vertex_array = VertexArray::new(&gl)?;
        vertex_array.link_vbo(VertexBuffer::create(&gl, StorageType::Dynamic, QUAD_VERTICES)?);
        vertex_array.push_attrib(0, 3, false, Vertex::POSITION_OFFSET)?;
        vertex_array.push_attrib(1, 3, false, Vertex::COLOR_OFFSET)?;
        vertex_array.push_attrib(2, 2, false, Vertex::TEXCOORD_OFFSET)?;
        vertex_array.link_ibo(IndexBuffer::create(&gl, StorageType::Dynamic, QUAD_INDICES)?);

        let index_count = vertex_array.index_count();
        let index_type = vertex_array
            .index_type()
            .ok_or(EngineError::MissingIndexBuffer)?;
        let vertex_count = vertex_array
            .linked_vbos()
            .first()
            .map_or(0, |vbo| vbo.vertex_count());

        let mut renderer = Renderer::new(&gl);
        renderer.set_clear_color(Vec3::from(config.renderer.clear_color));
        renderer.submit_stats(RendererStatistics::single_draw(
            vertex_count as u32,
            index_count as u32,
        ));

        let mut frame_count: u32 = 0;

        while !self.window.closed() {
            framebuffer.bind();
            renderer.clear();

            shader.use_program();
            shader.set_uniform("u_model", self.scene.model)?;
            self.window
                .process_input(&mut self.scene.model, config.input.move_speed, &shader)?;

            texture.bind_to_unit(0)?;
            vertex_array.bind();

            renderer.render(config.renderer.primitive, index_count as i32, index_type);
            renderer.update();

            vertex_array.unbind();
            Framebuffer::unbind(&gl);

            self.window
                .create_editor_gui_frame(&framebuffer, frame_count, renderer.stats())?;

            frame_count += 1;
        }

        log::info!("window closed after {frame_count} frames; releasing render resources");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_can_be_claimed_exactly_once() {
        let flag = AtomicBool::new(false);
        assert!(claim(&flag).is_ok());
        assert!(matches!(
            claim(&flag).unwrap_err(),
            EngineError::ApplicationExists
        ));
        assert!(matches!(
            claim(&flag).unwrap_err(),
            EngineError::ApplicationExists
        ));
    }

    #[test]
    fn quad_geometry_matches_the_reference_scene() {
        assert_eq!(QUAD_VERTICES.len(), 4);
        assert_eq!(QUAD_INDICES, [0, 1, 2, 1, 2, 3]);

        let stats = RendererStatistics::single_draw(
            QUAD_VERTICES.len() as u32,
            QUAD_INDICES.len() as u32,
        );
        assert_eq!(stats.draw_calls, 1);
        assert_eq!(stats.triangle_count, 2);
        assert_eq!(stats.vertex_count, 4);
    }

    #[test]
    fn quad_indices_reference_every_vertex() {
        let mut seen = [false; 4];
        for index in QUAD_INDICES {
            seen[index as usize] = true;
        }
        assert!(seen.iter().all(|&used| used));
    }
}
