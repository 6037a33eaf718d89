//! SDL2 and OpenGL window management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2
//! window, the OpenGL context and the event pump, and exposes the narrow
//! per-frame surface the frame loop drives: input sampling, the closed
//! signal and the editor-overlay hand-off.

use std::collections::HashSet;
use std::sync::Arc;

use glam::{Mat4, Vec3};
use glow::HasContext;
use sdl2::keyboard::Keycode;
use sdl2::video::SwapInterval;

use crate::abs::{EditorUi, Framebuffer, RendererStatistics, ShaderProgram};
use crate::config::WindowConfig;
use crate::error::{EngineError, Result};

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
pub struct App {
    pub sdl: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub event_pump: sdl2::EventPump,
    // editor_ui owns GL objects, so it must drop before gl_context.
    editor_ui: EditorUi,
    pub gl: Arc<glow::Context>,
    pub gl_context: sdl2::video::GLContext,
    pub window: sdl2::video::Window,
    keys_down: HashSet<Keycode>,
    closed: bool,
    max_size: (u32, u32),
}

impl App {
    /// Creates the window and GL context from the given configuration.
    /// Every SDL or GL failure here maps to [`EngineError::WindowInit`].
    pub fn new(config: &WindowConfig) -> Result<Self> {
        let sdl = sdl2::init().map_err(EngineError::WindowInit)?;
        let video_subsystem = sdl.video().map_err(EngineError::WindowInit)?;

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(3, 3);

        let display_mode = video_subsystem
            .current_display_mode(0)
            .map_err(EngineError::WindowInit)?;
        let max_size = (display_mode.w as u32, display_mode.h as u32);
        let (width, height) = if config.fullscreen {
            max_size
        } else {
            (config.width, config.height)
        };

        let mut window = video_subsystem
            .window(&config.title, width, height)
            .opengl()
            .resizable()
            .build()
            .map_err(|e| EngineError::WindowInit(e.to_string()))?;
        window
            .set_fullscreen(if config.fullscreen {
                sdl2::video::FullscreenType::Desktop
            } else {
                sdl2::video::FullscreenType::Off
            })
            .map_err(EngineError::WindowInit)?;

        let gl_context = window
            .gl_create_context()
            .map_err(EngineError::WindowInit)?;
        window
            .gl_make_current(&gl_context)
            .map_err(EngineError::WindowInit)?;
        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        let gl = Arc::new(gl);

        video_subsystem
            .gl_set_swap_interval(if config.vsync {
                SwapInterval::VSync
            } else {
                SwapInterval::Immediate
            })
            .map_err(EngineError::WindowInit)?;

        unsafe {
            gl.enable(glow::DEPTH_TEST);
            gl.enable(glow::BLEND);
            gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
        }

        let event_pump = sdl.event_pump().map_err(EngineError::WindowInit)?;
        let editor_ui = EditorUi::new(&gl)?;

        log::info!("window created ({width}x{height}, display {}x{})", max_size.0, max_size.1);

        Ok(Self {
            sdl,
            video_subsystem,
            window,
            gl_context,
            gl,
            event_pump,
            editor_ui,
            keys_down: HashSet::new(),
            closed: false,
            max_size,
        })
    }

    /// The shared GL context handed to resource wrappers.
    pub fn gl(&self) -> &Arc<glow::Context> {
        &self.gl
    }

    /// Current window size.
    pub fn size(&self) -> (u32, u32) {
        self.window.size()
    }

    /// Maximum window size (the desktop display mode).
    pub fn max_size(&self) -> (u32, u32) {
        self.max_size
    }

    /// Whether the window has received a close signal.
    pub fn closed(&self) -> bool {
        self.closed
    }

    /// Drains pending events and applies held movement keys to `transform`,
    /// re-uploading the model uniform through `shader` when it changed.
    pub fn process_input(
        &mut self,
        transform: &mut Mat4,
        speed: f32,
        shader: &ShaderProgram,
    ) -> Result<()> {
        for event in self.event_pump.poll_iter() {
            match event {
                sdl2::event::Event::Quit { .. } => self.closed = true,
                sdl2::event::Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => self.closed = true,
                sdl2::event::Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    self.keys_down.insert(key);
                }
                sdl2::event::Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    self.keys_down.remove(&key);
                }
                _ => {}
            }
        }

        let mut delta = Vec3::ZERO;
        if self.keys_down.contains(&Keycode::W) || self.keys_down.contains(&Keycode::Up) {
            delta.y += 1.0;
        }
        if self.keys_down.contains(&Keycode::S) || self.keys_down.contains(&Keycode::Down) {
            delta.y -= 1.0;
        }
        if self.keys_down.contains(&Keycode::A) || self.keys_down.contains(&Keycode::Left) {
            delta.x -= 1.0;
        }
        if self.keys_down.contains(&Keycode::D) || self.keys_down.contains(&Keycode::Right) {
            delta.x += 1.0;
        }

        if delta != Vec3::ZERO {
            *transform = Mat4::from_translation(delta * speed) * *transform;
            shader.set_uniform("u_model", *transform)?;
        }
        Ok(())
    }

    /// Presents the framebuffer's color output through the editor overlay
    /// and swaps the window. Call with the default framebuffer bound.
    pub fn create_editor_gui_frame(
        &mut self,
        framebuffer: &Framebuffer,
        frame_count: u32,
        stats: RendererStatistics,
    ) -> Result<()> {
        let (width, height) = self.window.drawable_size();
        unsafe {
            self.gl.viewport(0, 0, width as i32, height as i32);
        }
        self.editor_ui.draw(framebuffer.texture(), frame_count, stats)?;
        self.window.gl_swap_window();
        Ok(())
    }
}
