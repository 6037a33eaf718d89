//! Module to work with OpenGL framebuffers.
//!
//! The [`Framebuffer`] is an offscreen render target: scene rendering goes
//! into it, and its color attachment is handed to the editor overlay for
//! presentation. It is created once at startup and never resized.

use std::sync::Arc;

use glow::HasContext;

use crate::abs::Texture;
use crate::error::{EngineError, Result};

/// An offscreen framebuffer with a color attachment and an optional depth
/// attachment.
pub struct Framebuffer {
    gl: Arc<glow::Context>,
    fbo: glow::Framebuffer,
    color: Texture,
    depth: Option<Texture>,
    width: i32,
    height: i32,
}

impl Framebuffer {
    /// Creates a framebuffer of the given size. Fails if the GPU rejects
    /// the attachment configuration.
    pub fn new(gl: &Arc<glow::Context>, width: i32, height: i32, use_depth: bool) -> Result<Self> {
        unsafe {
            let fbo = gl
                .create_framebuffer()
                .map_err(EngineError::ResourceCreation)?;
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(fbo));

            let color = {
                let tex = gl.create_texture().map_err(EngineError::ResourceCreation)?;
                gl.bind_texture(glow::TEXTURE_2D, Some(tex));
                gl.tex_image_2d(
                    glow::TEXTURE_2D,
                    0,
                    glow::RGBA8 as i32,
                    width,
                    height,
                    0,
                    glow::RGBA,
                    glow::UNSIGNED_BYTE,
                    glow::PixelUnpackData::Slice(None),
                );
                gl.tex_parameter_i32(
                    glow::TEXTURE_2D,
                    glow::TEXTURE_MIN_FILTER,
                    glow::LINEAR as i32,
                );
                gl.tex_parameter_i32(
                    glow::TEXTURE_2D,
                    glow::TEXTURE_MAG_FILTER,
                    glow::LINEAR as i32,
                );
                gl.tex_parameter_i32(
                    glow::TEXTURE_2D,
                    glow::TEXTURE_WRAP_S,
                    glow::CLAMP_TO_EDGE as i32,
                );
                gl.tex_parameter_i32(
                    glow::TEXTURE_2D,
                    glow::TEXTURE_WRAP_T,
                    glow::CLAMP_TO_EDGE as i32,
                );
                gl.framebuffer_texture_2d(
                    glow::FRAMEBUFFER,
                    glow::COLOR_ATTACHMENT0,
                    glow::TEXTURE_2D,
                    Some(tex),
                    0,
                );
                gl.bind_texture(glow::TEXTURE_2D, None);

                Texture {
                    gl: gl.clone(),
                    id: tex,
                    width: width as u32,
                    height: height as u32,
                }
            };

            let depth = if use_depth {
                let tex = gl.create_texture().map_err(EngineError::ResourceCreation)?;
                gl.bind_texture(glow::TEXTURE_2D, Some(tex));
                gl.tex_image_2d(
                    glow::TEXTURE_2D,
                    0,
                    glow::DEPTH_COMPONENT24 as i32,
                    width,
                    height,
                    0,
                    glow::DEPTH_COMPONENT,
                    glow::UNSIGNED_INT,
                    glow::PixelUnpackData::Slice(None),
                );
                gl.tex_parameter_i32(
                    glow::TEXTURE_2D,
                    glow::TEXTURE_MIN_FILTER,
                    glow::NEAREST as i32,
                );
                gl.tex_parameter_i32(
                    glow::TEXTURE_2D,
                    glow::TEXTURE_MAG_FILTER,
                    glow::NEAREST as i32,
                );
                gl.framebuffer_texture_2d(
                    glow::FRAMEBUFFER,
                    glow::DEPTH_ATTACHMENT,
                    glow::TEXTURE_2D,
                    Some(tex),
                    0,
                );
                gl.bind_texture(glow::TEXTURE_2D, None);

                Some(Texture {
                    gl: gl.clone(),
                    id: tex,
                    width: width as u32,
                    height: height as u32,
                })
            } else {
                None
            };

            let status = gl.check_framebuffer_status(glow::FRAMEBUFFER);
            if status != glow::FRAMEBUFFER_COMPLETE {
                gl.bind_framebuffer(glow::FRAMEBUFFER, None);
                gl.delete_framebuffer(fbo);
                return Err(EngineError::FramebufferIncomplete(status));
            }

            gl.bind_framebuffer(glow::FRAMEBUFFER, None);

            Ok(Self {
                gl: gl.clone(),
                fbo,
                color,
                depth,
                width,
                height,
            })
        }
    }

    /// Binds the framebuffer: subsequent draws and clears go to this target.
    /// The viewport is set to cover the whole attachment.
    pub fn bind(&self) {
        unsafe {
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, Some(self.fbo));
            self.gl.viewport(0, 0, self.width, self.height);
        }
    }

    /// Restores the default framebuffer (the window's backbuffer).
    pub fn unbind(gl: &glow::Context) {
        unsafe {
            gl.bind_framebuffer(glow::FRAMEBUFFER, None);
        }
    }

    /// Returns the color texture of the framebuffer.
    pub fn texture(&self) -> &Texture {
        &self.color
    }

    /// Returns the depth texture of the framebuffer, if it exists.
    pub fn depth_texture(&self) -> Option<&Texture> {
        self.depth.as_ref()
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }
}

impl Drop for Framebuffer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_framebuffer(self.fbo);
        }
    }
}
