//! Structs and functions for handling textures.
//!
//! The module provides the [`Texture`] struct which is a CPU representation
//! of a GPU texture, created from a configured image file and bindable to a
//! validated texture unit.

use std::path::PathBuf;
use std::sync::Arc;

use glow::HasContext;
use image::GenericImageView;
use serde::Deserialize;

use crate::error::{EngineError, Result};

/// Pixel format the image is uploaded as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextureFormat {
    Rgba,
    Rgb,
}

/// Sampling filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextureFilter {
    /// Linear filtering.
    Smooth,
    /// Nearest-neighbour filtering.
    Pixelated,
}

impl TextureFilter {
    fn gl_min_filter(self) -> u32 {
        match self {
            TextureFilter::Smooth => glow::LINEAR_MIPMAP_LINEAR,
            TextureFilter::Pixelated => glow::NEAREST_MIPMAP_NEAREST,
        }
    }

    fn gl_mag_filter(self) -> u32 {
        match self {
            TextureFilter::Smooth => glow::LINEAR,
            TextureFilter::Pixelated => glow::NEAREST,
        }
    }
}

/// Configuration for a file-backed texture.
#[derive(Debug, Clone)]
pub struct TextureCreateInfo {
    pub path: PathBuf,
    pub format: TextureFormat,
    pub filter: TextureFilter,
    pub flip_y: bool,
}

/// Represents a texture stored on the GPU side.
pub struct Texture {
    pub(super) gl: Arc<glow::Context>,
    pub(super) id: glow::Texture,
    pub(super) width: u32,
    pub(super) height: u32,
}

impl Texture {
    /// Decodes the configured image file and uploads it.
    pub fn from_file(gl: &Arc<glow::Context>, info: &TextureCreateInfo) -> Result<Self> {
        let image = image::open(&info.path)?;
        let image = if info.flip_y { image.flipv() } else { image };
        let (width, height) = image.dimensions();

        unsafe {
            let id = gl.create_texture().map_err(EngineError::ResourceCreation)?;
            gl.bind_texture(glow::TEXTURE_2D, Some(id));

            match info.format {
                TextureFormat::Rgba => {
                    let data = image.to_rgba8().into_raw();
                    gl.tex_image_2d(
                        glow::TEXTURE_2D,
                        0,
                        glow::RGBA as i32,
                        width as i32,
                        height as i32,
                        0,
                        glow::RGBA,
                        glow::UNSIGNED_BYTE,
                        glow::PixelUnpackData::Slice(Some(data.as_slice())),
                    );
                }
                TextureFormat::Rgb => {
                    let data = image.to_rgb8().into_raw();
                    gl.tex_image_2d(
                        glow::TEXTURE_2D,
                        0,
                        glow::RGB as i32,
                        width as i32,
                        height as i32,
                        0,
                        glow::RGB,
                        glow::UNSIGNED_BYTE,
                        glow::PixelUnpackData::Slice(Some(data.as_slice())),
                    );
                }
            }

            gl.generate_mipmap(glow::TEXTURE_2D);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                info.filter.gl_min_filter() as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                info.filter.gl_mag_filter() as i32,
            );
            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(Self {
                gl: Arc::clone(gl),
                id,
                width,
                height,
            })
        }
    }

    /// Activates the given texture unit and binds this texture to it. The
    /// unit must be below the GPU's combined-unit limit.
    pub fn bind_to_unit(&self, unit: u32) -> Result<()> {
        let max = unsafe { self.gl.get_parameter_i32(glow::MAX_COMBINED_TEXTURE_IMAGE_UNITS) } as u32;
        if unit >= max {
            return Err(EngineError::InvalidTextureUnit { unit, max });
        }
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.id));
        }
        Ok(())
    }

    /// Returns the width of the texture.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the texture.
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.id);
        }
    }
}
