//! Engine configuration.
//!
//! The engine reads a single JSON file (`ember3d.json` next to the binary by
//! default). Every section falls back to its defaults, so a missing file or
//! an empty object both yield a runnable configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::abs::{PrimitiveType, TextureFilter, TextureFormat};
use crate::error::{EngineError, Result};

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub window: WindowConfig,
    pub assets: AssetConfig,
    pub renderer: RendererConfig,
    pub input: InputConfig,
}

/// Window and GL context settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "ember3d editor".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Paths and decode settings for the file-backed resources.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    pub texture: PathBuf,
    pub texture_format: TextureFormat,
    pub texture_filter: TextureFilter,
    pub flip_texture_y: bool,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            vertex_shader: PathBuf::from("assets/shaders/default/vert.glsl"),
            fragment_shader: PathBuf::from("assets/shaders/default/frag.glsl"),
            texture: PathBuf::from("assets/textures/checker.png"),
            texture_format: TextureFormat::Rgba,
            texture_filter: TextureFilter::Smooth,
            flip_texture_y: true,
        }
    }
}

/// Clear color and draw primitive for the scene pass.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub clear_color: [f32; 3],
    pub primitive: PrimitiveType,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.1, 0.1, 0.11],
            primitive: PrimitiveType::Triangles,
        }
    }
}

/// Input handling settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub move_speed: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { move_speed: 0.05 }
    }
}

impl EngineConfig {
    /// Reads and parses the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Like [`EngineConfig::load`], but a missing file falls back to the
    /// defaults instead of failing.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            log::info!("no config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_parses_to_defaults() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 720);
        assert!(config.window.vsync);
        assert_eq!(config.renderer.clear_color, [0.1, 0.1, 0.11]);
        assert_eq!(config.renderer.primitive, PrimitiveType::Triangles);
        assert_eq!(config.input.move_speed, 0.05);
        assert!(config.assets.flip_texture_y);
    }

    #[test]
    fn partial_sections_keep_their_remaining_defaults() {
        let config: EngineConfig = serde_json::from_str(
            r#"{
                "window": { "width": 1920, "fullscreen": true },
                "renderer": { "primitive": "lines" },
                "assets": { "texture_filter": "pixelated" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.window.height, 720);
        assert!(config.window.fullscreen);
        assert_eq!(config.renderer.primitive, PrimitiveType::Lines);
        assert_eq!(config.assets.texture_filter, TextureFilter::Pixelated);
        assert_eq!(config.assets.texture_format, TextureFormat::Rgba);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = std::env::temp_dir().join("ember3d-config-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = EngineConfig::load(&path).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }
}
