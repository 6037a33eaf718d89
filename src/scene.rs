//! The scene owned by the application.
//!
//! Holds the transform of the demo quad that window input mutates. There
//! are no scene-graph semantics here; this struct is the extension point
//! for them.

use glam::Mat4;

pub struct Scene {
    pub model: Mat4,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            model: Mat4::IDENTITY,
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
