//! Error types for the engine.
//!
//! All fallible operations return [`Result`], an alias over [`EngineError`].
//! Construction-time failures (window init, a second application) are fatal
//! and reported through the logging path by `main`; per-frame failures abort
//! the frame loop.

use thiserror::Error;

use crate::abs::ShaderStage;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors raised by the render-resource and application layers.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The GPU rejected allocation of a buffer, array, texture, program or
    /// framebuffer handle.
    #[error("failed to create GPU resource: {0}")]
    ResourceCreation(String),

    /// An attribute descriptor does not fit inside the vertex stride.
    #[error(
        "attribute {index} ({component_count} components at byte offset {byte_offset}) \
         does not fit in vertex stride {stride}"
    )]
    InvalidAttributeLayout {
        index: u32,
        component_count: i32,
        byte_offset: i32,
        stride: i32,
    },

    /// A shader stage failed to compile; carries the compiler log.
    #[error("{stage} shader compilation failed: {log}")]
    ShaderCompilation { stage: ShaderStage, log: String },

    /// The shader program failed to link; carries the linker log.
    #[error("shader program link failed: {0}")]
    ShaderLink(String),

    /// A uniform name is not active in the linked program.
    #[error("uniform `{0}` does not exist in the linked program")]
    UnknownUniform(String),

    /// A texture image file could not be decoded.
    #[error("failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),

    /// A texture unit outside the GPU's supported range was requested.
    #[error("texture unit {unit} out of range (limit {max})")]
    InvalidTextureUnit { unit: u32, max: u32 },

    /// The framebuffer attachment configuration was rejected by the GPU.
    #[error("framebuffer incomplete: status {0:#x}")]
    FramebufferIncomplete(u32),

    /// Window or GL context initialization failed. Fatal at startup.
    #[error("window initialization failed: {0}")]
    WindowInit(String),

    /// A second `Application` was constructed in the same process.
    #[error("an application instance already exists in this process")]
    ApplicationExists,

    /// A re-upload was attempted on a static-storage buffer.
    #[error("cannot re-upload a static-storage buffer")]
    StaticBufferWrite,

    /// An attribute was pushed before any vertex buffer was linked.
    #[error("vertex array has no linked vertex buffer")]
    MissingVertexBuffer,

    /// An indexed draw was requested from a vertex array without an index
    /// buffer.
    #[error("vertex array has no linked index buffer")]
    MissingIndexBuffer,

    /// The engine configuration file is malformed.
    #[error("invalid engine config: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_layout_error_names_the_offending_descriptor() {
        let err = EngineError::InvalidAttributeLayout {
            index: 2,
            component_count: 4,
            byte_offset: 24,
            stride: 32,
        };
        let message = err.to_string();
        assert!(message.contains("attribute 2"));
        assert!(message.contains("byte offset 24"));
        assert!(message.contains("stride 32"));
    }

    #[test]
    fn unknown_uniform_error_carries_the_name() {
        let err = EngineError::UnknownUniform("u_missing".to_string());
        assert!(err.to_string().contains("u_missing"));
    }
}
