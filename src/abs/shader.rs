//! OpenGL shaders.
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for
//! compiling and linking shader stages, and the [`Uniform`] trait for
//! setting uniform variables. Uniform locations are resolved once per name
//! and cached; a name that is not active in the linked program is an error,
//! never a silent no-op.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use glam::{Mat4, Vec2, Vec3, Vec4};
use glow::HasContext;

use crate::error::{EngineError, Result};

/// Shader pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_type(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// An individual compiled shader stage.
pub struct Shader {
    gl: Arc<glow::Context>,
    id: glow::Shader,
}

impl Shader {
    /// Compiles a shader stage from source.
    pub fn compile(gl: &Arc<glow::Context>, stage: ShaderStage, source: &str) -> Result<Self> {
        unsafe {
            let shader = gl
                .create_shader(stage.gl_type())
                .map_err(EngineError::ResourceCreation)?;
            gl.shader_source(shader, source);
            gl.compile_shader(shader);

            if !gl.get_shader_compile_status(shader) {
                let log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                return Err(EngineError::ShaderCompilation { stage, log });
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: shader,
            })
        }
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_shader(self.id);
        }
    }
}

/// A value that can be written to a resolved uniform location.
pub trait Uniform {
    fn apply(&self, gl: &glow::Context, location: &glow::UniformLocation);
}

impl Uniform for i32 {
    fn apply(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_1_i32(Some(location), *self);
        }
    }
}

impl Uniform for f32 {
    fn apply(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_1_f32(Some(location), *self);
        }
    }
}

impl Uniform for Vec2 {
    fn apply(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_2_f32(Some(location), self.x, self.y);
        }
    }
}

impl Uniform for Vec3 {
    fn apply(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_3_f32(Some(location), self.x, self.y, self.z);
        }
    }
}

impl Uniform for Vec4 {
    fn apply(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_4_f32(Some(location), self.x, self.y, self.z, self.w);
        }
    }
}

impl Uniform for Mat4 {
    fn apply(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_matrix_4_f32_slice(Some(location), false, self.as_ref());
        }
    }
}

impl<T: Uniform> Uniform for &T {
    fn apply(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        (*self).apply(gl, location);
    }
}

/// A linked shader program composed of a vertex and a fragment stage.
pub struct ShaderProgram {
    gl: Arc<glow::Context>,
    id: glow::Program,
    locations: RefCell<HashMap<String, glow::UniformLocation>>,
}

impl ShaderProgram {
    /// Reads, compiles and links the program from a pair of source files.
    pub fn from_files(gl: &Arc<glow::Context>, vert_path: &Path, frag_path: &Path) -> Result<Self> {
        let vert_source = std::fs::read_to_string(vert_path)?;
        let frag_source = std::fs::read_to_string(frag_path)?;
        Self::from_sources(gl, &vert_source, &frag_source)
    }

    /// Compiles and links the program from in-memory sources.
    pub fn from_sources(
        gl: &Arc<glow::Context>,
        vert_source: &str,
        frag_source: &str,
    ) -> Result<Self> {
        let vert = Shader::compile(gl, ShaderStage::Vertex, vert_source)?;
        let frag = Shader::compile(gl, ShaderStage::Fragment, frag_source)?;
        Self::link(gl, &[&vert, &frag])
    }

    fn link(gl: &Arc<glow::Context>, shaders: &[&Shader]) -> Result<Self> {
        unsafe {
            let program = gl.create_program().map_err(EngineError::ResourceCreation)?;

            for shader in shaders {
                gl.attach_shader(program, shader.id);
            }

            gl.link_program(program);

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(EngineError::ShaderLink(log));
            }

            for shader in shaders {
                gl.detach_shader(program, shader.id);
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: program,
                locations: RefCell::new(HashMap::new()),
            })
        }
    }

    /// Binds the program for use.
    pub fn use_program(&self) {
        unsafe {
            self.gl.use_program(Some(self.id));
        }
    }

    /// Sets a uniform variable, resolving and caching its location on first
    /// use. The program must be bound.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) -> Result<()> {
        let location = self.location(name)?;
        value.apply(&self.gl, &location);
        Ok(())
    }

    fn location(&self, name: &str) -> Result<glow::UniformLocation> {
        if let Some(location) = self.locations.borrow().get(name) {
            return Ok(location.clone());
        }
        let location = unsafe { self.gl.get_uniform_location(self.id, name) }
            .ok_or_else(|| EngineError::UnknownUniform(name.to_string()))?;
        self.locations
            .borrow_mut()
            .insert(name.to_string(), location.clone());
        Ok(location)
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.id);
        }
    }
}
