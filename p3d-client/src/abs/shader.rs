//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for managing OpenGL shaders.
//! This module also provides the [`Uniform`] trait for uploading values to uniform locations
//! resolved once after linking.

use std::{fmt, sync::Arc};

use glam::Mat4;
use glow::HasContext;

/// The pipeline stage a shader is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Shader build failures. Each variant carries the driver's info log.
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("failed to create {0}: {1}")]
    Create(&'static str, String),
    #[error("error compiling {stage} shader: {log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("error linking program: {log}")]
    Link { log: String },
    #[error("error validating program: {log}")]
    Validate { log: String },
    #[error("uniform `{0}` not found in program")]
    MissingUniform(String),
}

/// Represents an individual OpenGL shader.
pub struct Shader {
    gl: Arc<glow::Context>,
    id: glow::Shader,
    stage: ShaderStage,
}

impl Shader {
    /// Compiles a new shader from the given source code.
    pub fn new(gl: &Arc<glow::Context>, stage: ShaderStage, source: &str) -> Result<Self, ShaderError> {
        unsafe {
            let shader = gl
                .create_shader(stage.gl_enum())
                .map_err(|e| ShaderError::Create("shader", e))?;
            gl.shader_source(shader, source);
            gl.compile_shader(shader);

            if !gl.get_shader_compile_status(shader) {
                let log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                return Err(ShaderError::Compile { stage, log });
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: shader,
                stage,
            })
        }
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_shader(self.id);
        }
    }
}

/// A value that can be uploaded to a uniform location of the bound program.
pub trait Uniform {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation);
}

impl Uniform for Mat4 {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe {
            gl.uniform_matrix_4_f32_slice(Some(location), false, self.as_ref());
        }
    }
}

impl<T: Uniform> Uniform for &T {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        (*self).set_uniform(gl, location);
    }
}

/// Represents an OpenGL shader program composed of multiple shaders.
pub struct ShaderProgram {
    gl: Arc<glow::Context>,
    id: glow::Program,
}

impl ShaderProgram {
    /// Links a new shader program from the given shaders.
    pub fn new(gl: &Arc<glow::Context>, shaders: &[&Shader]) -> Result<Self, ShaderError> {
        unsafe {
            let program = gl
                .create_program()
                .map_err(|e| ShaderError::Create("shader program", e))?;

            for shader in shaders {
                gl.attach_shader(program, shader.id);
            }

            gl.link_program(program);

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(ShaderError::Link { log });
            }

            for shader in shaders {
                gl.detach_shader(program, shader.id);
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: program,
            })
        }
    }

    /// Checks that the program can run in the current GL state.
    ///
    /// Core profiles need a vertex array bound for this to pass.
    pub fn validate(&self) -> Result<(), ShaderError> {
        unsafe {
            self.gl.validate_program(self.id);
            if !self.gl.get_program_validate_status(self.id) {
                return Err(ShaderError::Validate {
                    log: self.gl.get_program_info_log(self.id),
                });
            }
        }
        Ok(())
    }

    /// Looks up a uniform by name.
    pub fn uniform_location(&self, name: &str) -> Result<glow::UniformLocation, ShaderError> {
        unsafe { self.gl.get_uniform_location(self.id, name) }
            .ok_or_else(|| ShaderError::MissingUniform(name.to_string()))
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        unsafe {
            self.gl.use_program(Some(self.id));
        }
    }

    /// Unbinds any program.
    pub fn unuse(&self) {
        unsafe {
            self.gl.use_program(None);
        }
    }

    /// Sets a uniform of this program, which must be in use.
    pub fn set_uniform<T: Uniform>(&self, location: &glow::UniformLocation, value: T) {
        value.set_uniform(&self.gl, location);
    }
}

#[cfg(test)]
impl ShaderProgram {
    pub(crate) fn raw_id(&self) -> glow::Program {
        self.id
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use p3d_core::config::WindowConfig;

    use super::*;
    use crate::abs::{App, Mesh, PositionVertex};

    fn test_app() -> App {
        App::new(&WindowConfig {
            title: "shader test".to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_shader_error_messages() {
        let err = ShaderError::Compile {
            stage: ShaderStage::Fragment,
            log: "0:3: syntax error".to_string(),
        };
        assert_eq!(err.to_string(), "error compiling fragment shader: 0:3: syntax error");
        assert_eq!(
            ShaderError::MissingUniform("model".to_string()).to_string(),
            "uniform `model` not found in program"
        );
    }

    #[test]
    #[ignore = "needs a display with OpenGL 4.1"]
    fn test_invalid_glsl_reports_log() {
        let app = test_app();
        let err = Shader::new(
            &app.gl,
            ShaderStage::Vertex,
            "#version 330 core\nvoid main() { gl_Position = nope; }\n",
        )
        .err()
        .unwrap();
        match err {
            ShaderError::Compile { stage, log } => {
                assert_eq!(stage, ShaderStage::Vertex);
                assert!(!log.trim().is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    #[ignore = "needs a display with OpenGL 4.1"]
    fn test_pyramid_program_links_and_validates() {
        let app = test_app();
        let vert = Shader::new(&app.gl, ShaderStage::Vertex, crate::render::pyramid::VERTEX_SHADER).unwrap();
        let frag = Shader::new(&app.gl, ShaderStage::Fragment, crate::render::pyramid::FRAGMENT_SHADER).unwrap();
        let program = ShaderProgram::new(&app.gl, &[&vert, &frag]).unwrap();

        let vertices = [PositionVertex::new([0.0, 0.0, 0.0])];
        let mesh = Mesh::new(&app.gl, &vertices, &[0], glow::TRIANGLES).unwrap();
        mesh.bind();
        program.validate().unwrap();
        mesh.unbind();

        assert!(program.uniform_location("model").is_ok());
        assert!(program.uniform_location("projection").is_ok());
        assert!(matches!(
            program.uniform_location("view"),
            Err(ShaderError::MissingUniform(_))
        ));
    }

    #[test]
    #[ignore = "needs a display with OpenGL 4.1"]
    fn test_drop_releases_gl_objects() {
        let app = test_app();
        let vert = Shader::new(&app.gl, ShaderStage::Vertex, crate::render::pyramid::VERTEX_SHADER).unwrap();
        let frag = Shader::new(&app.gl, ShaderStage::Fragment, crate::render::pyramid::FRAGMENT_SHADER).unwrap();
        let program = ShaderProgram::new(&app.gl, &[&vert, &frag]).unwrap();
        let vertices = [PositionVertex::new([0.0, 0.0, 0.0])];
        let mesh = Mesh::new(&app.gl, &vertices, &[0], glow::TRIANGLES).unwrap();

        let program_id = program.raw_id();
        let (_, vbo, ebo) = mesh.raw_ids();
        unsafe {
            assert!(app.gl.is_program(program_id));
            assert!(app.gl.is_buffer(vbo));
            assert!(app.gl.is_buffer(ebo));
        }

        drop(mesh);
        drop(program);

        unsafe {
            assert!(!app.gl.is_program(program_id));
            assert!(!app.gl.is_buffer(vbo));
            assert!(!app.gl.is_buffer(ebo));
        }
    }
}
