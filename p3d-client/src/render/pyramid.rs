//! Draws the pyramid.
//!
//! [`PyramidRenderer`] owns every GL object the demo creates: the mesh
//! (vertex array, vertex buffer, index buffer) and the shader program with
//! its two cached uniform locations. [`DemoWindow`] pairs it with the
//! [`App`] so the core frame loop can drive both.

use std::{convert::Infallible, sync::Arc};

use glam::Vec4;
use glow::HasContext;
use p3d_core::{
    FrameTarget, FrameUniforms, LoopControl,
    config::SceneConfig,
    geometry::{OVERLAY_VERTEX_COUNT, PYRAMID_INDICES, PYRAMID_VERTICES},
};

use crate::abs::{App, Mesh, MeshError, PositionVertex, Shader, ShaderError, ShaderProgram, ShaderStage};

pub const VERTEX_SHADER: &str = include_str!("shaders/pyramid/vert.glsl");
pub const FRAGMENT_SHADER: &str = include_str!("shaders/pyramid/frag.glsl");

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Shader(#[from] ShaderError),
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// The pyramid mesh, its shader program and fixed per-frame GL state.
pub struct PyramidRenderer {
    gl: Arc<glow::Context>,
    mesh: Mesh,
    program: ShaderProgram,
    model_location: glow::UniformLocation,
    projection_location: glow::UniformLocation,
    viewport: (i32, i32),
    clear_color: Vec4,
    overlay_draw: bool,
}

impl PyramidRenderer {
    /// Uploads the pyramid and builds its shader program.
    ///
    /// Fails if either shader does not compile or the program does not link
    /// or validate. Nothing created so far is leaked on failure.
    pub fn new(
        gl: &Arc<glow::Context>,
        scene: &SceneConfig,
        framebuffer_size: (u32, u32),
    ) -> Result<Self, RenderError> {
        let vertices: Vec<PositionVertex> = PYRAMID_VERTICES
            .iter()
            .copied()
            .map(PositionVertex::new)
            .collect();
        let mesh = Mesh::new(gl, &vertices, &PYRAMID_INDICES, glow::TRIANGLES)?;
        log::debug!(
            "Uploaded pyramid: {} vertices, {} indices",
            vertices.len(),
            mesh.index_count()
        );

        let program = {
            let vert = Shader::new(gl, ShaderStage::Vertex, VERTEX_SHADER)?;
            let frag = Shader::new(gl, ShaderStage::Fragment, FRAGMENT_SHADER)?;
            log::debug!("Compiled {} and {} shaders", vert.stage(), frag.stage());
            ShaderProgram::new(gl, &[&vert, &frag])?
        };

        mesh.bind();
        let validated = program.validate();
        mesh.unbind();
        validated?;

        let model_location = program.uniform_location("model")?;
        let projection_location = program.uniform_location("projection")?;

        unsafe {
            gl.enable(glow::DEPTH_TEST);
        }

        Ok(Self {
            gl: Arc::clone(gl),
            mesh,
            program,
            model_location,
            projection_location,
            viewport: (framebuffer_size.0 as i32, framebuffer_size.1 as i32),
            clear_color: scene.clear_color,
            overlay_draw: scene.overlay_draw,
        })
    }

    /// Clears the framebuffer and draws one frame with the given matrices.
    pub fn draw(&self, uniforms: &FrameUniforms) {
        unsafe {
            self.gl.viewport(0, 0, self.viewport.0, self.viewport.1);
            self.gl.clear_color(
                self.clear_color.x,
                self.clear_color.y,
                self.clear_color.z,
                self.clear_color.w,
            );
            self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        self.program.use_program();
        self.program.set_uniform(&self.model_location, uniforms.model);
        self.program
            .set_uniform(&self.projection_location, uniforms.projection);

        self.mesh.draw();
        if self.overlay_draw {
            self.mesh.draw_prefix(OVERLAY_VERTEX_COUNT);
        }

        self.program.unuse();
    }
}

/// The window and the renderer together, as seen by the frame loop.
pub struct DemoWindow<'a> {
    app: &'a mut App,
    renderer: &'a PyramidRenderer,
}

impl<'a> DemoWindow<'a> {
    pub fn new(app: &'a mut App, renderer: &'a PyramidRenderer) -> Self {
        Self { app, renderer }
    }
}

impl FrameTarget for DemoWindow<'_> {
    type Error = Infallible;

    fn poll_events(&mut self) -> LoopControl {
        let mut control = LoopControl::Continue;
        for event in self.app.event_pump.poll_iter() {
            if let sdl2::event::Event::Quit { .. } = event {
                control = LoopControl::Close;
            }
        }
        control
    }

    fn render(&mut self, uniforms: &FrameUniforms) -> Result<(), Infallible> {
        self.renderer.draw(uniforms);
        Ok(())
    }

    fn present(&mut self) {
        self.app.window.gl_swap_window();
    }
}
