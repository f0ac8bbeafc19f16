//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2
//! and OpenGL context necessary for creating a windowed application.

use std::sync::Arc;

use glow::HasContext;
use p3d_core::config::WindowConfig;

/// Oldest context the pyramid shaders (`#version 330 core`) can run on.
const MIN_GL_VERSION: (u32, u32) = (3, 3);

/// Failures while bringing up the window and GL context.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to initialize SDL: {0}")]
    Sdl(String),
    #[error("failed to create window: {0}")]
    Window(#[from] sdl2::video::WindowBuildError),
    #[error("failed to create OpenGL context: {0}")]
    Context(String),
    #[error("failed to load OpenGL functions: {0}")]
    Loader(String),
}

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
///
/// Field order is drop order: the GL function table goes before the context
/// it was loaded from, and the context before its window.
pub struct App {
    pub gl: Arc<glow::Context>,
    pub event_pump: sdl2::EventPump,
    pub gl_context: sdl2::video::GLContext,
    pub window: sdl2::video::Window,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub sdl: sdl2::Sdl,
}

impl App {
    /// Opens a window with a core-profile, forward-compatible, multisampled
    /// GL context as described by `config` and makes it current.
    pub fn new(config: &WindowConfig) -> Result<Self, AppError> {
        let sdl = sdl2::init().map_err(AppError::Sdl)?;
        let video_subsystem = sdl.video().map_err(AppError::Sdl)?;

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(config.gl_major, config.gl_minor);
        gl_attr.set_context_flags().forward_compatible().set();
        gl_attr.set_double_buffer(true);
        gl_attr.set_depth_size(config.depth_bits);
        if config.msaa_samples > 0 {
            gl_attr.set_multisample_buffers(1);
            gl_attr.set_multisample_samples(config.msaa_samples);
        }

        let window = video_subsystem
            .window(&config.title, config.width, config.height)
            .opengl()
            .position_centered()
            .build()?;

        let gl_context = window.gl_create_context().map_err(AppError::Context)?;
        window
            .gl_make_current(&gl_context)
            .map_err(AppError::Context)?;

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };

        let version = gl.version();
        if (version.major, version.minor) < MIN_GL_VERSION {
            return Err(AppError::Loader(format!(
                "OpenGL {}.{} is too old, need at least {}.{}",
                version.major, version.minor, MIN_GL_VERSION.0, MIN_GL_VERSION.1
            )));
        }
        log::info!(
            "OpenGL {}.{} ({}) on {}",
            version.major,
            version.minor,
            version.vendor_info,
            unsafe { gl.get_parameter_string(glow::RENDERER) }
        );

        let event_pump = sdl.event_pump().map_err(AppError::Sdl)?;

        Ok(Self {
            gl: Arc::new(gl),
            event_pump,
            gl_context,
            window,
            video_subsystem,
            sdl,
        })
    }

    /// Size of the drawable framebuffer in pixels, which may differ from the
    /// window size on high-DPI displays.
    pub fn drawable_size(&self) -> (u32, u32) {
        self.window.drawable_size()
    }
}
