//! Compiled-in configuration for the demo.
//!
//! There are no config files or command line flags. Every value the demo
//! uses lives here and is passed down explicitly from `main`.

use glam::{Vec3, Vec4};

/// Window and GL context parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub gl_major: u8,
    pub gl_minor: u8,
    pub msaa_samples: u8,
    pub depth_bits: u8,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "OpenGL Window".to_string(),
            width: 800,
            height: 600,
            gl_major: 4,
            gl_minor: 1,
            msaa_samples: 8,
            depth_bits: 24,
        }
    }
}

/// Per-frame steps of the animation scalars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationConfig {
    /// Step applied to both the offset and the scale every frame.
    pub increment: f32,
    /// The offset turns around once its magnitude reaches this value.
    pub max_offset: f32,
    /// Degrees added to the rotation angle every frame.
    pub angle_step: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            increment: 0.05,
            max_offset: 0.7,
            angle_step: 0.005,
        }
    }
}

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionConfig {
    /// Vertical field of view in radians, passed to the projection as-is.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_y: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Where the pyramid sits and how each frame is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    pub translation: Vec3,
    pub rotation_axis: Vec3,
    pub clear_color: Vec4,
    /// Also draw the first three vertices as a plain non-indexed triangle
    /// after the indexed pyramid.
    pub overlay_draw: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            translation: Vec3::new(0.25, 0.0, -2.5),
            rotation_axis: Vec3::ONE,
            clear_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            overlay_draw: true,
        }
    }
}

/// All configuration of the demo.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub animation: AnimationConfig,
    pub projection: ProjectionConfig,
    pub scene: SceneConfig,
}
