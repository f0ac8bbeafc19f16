//! Model and projection matrices.

use glam::{Mat4, Vec3};

use crate::config::ProjectionConfig;

/// Builds the model transform: translate, then rotate `angle_degrees` about `axis`.
///
/// The axis does not need to be normalized. A zero axis means no rotation.
pub fn model_matrix(translation: Vec3, axis: Vec3, angle_degrees: f32) -> Mat4 {
    let rotation = match axis.try_normalize() {
        Some(axis) => Mat4::from_axis_angle(axis, angle_degrees.to_radians()),
        None => Mat4::IDENTITY,
    };
    Mat4::from_translation(translation) * rotation
}

/// Builds a right-handed GL perspective projection for the given framebuffer size.
pub fn projection_matrix(config: &ProjectionConfig, width: u32, height: u32) -> Mat4 {
    let aspect = width as f32 / height.max(1) as f32;
    Mat4::perspective_rh_gl(config.fov_y, aspect, config.near, config.far)
}
