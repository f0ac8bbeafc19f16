//! The scalars that change every frame.

use crate::config::AnimationConfig;

/// Mutable animation state, advanced once per rendered frame.
///
/// Steps are fixed per frame and not scaled by elapsed time, so the
/// animation speed follows the frame rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    config: AnimationConfig,
    tri_offset: f32,
    forward: bool,
    cur_angle: f32,
    scale: f32,
}

impl AnimationState {
    /// Creates a state at rest: zero offset moving forward, zero angle and scale.
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            tri_offset: 0.0,
            forward: true,
            cur_angle: 0.0,
            scale: 0.0,
        }
    }

    /// Starts from the given rotation angle in degrees, wrapped into `[0, 360)`.
    #[cfg(test)]
    fn with_angle(mut self, degrees: f32) -> Self {
        self.cur_angle = degrees.rem_euclid(360.0);
        self
    }

    /// Advances every scalar by one frame.
    pub fn advance(&mut self) {
        self.advance_offset();
        self.advance_angle();
        self.advance_scale();
    }

    // Triangle wave: turn around once the magnitude reaches the bound.
    fn advance_offset(&mut self) {
        if self.forward {
            self.tri_offset += self.config.increment;
        } else {
            self.tri_offset -= self.config.increment;
        }

        if self.tri_offset.abs() >= self.config.max_offset {
            self.forward = !self.forward;
        }
    }

    fn advance_angle(&mut self) {
        self.cur_angle += self.config.angle_step;
        if self.cur_angle >= 360.0 {
            self.cur_angle -= 360.0;
        }
    }

    // Saw-tooth clamp: step back once instead of bouncing.
    fn advance_scale(&mut self) {
        self.scale += self.config.increment;
        if self.scale.abs() >= 1.0 {
            self.scale -= self.config.increment;
        }
    }

    /// Current offset, bounded by the configured maximum.
    pub fn tri_offset(&self) -> f32 {
        self.tri_offset
    }

    /// Whether the offset is currently increasing.
    pub fn moving_forward(&self) -> bool {
        self.forward
    }

    /// Current rotation angle in degrees, always in `[0, 360)`.
    pub fn cur_angle(&self) -> f32 {
        self.cur_angle
    }

    /// Current scale. Tracked but not applied to the model transform.
    pub fn scale(&self) -> f32 {
        self.scale
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new(AnimationConfig::default())
    }
}
