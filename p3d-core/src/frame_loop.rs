//! The per-frame driver.
//!
//! [`FrameLoop`] owns the animation state and the transforms and drives any
//! [`FrameTarget`]: something that can poll for a close request, draw one
//! frame with a pair of matrices, and present it. The client implements
//! [`FrameTarget`] on top of SDL2 and OpenGL; tests use a scripted target.

use std::time::{Duration, Instant};

use glam::Mat4;

use crate::{
    animation::AnimationState,
    config::{DemoConfig, SceneConfig},
    transform,
};

/// Whether the loop should keep going after polling events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Close,
}

/// The uniform values uploaded for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub model: Mat4,
    pub projection: Mat4,
}

/// Anything the frame loop can render into.
pub trait FrameTarget {
    type Error;

    /// Drains pending events without blocking.
    fn poll_events(&mut self) -> LoopControl;

    /// Draws one frame.
    fn render(&mut self, uniforms: &FrameUniforms) -> Result<(), Self::Error>;

    /// Shows the finished frame.
    fn present(&mut self);
}

/// Summary of a finished run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub frames: u64,
    pub elapsed: Duration,
}

impl FrameStats {
    /// Average frames per second over the run, zero for an empty run.
    pub fn average_fps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if self.frames == 0 || secs <= 0.0 {
            0.0
        } else {
            self.frames as f64 / secs
        }
    }
}

/// Frames between periodic debug reports of the animation state.
const REPORT_INTERVAL: u64 = 600;

/// Owns everything that changes or is derived per frame.
pub struct FrameLoop {
    animation: AnimationState,
    scene: SceneConfig,
    projection: Mat4,
}

impl FrameLoop {
    /// Creates a loop for a framebuffer of the given size.
    pub fn new(config: &DemoConfig, framebuffer_width: u32, framebuffer_height: u32) -> Self {
        Self {
            animation: AnimationState::new(config.animation),
            scene: config.scene,
            projection: transform::projection_matrix(
                &config.projection,
                framebuffer_width,
                framebuffer_height,
            ),
        }
    }

    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    /// Uniforms for the current animation state.
    pub fn uniforms(&self) -> FrameUniforms {
        FrameUniforms {
            model: transform::model_matrix(
                self.scene.translation,
                self.scene.rotation_axis,
                self.animation.cur_angle(),
            ),
            projection: self.projection,
        }
    }

    /// Advances the animation by one frame and returns the uniforms to draw with.
    pub fn step(&mut self) -> FrameUniforms {
        self.animation.advance();
        self.uniforms()
    }

    /// Runs until the target reports a close request or fails to render.
    ///
    /// Events are polled at the top of every iteration; once a close request
    /// is seen no further frame is drawn.
    pub fn run<T: FrameTarget>(&mut self, target: &mut T) -> Result<FrameStats, T::Error> {
        let start = Instant::now();
        let mut frames = 0u64;

        loop {
            if target.poll_events() == LoopControl::Close {
                log::info!("Close requested after {frames} frames");
                break;
            }

            let uniforms = self.step();
            target.render(&uniforms)?;
            target.present();
            frames += 1;

            if frames % REPORT_INTERVAL == 0 {
                log::debug!(
                    "frame {frames}: offset {:.3}, angle {:.3}, scale {:.3}",
                    self.animation.tri_offset(),
                    self.animation.cur_angle(),
                    self.animation.scale()
                );
            }
        }

        Ok(FrameStats {
            frames,
            elapsed: start.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use glam::Vec3;

    use super::*;

    /// Replays a fixed sequence of poll results and records what was drawn.
    #[derive(Default)]
    struct ScriptedTarget {
        polls: VecDeque<LoopControl>,
        rendered: Vec<FrameUniforms>,
        presented: usize,
        fail_at: Option<usize>,
    }

    impl ScriptedTarget {
        fn closing_after(frames: usize) -> Self {
            let mut polls: VecDeque<_> = std::iter::repeat_n(LoopControl::Continue, frames).collect();
            polls.push_back(LoopControl::Close);
            Self {
                polls,
                ..Default::default()
            }
        }
    }

    impl FrameTarget for ScriptedTarget {
        type Error = String;

        fn poll_events(&mut self) -> LoopControl {
            self.polls.pop_front().unwrap_or(LoopControl::Close)
        }

        fn render(&mut self, uniforms: &FrameUniforms) -> Result<(), String> {
            if self.fail_at == Some(self.rendered.len()) {
                return Err("render failed".to_string());
            }
            self.rendered.push(*uniforms);
            Ok(())
        }

        fn present(&mut self) {
            self.presented += 1;
        }
    }

    #[test]
    fn test_runs_exactly_n_frames() {
        for n in [0, 1, 7, 250] {
            let mut target = ScriptedTarget::closing_after(n);
            let mut frame_loop = FrameLoop::new(&DemoConfig::default(), 800, 600);
            let stats = frame_loop.run(&mut target).unwrap();

            assert_eq!(stats.frames, n as u64);
            assert_eq!(target.rendered.len(), n);
            assert_eq!(target.presented, n);
            // The close request is the last poll consumed.
            assert!(target.polls.is_empty());
        }
    }

    #[test]
    fn test_first_frame_uses_advanced_angle() {
        let config = DemoConfig::default();
        let mut target = ScriptedTarget::closing_after(1);
        FrameLoop::new(&config, 800, 600).run(&mut target).unwrap();

        let expected = transform::model_matrix(config.scene.translation, Vec3::ONE, 0.005);
        assert!(target.rendered[0].model.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn test_uniforms_before_any_frame_are_translation_only() {
        let frame_loop = FrameLoop::new(&DemoConfig::default(), 800, 600);
        let uniforms = frame_loop.uniforms();
        let expected = Mat4::from_translation(Vec3::new(0.25, 0.0, -2.5));
        assert!(uniforms.model.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn test_projection_is_constant_across_frames() {
        let mut target = ScriptedTarget::closing_after(5);
        FrameLoop::new(&DemoConfig::default(), 1024, 768)
            .run(&mut target)
            .unwrap();
        let first = target.rendered[0].projection;
        assert!(target.rendered.iter().all(|u| u.projection == first));
    }

    #[test]
    fn test_render_error_stops_the_loop() {
        let mut target = ScriptedTarget::closing_after(10);
        target.fail_at = Some(3);
        let mut frame_loop = FrameLoop::new(&DemoConfig::default(), 800, 600);

        assert_eq!(frame_loop.run(&mut target), Err("render failed".to_string()));
        assert_eq!(target.rendered.len(), 3);
        assert_eq!(target.presented, 3);
    }

    #[test]
    fn test_animation_advances_once_per_frame() {
        let mut target = ScriptedTarget::closing_after(14);
        let mut frame_loop = FrameLoop::new(&DemoConfig::default(), 800, 600);
        frame_loop.run(&mut target).unwrap();

        let mut expected = AnimationState::default();
        for _ in 0..14 {
            expected.advance();
        }
        assert_eq!(*frame_loop.animation(), expected);
        assert!(!frame_loop.animation().moving_forward());
    }

    #[test]
    fn test_average_fps() {
        let stats = FrameStats {
            frames: 120,
            elapsed: Duration::from_secs(2),
        };
        assert!((stats.average_fps() - 60.0).abs() < 1e-9);
        let empty = FrameStats {
            frames: 0,
            elapsed: Duration::ZERO,
        };
        assert_eq!(empty.average_fps(), 0.0);
    }
}
