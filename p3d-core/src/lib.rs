//! The core of the Pyramid3D demo. This crate holds everything that does not
//! need a window or a GL context: configuration defaults, the pyramid mesh
//! data, the animation state, transform math and the frame loop driver.

pub mod animation;
pub mod config;
pub mod frame_loop;
pub mod geometry;
pub mod transform;

pub use animation::AnimationState;
pub use config::DemoConfig;
pub use frame_loop::{FrameLoop, FrameStats, FrameTarget, FrameUniforms, LoopControl};
