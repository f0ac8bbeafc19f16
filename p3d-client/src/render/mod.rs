//! Module for anything related to rendering.
//!
//! This module contains the pyramid renderer and the shaders it uses.

pub mod pyramid;
