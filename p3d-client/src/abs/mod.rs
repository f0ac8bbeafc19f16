//! Thin owners around SDL2 and OpenGL objects: the window and context,
//! shaders and programs, and meshes. Each releases its GL objects on drop.

pub mod app;
pub mod mesh;
pub mod shader;

pub use app::*;
pub use mesh::*;
pub use shader::*;
