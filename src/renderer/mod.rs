//! Renderer-agnostic scene output
//!
//! The host owns the drawing surface; this module only turns a session into
//! colored triangles (for a canvas or WebGL page) or text (for a terminal).

pub mod ascii;
pub mod shapes;
pub mod vertex;

pub use shapes::scene;
pub use vertex::{Vertex, as_floats};
