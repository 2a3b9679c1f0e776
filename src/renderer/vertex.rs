//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    /// Floats per vertex in a flattened buffer
    pub const FLOATS: usize = 6;

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Flatten vertices to `[x, y, r, g, b, a, ...]` for a WebGL or canvas host
pub fn as_floats(vertices: &[Vertex]) -> &[f32] {
    bytemuck::cast_slice(vertices)
}

/// Colors for game elements (wooden board look)
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.824, 0.706, 0.549, 1.0]; // #D2B48C
    pub const WALL: [f32; 4] = [0.365, 0.251, 0.216, 1.0]; // #5D4037
    pub const HOLE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const BALL: [f32; 4] = [0.898, 0.224, 0.208, 1.0]; // #E53935
    pub const END: [f32; 4] = [0.263, 0.627, 0.278, 1.0];
}
