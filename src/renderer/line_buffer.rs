use super::LineSink;
use crate::config::Rgba;

use biome_border_map::glam::Vec3A;
use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: Rgba,
}

/// Collects lines as pairs of vertices, ready to be copied into a GPU vertex buffer.
#[derive(Clone, Debug, Default)]
pub struct LineBuffer {
    vertices: Vec<LineVertex>,
}

impl LineBuffer {
    pub fn vertices(&self) -> &[LineVertex] {
        &self.vertices
    }

    pub fn num_lines(&self) -> usize {
        self.vertices.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Keeps the allocation for the next frame.
    pub fn clear(&mut self) {
        self.vertices.clear();
    }
}

impl LineSink for LineBuffer {
    fn line(&mut self, start: Vec3A, end: Vec3A, color: Rgba) {
        self.vertices.push(LineVertex {
            position: start.to_array(),
            color,
        });
        self.vertices.push(LineVertex {
            position: end.to_array(),
            color,
        });
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
