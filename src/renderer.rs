mod line_buffer;
mod visible_sections;

pub use line_buffer::*;
pub use visible_sections::*;

use crate::config::{BorderColors, Rgba};

use biome_border_map::glam::Vec3A;
use biome_border_map::{BorderKind, SectionBorderData};

/// Something that can draw colored line segments, like a debug line renderer.
pub trait LineSink {
    fn line(&mut self, start: Vec3A, end: Vec3A, color: Rgba);
}

/// Draws every segment in `data`, colored by border kind. Returns the number of lines drawn.
pub fn draw_section_borders(
    data: &SectionBorderData,
    colors: &BorderColors,
    sink: &mut impl LineSink,
) -> usize {
    let mut num_lines = 0;
    for kind in [BorderKind::Similar, BorderKind::Dissimilar] {
        let color = colors.color(kind);
        for segment in data.segments(kind) {
            sink.line(segment.start, segment.end, color);
            num_lines += 1;
        }
    }
    num_lines
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
