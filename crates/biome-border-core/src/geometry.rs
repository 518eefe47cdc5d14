use crate::glam::Vec3A;

/// A straight line between two points in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LineSegment {
    pub start: Vec3A,
    pub end: Vec3A,
}

impl LineSegment {
    pub fn new(start: Vec3A, end: Vec3A) -> Self {
        Self { start, end }
    }

    /// The segment starting at `start` and extending by `direction`.
    pub fn from_start_and_direction(start: Vec3A, direction: Vec3A) -> Self {
        Self::new(start, start + direction)
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
