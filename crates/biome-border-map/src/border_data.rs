use crate::core::geometry::LineSegment;
use crate::world::BorderKind;

/// The finished border geometry of one section, split by [`BorderKind`].
///
/// Immutable once built, so a published value can be read from any thread without synchronization.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectionBorderData {
    similar: Vec<LineSegment>,
    dissimilar: Vec<LineSegment>,
}

impl SectionBorderData {
    pub fn new(similar: Vec<LineSegment>, dissimilar: Vec<LineSegment>) -> Self {
        Self {
            similar,
            dissimilar,
        }
    }

    pub fn builder() -> SectionBorderDataBuilder {
        SectionBorderDataBuilder::default()
    }

    pub fn similar(&self) -> &[LineSegment] {
        &self.similar
    }

    pub fn dissimilar(&self) -> &[LineSegment] {
        &self.dissimilar
    }

    pub fn segments(&self, kind: BorderKind) -> &[LineSegment] {
        match kind {
            BorderKind::Similar => &self.similar,
            BorderKind::Dissimilar => &self.dissimilar,
        }
    }

    pub fn num_segments(&self) -> usize {
        self.similar.len() + self.dissimilar.len()
    }

    pub fn is_empty(&self) -> bool {
        self.num_segments() == 0
    }
}

#[derive(Default)]
pub struct SectionBorderDataBuilder {
    data: SectionBorderData,
}

impl SectionBorderDataBuilder {
    pub fn push(&mut self, kind: BorderKind, segment: LineSegment) {
        match kind {
            BorderKind::Similar => self.data.similar.push(segment),
            BorderKind::Dissimilar => self.data.dissimilar.push(segment),
        }
    }

    pub fn build(self) -> SectionBorderData {
        self.data
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
