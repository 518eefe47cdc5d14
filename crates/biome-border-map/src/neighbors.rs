use crate::glam::IVec3;
use crate::section_key::SectionKey;
use crate::world::GenerationStatus;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::RangeInclusive;

/// The inclusive range of valid vertical section indices in a world.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SectionRange {
    pub min_y: i32,
    pub max_y: i32,
}

impl Default for SectionRange {
    fn default() -> Self {
        Self { min_y: 0, max_y: 15 }
    }
}

impl SectionRange {
    pub fn new(min_y: i32, max_y: i32) -> Self {
        Self { min_y, max_y }
    }

    pub fn contains_y(&self, y: i32) -> bool {
        self.min_y <= y && y <= self.max_y
    }

    pub fn contains(&self, key: SectionKey) -> bool {
        self.contains_y(key.y)
    }

    pub fn iter_y(&self) -> RangeInclusive<i32> {
        self.min_y..=self.max_y
    }
}

/// Ring of horizontal neighbors, including diagonals.
const HORIZONTAL_OFFSETS: [IVec3; 8] = [
    IVec3::new(-1, 0, -1),
    IVec3::new(0, 0, -1),
    IVec3::new(1, 0, -1),
    IVec3::new(-1, 0, 0),
    IVec3::new(1, 0, 0),
    IVec3::new(-1, 0, 1),
    IVec3::new(0, 0, 1),
    IVec3::new(1, 0, 1),
];

pub type Neighbors = SmallVec<[SectionKey; 10]>;

/// The sections whose biomes can influence the borders drawn on `key`.
///
/// All 8 horizontal neighbors are always included. The sections directly above and below are only included while they are
/// inside `range`, so sections at the top and bottom of the world never wait on a neighbor that can't exist.
pub fn neighbor_sections(key: SectionKey, range: SectionRange) -> Neighbors {
    let mut neighbors: Neighbors = HORIZONTAL_OFFSETS
        .iter()
        .map(|&offset| key.offset(offset))
        .collect();
    for dy in [-1, 1] {
        if range.contains_y(key.y + dy) {
            neighbors.push(key.with_y(key.y + dy));
        }
    }
    neighbors
}

/// True iff `key` and all of its [`neighbor_sections`] are loaded and fully generated.
///
/// Being loaded is not enough: a section whose terrain is still generating would be sampled for biomes that can change.
pub fn is_ready_for_calculation(
    key: SectionKey,
    range: SectionRange,
    is_loaded: impl Fn(SectionKey) -> bool,
    generation_status: impl Fn(SectionKey) -> Option<GenerationStatus>,
) -> bool {
    let is_complete =
        |k: SectionKey| is_loaded(k) && generation_status(k).map_or(false, GenerationStatus::is_complete);

    is_complete(key) && neighbor_sections(key, range).into_iter().all(is_complete)
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
