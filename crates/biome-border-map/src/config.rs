use crate::neighbors::SectionRange;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// The number of worker threads calculating borders. Read once, when the worker pool is created.
    pub calculation_threads: usize,
    /// Valid vertical section indices of the world.
    pub section_range: SectionRange,
    /// Edge length in voxels of the square patches sampled along each section face.
    pub sample_stride: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            calculation_threads: 2,
            section_range: SectionRange::default(),
            sample_stride: 4,
        }
    }
}

impl CacheConfig {
    pub fn calculation_threads(&self) -> usize {
        self.calculation_threads.max(1)
    }

    /// The stride must evenly divide a section edge, so it is rounded up to a power of two no greater than 16.
    pub fn sample_stride(&self) -> i32 {
        self.sample_stride.clamp(1, 16).next_power_of_two() as i32
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
