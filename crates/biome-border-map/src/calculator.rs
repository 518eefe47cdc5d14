use crate::border_data::{SectionBorderData, SectionBorderDataBuilder};
use crate::coordinates::{section_min, Face, SECTION_EDGE_LENGTH};
use crate::core::geometry::LineSegment;
use crate::glam::IVec3;
use crate::neighbors::SectionRange;
use crate::section_key::SectionKey;
use crate::units::VoxelUnits;
use crate::world::BiomeSource;

use itertools::iproduct;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Computes the border geometry of single sections by sampling biomes across each face.
///
/// Every face is divided into square patches of `sample_stride` voxels. For each patch, the voxel just inside the section is
/// compared to its mirror just outside, and the world's [`BiomeSource::border_kind`] decides which set (if any) gets a segment.
/// The segment lies on the face plane, crossing the patch along the face's first tangent axis.
pub struct SectionBorderCalculator<W> {
    world: Arc<W>,
    range: SectionRange,
    sample_stride: i32,
}

impl<W: BiomeSource> SectionBorderCalculator<W> {
    pub fn new(world: Arc<W>, range: SectionRange, sample_stride: i32) -> Self {
        debug_assert!(sample_stride > 0 && SECTION_EDGE_LENGTH % sample_stride == 0);
        Self {
            world,
            range,
            sample_stride,
        }
    }

    /// Returns `None` if `cancel` was raised before all faces were sampled.
    pub fn calculate(&self, key: SectionKey, cancel: &AtomicBool) -> Option<SectionBorderData> {
        let mut builder = SectionBorderData::builder();
        let VoxelUnits(min) = section_min(key);

        for face in Face::ALL {
            if cancel.load(Ordering::Acquire) {
                return None;
            }
            // Nothing lives across the top or bottom of the world.
            if face.is_vertical() && !self.range.contains(key.neighbor(face)) {
                continue;
            }
            self.sample_face(min, face, &mut builder);
        }

        Some(builder.build())
    }

    fn sample_face(&self, section_min: IVec3, face: Face, builder: &mut SectionBorderDataBuilder) {
        let stride = self.sample_stride;
        let [u, v] = face.tangent_axes();
        let normal = face.normal();
        let axis = normal.abs();

        let (inside_layer, plane_offset) = if face.is_positive() {
            (SECTION_EDGE_LENGTH - 1, SECTION_EDGE_LENGTH)
        } else {
            (0, 0)
        };

        let patch_starts = (0..SECTION_EDGE_LENGTH).step_by(stride as usize);
        for (i, j) in iproduct!(patch_starts.clone(), patch_starts) {
            let inside = section_min + axis * inside_layer + u * (i + stride / 2) + v * (j + stride / 2);
            let outside = inside + normal;

            let (inside_biome, outside_biome) = match (
                self.world.biome_at(VoxelUnits(inside)),
                self.world.biome_at(VoxelUnits(outside)),
            ) {
                (Some(a), Some(b)) => (a, b),
                // Best effort: the section or its neighbor has gone away.
                _ => continue,
            };

            if let Some(kind) = self.world.border_kind(&inside_biome, &outside_biome) {
                let start = (section_min + axis * plane_offset + u * i).as_vec3a()
                    + v.as_vec3a() * (j as f32 + 0.5 * stride as f32);
                let segment =
                    LineSegment::from_start_and_direction(start, u.as_vec3a() * stride as f32);
                builder.push(kind, segment);
            }
        }
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
