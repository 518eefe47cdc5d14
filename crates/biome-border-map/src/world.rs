use crate::glam::IVec3;
use crate::section_key::SectionKey;
use crate::units::VoxelUnits;

/// How far world generation has progressed for a section's column. Only [`GenerationStatus::Full`] sections have final
/// biomes.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum GenerationStatus {
    Empty,
    Biomes,
    Noise,
    Surface,
    Features,
    Full,
}

impl GenerationStatus {
    pub fn is_complete(self) -> bool {
        self == GenerationStatus::Full
    }
}

/// Which of the two border sets a segment belongs to. Each kind is drawn in its own color.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BorderKind {
    Similar,
    Dissimilar,
}

/// The voxel world as seen by border calculation.
///
/// Implementations are shared with worker threads, so they must be cheap to query concurrently. A section that is no longer
/// available should answer `None` rather than block or panic; calculation treats that as "nothing to draw here."
pub trait BiomeSource: Send + Sync + 'static {
    type Biome: PartialEq;

    /// `None` if the section is not present in the world at all.
    fn generation_status(&self, key: SectionKey) -> Option<GenerationStatus>;

    fn biome_at(&self, voxel: VoxelUnits<IVec3>) -> Option<Self::Biome>;

    /// Classifies the border between a biome inside a section and the biome across its face. Returning `None` draws nothing.
    ///
    /// The default treats identical biomes as [`BorderKind::Similar`] and everything else as [`BorderKind::Dissimilar`].
    fn border_kind(&self, inside: &Self::Biome, outside: &Self::Biome) -> Option<BorderKind> {
        if inside == outside {
            Some(BorderKind::Similar)
        } else {
            Some(BorderKind::Dissimilar)
        }
    }
}
