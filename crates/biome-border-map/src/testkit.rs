//! A scriptable [`BiomeSource`] for tests.

use crate::coordinates::in_section;
use crate::core::SmallKeyHashSet;
use crate::glam::IVec3;
use crate::section_key::SectionKey;
use crate::units::VoxelUnits;
use crate::world::{BiomeSource, GenerationStatus};

use crossbeam::channel::{bounded, Receiver, Sender};
use parking_lot::Mutex;

type BiomeFn = Box<dyn Fn(IVec3) -> Option<u8> + Send + Sync>;

pub struct TestWorld {
    biomes: BiomeFn,
    lagging: Mutex<SmallKeyHashSet<SectionKey>>,
    panic_in: Mutex<Option<SectionKey>>,
    // Every biome lookup blocks on this until the paired sender is dropped.
    gate: Option<Receiver<()>>,
}

impl TestWorld {
    /// Every section is fully generated and every voxel has biome 0.
    pub fn uniform() -> Self {
        Self {
            biomes: Box::new(|_| Some(0)),
            lagging: Default::default(),
            panic_in: Default::default(),
            gate: None,
        }
    }

    /// Calculations against this world stall until the returned sender is dropped.
    pub fn gated() -> (Self, Sender<()>) {
        let (tx, rx) = bounded(0);
        let world = Self {
            gate: Some(rx),
            ..Self::uniform()
        };
        (world, tx)
    }

    pub fn with_biomes(self, f: impl Fn(IVec3) -> Option<u8> + Send + Sync + 'static) -> Self {
        Self {
            biomes: Box::new(f),
            ..self
        }
    }

    pub fn set_lagging(&self, key: SectionKey, lagging: bool) {
        let mut set = self.lagging.lock();
        if lagging {
            set.insert(key);
        } else {
            set.remove(&key);
        }
    }

    /// Biome lookups inside `key` will panic.
    pub fn panic_in(&self, key: Option<SectionKey>) {
        *self.panic_in.lock() = key;
    }
}

impl BiomeSource for TestWorld {
    type Biome = u8;

    fn generation_status(&self, key: SectionKey) -> Option<GenerationStatus> {
        if self.lagging.lock().contains(&key) {
            Some(GenerationStatus::Features)
        } else {
            Some(GenerationStatus::Full)
        }
    }

    fn biome_at(&self, voxel: VoxelUnits<IVec3>) -> Option<u8> {
        if let Some(gate) = self.gate.as_ref() {
            let _ = gate.recv();
        }
        if *self.panic_in.lock() == Some(in_section(voxel)) {
            panic!("no biome data at {:?}", voxel.0);
        }
        (self.biomes)(voxel.0)
    }
}
