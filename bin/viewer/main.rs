//! Walks an observer across a procedurally striped world and reports how border calculation keeps up.
//!
//! Usage: `border-viewer [config.ron]`. Set `RUST_LOG=debug` to see the cache at work.

use biome_border_map::core::SmallKeyHashSet;
use biome_border_map::glam::{IVec3, Vec3A};
use biome_border_map::{in_section_vec3a, BiomeSource, GenerationStatus, SectionKey, VoxelUnits};
use biome_border_viewer::{BorderViewer, Config, LineBuffer};

use itertools::iproduct;
use std::sync::Arc;
use std::time::{Duration, Instant};

const NUM_FRAMES: u32 = 600;
const FRAME_TIME: Duration = Duration::from_millis(16);
const WALK_SPEED: f32 = 0.75;

/// Diagonal bands of biomes, with generation finishing only near the origin at first and spreading outward over time.
struct StripedWorld {
    band_width: i32,
    created: Instant,
}

impl BiomeSource for StripedWorld {
    type Biome = i32;

    fn generation_status(&self, key: SectionKey) -> Option<GenerationStatus> {
        let generated_radius = 4 + (self.created.elapsed().as_millis() / 250) as i32;
        if key.x.abs().max(key.z.abs()) <= generated_radius {
            Some(GenerationStatus::Full)
        } else {
            Some(GenerationStatus::Surface)
        }
    }

    fn biome_at(&self, voxel: VoxelUnits<IVec3>) -> Option<i32> {
        let p = voxel.into_inner();
        Some((p.x + p.z).div_euclid(self.band_width))
    }
}

/// Keeps a square of columns around `center` loaded, like a chunk loader would.
fn update_loaded_columns(
    viewer: &mut BorderViewer,
    loaded: &mut SmallKeyHashSet<(i32, i32)>,
    center: SectionKey,
    radius: i32,
) {
    let wanted: SmallKeyHashSet<(i32, i32)> =
        iproduct!(-radius..=radius, -radius..=radius)
            .map(|(dx, dz)| (center.x + dx, center.z + dz))
            .collect();

    for &(x, z) in loaded.difference(&wanted) {
        viewer.column_unloaded(x, z);
    }
    for &(x, z) in wanted.difference(loaded) {
        viewer.column_loaded(x, z);
    }
    *loaded = wanted;
}

fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::read_file(&path).expect("Failed to read config"),
        None => Config::default(),
    };
    log::info!("{:#?}", config);

    let world = Arc::new(StripedWorld {
        band_width: 40,
        created: Instant::now(),
    });
    let mut viewer = BorderViewer::new(config);
    if !viewer.start() {
        log::error!("No calculation threads; borders will never appear");
    }

    // One extra ring so the visible edge has neighbors.
    let load_radius = viewer.config().render_distance() as i32 + 1;
    let mut loaded_columns = SmallKeyHashSet::default();
    let mut lines = LineBuffer::default();
    let mut observer = Vec3A::new(8.0, 72.0, 8.0);

    for frame in 0..NUM_FRAMES {
        let frame_start = Instant::now();

        update_loaded_columns(
            &mut viewer,
            &mut loaded_columns,
            in_section_vec3a(VoxelUnits(observer)),
            load_radius,
        );

        lines.clear();
        let report = viewer.render_borders(observer, &world, &mut lines);

        if frame % 60 == 0 {
            let stats = viewer.cache().stats();
            let work = viewer.cache().take_work_timer();
            log::info!(
                "frame {}: drew {}/{} sections ({} lines, {} bytes), dispatched {}, {} ready, {} in flight",
                frame,
                report.sections_drawn,
                report.visible_sections,
                report.lines_drawn,
                lines.as_bytes().len(),
                report.calculations_dispatched,
                stats.ready,
                stats.queued,
            );
            log::info!(
                "calculated {} sections ({} failed) in {:?}, average {} us, longest {:?}",
                work.items_completed(),
                work.items_failed(),
                work.total_cpu_time(),
                work.average_cpu_time_us(),
                work.longest_item(),
            );
        }

        observer.x += WALK_SPEED;

        if let Some(remaining) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(remaining);
        }
    }

    let stats = viewer.cache().stats();
    log::info!(
        "done: {} dispatched, {} stale results dropped",
        stats.dispatched,
        stats.stale_dropped
    );
    viewer.world_unloaded();
}
