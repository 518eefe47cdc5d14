use crate::config::Config;
use crate::renderer::{draw_section_borders, visible_sections, LineSink};

use biome_border_map::glam::Vec3A;
use biome_border_map::{BiomeSource, BorderCache, SectionKey, VoxelUnits};

use std::sync::Arc;

/// What happened during one call to [`BorderViewer::render_borders`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FrameReport {
    pub visible_sections: usize,
    pub sections_drawn: usize,
    pub lines_drawn: usize,
    pub calculations_dispatched: usize,
}

/// Draws the biome borders around an observer every frame, keeping a [`BorderCache`] in sync with the world's loaded sections.
pub struct BorderViewer {
    config: Config,
    cache: BorderCache,
}

impl BorderViewer {
    pub fn new(config: Config) -> Self {
        Self {
            cache: BorderCache::new(config.cache),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cache(&self) -> &BorderCache {
        &self.cache
    }

    /// Starts the calculation threads ahead of the first frame.
    pub fn start(&mut self) -> bool {
        self.cache.start()
    }

    pub fn section_loaded(&mut self, key: SectionKey) {
        self.cache.section_loaded(key);
    }

    pub fn section_unloaded(&mut self, key: SectionKey) {
        self.cache.section_unloaded(key);
    }

    pub fn column_loaded(&mut self, x: i32, z: i32) {
        self.cache.column_loaded(x, z);
    }

    pub fn column_unloaded(&mut self, x: i32, z: i32) {
        self.cache.column_unloaded(x, z);
    }

    /// Stops all calculation and forgets every section.
    pub fn world_unloaded(&mut self) {
        log::debug!("World unloaded; clearing border cache");
        self.cache.clear();
    }

    /// Draws the borders of every visible section that has them and schedules calculation for the rest.
    ///
    /// `observer` is given in voxel coordinates.
    pub fn render_borders<W: BiomeSource>(
        &mut self,
        observer: Vec3A,
        world: &Arc<W>,
        sink: &mut impl LineSink,
    ) -> FrameReport {
        if !self.cache.any_loaded() {
            return FrameReport::default();
        }

        let visible = visible_sections(
            VoxelUnits(observer),
            self.config.render_distance(),
            self.config.vertical_render_distance(),
            self.config.cache.section_range,
        );

        let mut report = FrameReport {
            visible_sections: visible.len(),
            ..Default::default()
        };
        let colors = self.config.colors;
        let mut sections_drawn = 0;
        let mut lines_drawn = 0;
        report.calculations_dispatched = self.cache.query_and_dispatch(visible, world, |_, data| {
            sections_drawn += 1;
            lines_drawn += draw_section_borders(data, &colors, &mut *sink);
        });
        report.sections_drawn = sections_drawn;
        report.lines_drawn = lines_drawn;

        report
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod test {
    use super::*;
    use crate::renderer::LineBuffer;

    use biome_border_map::glam::IVec3;
    use biome_border_map::{CacheConfig, GenerationStatus, SectionRange};

    use std::time::{Duration, Instant};

    /// Biome changes every 32 voxels along X.
    struct Stripes;

    impl BiomeSource for Stripes {
        type Biome = i32;

        fn generation_status(&self, _key: SectionKey) -> Option<GenerationStatus> {
            Some(GenerationStatus::Full)
        }

        fn biome_at(&self, voxel: VoxelUnits<IVec3>) -> Option<i32> {
            Some(voxel.0.x.div_euclid(32))
        }
    }

    fn small_config() -> Config {
        Config {
            cache: CacheConfig {
                calculation_threads: 2,
                section_range: SectionRange::new(0, 3),
                sample_stride: 16,
            },
            render_distance: 1,
            vertical_render_distance: 0,
            ..Default::default()
        }
    }

    #[test]
    fn nothing_loaded_does_nothing() {
        let mut viewer = BorderViewer::new(small_config());
        let mut lines = LineBuffer::default();

        let report = viewer.render_borders(Vec3A::ZERO, &Arc::new(Stripes), &mut lines);
        assert_eq!(report, FrameReport::default());
        assert!(lines.is_empty());
        assert!(!viewer.cache().stats().pool_running);
    }

    #[test]
    fn huge_render_distance_is_clamped() {
        let mut viewer = BorderViewer::new(Config {
            render_distance: u32::MAX,
            vertical_render_distance: u32::MAX,
            ..small_config()
        });
        viewer.column_loaded(0, 0);
        let mut lines = LineBuffer::default();

        // The lone column has no loaded neighbors, so nothing is dispatched either.
        let report = viewer.render_borders(Vec3A::new(8.0, 8.0, 8.0), &Arc::new(Stripes), &mut lines);
        assert!(report.visible_sections > 0);
        assert_eq!(report.calculations_dispatched, 0);
    }

    #[test]
    fn borders_appear_once_calculated() {
        let world = Arc::new(Stripes);
        let mut viewer = BorderViewer::new(small_config());
        for x in -3..=3 {
            for z in -3..=3 {
                viewer.column_loaded(x, z);
            }
        }
        let observer = Vec3A::new(24.0, 40.0, 8.0);

        let mut lines = LineBuffer::default();
        let first = viewer.render_borders(observer, &world, &mut lines);
        assert_eq!(first.visible_sections, 5);
        assert_eq!(first.calculations_dispatched, 5);
        assert_eq!(first.sections_drawn, 0);

        let deadline = Instant::now() + Duration::from_secs(10);
        let report = loop {
            lines.clear();
            let report = viewer.render_borders(observer, &world, &mut lines);
            if report.sections_drawn == 5 {
                break report;
            }
            assert!(Instant::now() < deadline, "timed out");
            std::thread::sleep(Duration::from_millis(1));
        };
        assert_eq!(report.calculations_dispatched, 0);
        assert_eq!(report.lines_drawn, lines.num_lines());

        // One patch per face. Biomes change across the x = 0 and x = 32 planes.
        assert_eq!(report.lines_drawn, 5 * 6);
        let dissimilar = viewer.config().colors.dissimilar;
        let num_dissimilar = lines
            .vertices()
            .iter()
            .filter(|v| v.color == dissimilar)
            .count()
            / 2;
        assert_eq!(num_dissimilar, 5);

        viewer.world_unloaded();
        assert!(!viewer.cache().any_loaded());
        lines.clear();
        assert_eq!(
            viewer.render_borders(observer, &world, &mut lines),
            FrameReport::default()
        );
    }
}
