use biome_border_map::{BorderKind, CacheConfig};

use serde::{Deserialize, Serialize};

/// 8-bit RGBA.
pub type Rgba = [u8; 4];

/// Upper bound on [`Config::render_distance`], in sections.
pub const MAX_RENDER_DISTANCE: u32 = 32;
/// Upper bound on [`Config::vertical_render_distance`], in sections.
pub const MAX_VERTICAL_RENDER_DISTANCE: u32 = 32;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Config {
    pub cache: CacheConfig,
    /// Horizontal radius, in sections, of the circle of sections that have their borders drawn.
    pub render_distance: u32,
    /// Sections above and below the observer that have their borders drawn.
    pub vertical_render_distance: u32,
    pub colors: BorderColors,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            render_distance: 8,
            vertical_render_distance: 2,
            colors: BorderColors::default(),
        }
    }
}

impl Config {
    pub fn render_distance(&self) -> u32 {
        self.render_distance.min(MAX_RENDER_DISTANCE)
    }

    pub fn vertical_render_distance(&self) -> u32 {
        self.vertical_render_distance
            .min(MAX_VERTICAL_RENDER_DISTANCE)
    }

    pub fn read_file(path: &str) -> Result<Self, ron::Error> {
        let reader = std::fs::File::open(path)?;

        ron::de::from_reader(reader)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct BorderColors {
    pub similar: Rgba,
    pub dissimilar: Rgba,
}

impl Default for BorderColors {
    fn default() -> Self {
        Self {
            similar: [64, 192, 64, 255],
            dissimilar: [224, 48, 48, 255],
        }
    }
}

impl BorderColors {
    pub fn color(&self, kind: BorderKind) -> Rgba {
        match kind {
            BorderKind::Similar => self.similar,
            BorderKind::Dissimilar => self.dissimilar,
        }
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
    use biome_border_map::SectionRange;

    #[test]
    fn ron_round_trip() {
        let config = Config {
            cache: CacheConfig {
                calculation_threads: 4,
                section_range: SectionRange::new(-4, 19),
                sample_stride: 2,
            },
            render_distance: 12,
            vertical_render_distance: 1,
            colors: BorderColors {
                similar: [1, 2, 3, 4],
                dissimilar: [5, 6, 7, 8],
            },
        };

        let text = ron::ser::to_string(&config).unwrap();
        let parsed: Config = ron::de::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn partial_file_uses_defaults() {
        let parsed: Config =
            ron::de::from_str("(render_distance: 3, colors: (similar: (0, 0, 255, 255)))").unwrap();

        assert_eq!(parsed.render_distance, 3);
        assert_eq!(parsed.vertical_render_distance, 2);
        assert_eq!(parsed.colors.similar, [0, 0, 255, 255]);
        assert_eq!(parsed.colors.dissimilar, BorderColors::default().dissimilar);
        assert_eq!(parsed.cache, CacheConfig::default());
    }

    #[test]
    fn render_distances_are_clamped() {
        let config = Config {
            render_distance: u32::MAX,
            vertical_render_distance: u32::MAX,
            ..Default::default()
        };
        assert_eq!(config.render_distance(), MAX_RENDER_DISTANCE);
        assert_eq!(config.vertical_render_distance(), MAX_VERTICAL_RENDER_DISTANCE);

        let config = Config::default();
        assert_eq!(config.render_distance(), 8);
        assert_eq!(config.vertical_render_distance(), 2);
    }

    #[test]
    fn read_file_reports_missing_file() {
        assert!(Config::read_file("/nonexistent/border-viewer.ron").is_err());

        let path = std::env::temp_dir().join("biome-border-viewer-config-test.ron");
        std::fs::write(&path, "(vertical_render_distance: 5)").unwrap();
        let config = Config::read_file(path.to_str().unwrap()).unwrap();
        assert_eq!(config.vertical_render_distance, 5);
        let _ = std::fs::remove_file(path);
    }
}
