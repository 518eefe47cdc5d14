use crate::config::{MAX_RENDER_DISTANCE, MAX_VERTICAL_RENDER_DISTANCE};

use biome_border_map::glam::Vec3A;
use biome_border_map::{in_section_vec3a, section_center, SectionKey, SectionRange, VoxelUnits};

use float_ord::FloatOrd;
use itertools::iproduct;

/// All sections within a horizontal circle of `render_distance` sections and `vertical_render_distance` sections above or below
/// `observer`, clipped to `range` and sorted nearest first. Distances are capped at [`MAX_RENDER_DISTANCE`] and
/// [`MAX_VERTICAL_RENDER_DISTANCE`].
pub fn visible_sections(
    observer: VoxelUnits<Vec3A>,
    render_distance: u32,
    vertical_render_distance: u32,
    range: SectionRange,
) -> Vec<SectionKey> {
    let center = in_section_vec3a(observer);
    let r = render_distance.min(MAX_RENDER_DISTANCE) as i32;
    let v = vertical_render_distance.min(MAX_VERTICAL_RENDER_DISTANCE) as i32;

    let mut keys: Vec<SectionKey> = iproduct!(-r..=r, -v..=v, -r..=r)
        .filter(|&(dx, _, dz)| dx * dx + dz * dz <= r * r)
        .map(|(dx, dy, dz)| SectionKey::new(center.x + dx, center.y + dy, center.z + dz))
        .filter(|&key| range.contains(key))
        .collect();

    keys.sort_by_key(|&key| FloatOrd(section_center(key).0.distance_squared(observer.0)));

    keys
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

    #[test]
    fn nearest_section_comes_first() {
        let observer = VoxelUnits(Vec3A::new(8.0, 40.0, 8.0));
        let keys = visible_sections(observer, 2, 1, SectionRange::default());

        assert_eq!(keys[0], SectionKey::new(0, 2, 0));

        let distances: Vec<f32> = keys
            .iter()
            .map(|&k| section_center(k).0.distance_squared(observer.0))
            .collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn sections_form_a_clipped_cylinder() {
        let observer = VoxelUnits(Vec3A::new(-8.0, 4.0, 100.0));
        let keys = visible_sections(observer, 2, 1, SectionRange::default());

        // 13 columns within radius 2, and the layer below y = 0 is clipped.
        assert_eq!(keys.len(), 13 * 2);
        assert!(keys.contains(&SectionKey::new(-3, 0, 6)));
        assert!(keys.contains(&SectionKey::new(-1, 1, 6)));
        assert!(!keys.contains(&SectionKey::new(1, 0, 7)));
        assert!(keys.iter().all(|k| k.y >= 0));
    }

    #[test]
    fn huge_distances_are_capped() {
        let observer = VoxelUnits(Vec3A::new(8.0, 8.0, 8.0));
        let capped = visible_sections(observer, MAX_RENDER_DISTANCE, 0, SectionRange::default());
        let huge = visible_sections(observer, u32::MAX, u32::MAX, SectionRange::default());

        assert!(huge.contains(&SectionKey::new(MAX_RENDER_DISTANCE as i32, 0, 0)));
        assert!(!huge.contains(&SectionKey::new(MAX_RENDER_DISTANCE as i32 + 1, 0, 0)));
        // Every in-range layer, and no more columns than the capped circle.
        assert_eq!(huge.len(), capped.len() * 16);
    }

    #[test]
    fn zero_distance_is_just_the_observer_section() {
        let observer = VoxelUnits(Vec3A::new(-0.5, 255.0, 16.0));
        let keys = visible_sections(observer, 0, 0, SectionRange::default());

        assert_eq!(keys, vec![SectionKey::new(-1, 15, 1)]);
    }
}
