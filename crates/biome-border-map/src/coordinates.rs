use crate::glam::{IVec3, Vec3A};
use crate::section_key::SectionKey;
use crate::units::*;

pub const SECTION_EDGE_LENGTH: i32 = 16;
pub const SECTION_EDGE_LOG2: i32 = 4;

/// One of the six axis-aligned faces of a section.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Face {
    NegX,
    PosX,
    NegY,
    PosY,
    NegZ,
    PosZ,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::NegX,
        Face::PosX,
        Face::NegY,
        Face::PosY,
        Face::NegZ,
        Face::PosZ,
    ];

    pub fn normal(self) -> IVec3 {
        match self {
            Face::NegX => IVec3::NEG_X,
            Face::PosX => IVec3::X,
            Face::NegY => IVec3::NEG_Y,
            Face::PosY => IVec3::Y,
            Face::NegZ => IVec3::NEG_Z,
            Face::PosZ => IVec3::Z,
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Face::NegY | Face::PosY)
    }

    pub fn is_positive(self) -> bool {
        matches!(self, Face::PosX | Face::PosY | Face::PosZ)
    }

    /// The two unit axes spanning this face. Side faces put the vertical axis second, so segments laid along the first axis
    /// are horizontal.
    pub fn tangent_axes(self) -> [IVec3; 2] {
        match self {
            Face::NegX | Face::PosX => [IVec3::Z, IVec3::Y],
            Face::NegY | Face::PosY => [IVec3::X, IVec3::Z],
            Face::NegZ | Face::PosZ => [IVec3::X, IVec3::Y],
        }
    }
}

/// The minimum voxel of the section at `key`.
pub fn section_min(key: SectionKey) -> VoxelUnits<IVec3> {
    VoxelUnits(key.coordinates().into_inner() << SECTION_EDGE_LOG2)
}

pub fn section_center(key: SectionKey) -> VoxelUnits<Vec3A> {
    section_min(key).map(|m| m.as_vec3a() + Vec3A::splat(0.5 * SECTION_EDGE_LENGTH as f32))
}

/// Returns the key of the section that contains voxel `p`.
pub fn in_section(p: VoxelUnits<IVec3>) -> SectionKey {
    // Arithmetic shift floors negative coordinates.
    SectionKey::from(SectionUnits(p.0 >> SECTION_EDGE_LOG2))
}

/// Returns the key of the section that contains the world-space point `p`.
pub fn in_section_vec3a(p: VoxelUnits<Vec3A>) -> SectionKey {
    in_section(p.map(|p| p.floor().as_ivec3()))
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
    fn section_bounds() {
        let key = SectionKey::new(1, 2, -1);

        assert_eq!(section_min(key), VoxelUnits(IVec3::new(16, 32, -16)));
        assert_eq!(section_center(key), VoxelUnits(Vec3A::new(24.0, 40.0, -8.0)));
    }

    #[test]
    fn negative_voxels_floor_into_previous_section() {
        assert_eq!(in_section(VoxelUnits(IVec3::new(0, 0, 0))), SectionKey::new(0, 0, 0));
        assert_eq!(in_section(VoxelUnits(IVec3::new(15, 16, 31))), SectionKey::new(0, 1, 1));
        assert_eq!(in_section(VoxelUnits(IVec3::new(-1, -16, -17))), SectionKey::new(-1, -1, -2));
        assert_eq!(
            in_section_vec3a(VoxelUnits(Vec3A::new(-0.25, 63.9, 16.0))),
            SectionKey::new(-1, 3, 1)
        );
    }

    #[test]
    fn faces_are_consistent() {
        for face in Face::ALL {
            assert_eq!(face.normal().dot(face.normal()), 1);

            let [u, v] = face.tangent_axes();
            assert_eq!(u.dot(face.normal()), 0);
            assert_eq!(v.dot(face.normal()), 0);
            assert_eq!(u.dot(v), 0);
        }
        assert!(Face::PosY.is_vertical() && Face::PosY.is_positive());
        assert!(!Face::NegZ.is_vertical() && !Face::NegZ.is_positive());
    }
}
