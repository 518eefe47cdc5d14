use crate::coordinates::Face;
use crate::glam::IVec3;
use crate::units::SectionUnits;

/// Identifies one 16³ section of a chunk column. `y` is the vertical section index.
///
/// This is the only identity used by the [`BorderCache`](crate::BorderCache) collections.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SectionKey {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl SectionKey {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn coordinates(self) -> SectionUnits<IVec3> {
        SectionUnits(IVec3::new(self.x, self.y, self.z))
    }

    pub fn offset(self, delta: IVec3) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.z + delta.z)
    }

    /// The section sharing `face` with this one.
    pub fn neighbor(self, face: Face) -> Self {
        self.offset(face.normal())
    }

    /// Same column, different vertical index.
    pub fn with_y(self, y: i32) -> Self {
        Self::new(self.x, y, self.z)
    }
}

impl From<SectionUnits<IVec3>> for SectionKey {
    fn from(SectionUnits(p): SectionUnits<IVec3>) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

impl From<SectionKey> for IVec3 {
    fn from(key: SectionKey) -> Self {
        key.coordinates().into_inner()
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

    #[test]
    fn neighbors_across_each_face() {
        let key = SectionKey::new(5, 10, -15);

        assert_eq!(key.neighbor(Face::PosX), SectionKey::new(6, 10, -15));
        assert_eq!(key.neighbor(Face::NegX), SectionKey::new(4, 10, -15));
        assert_eq!(key.neighbor(Face::PosY), SectionKey::new(5, 11, -15));
        assert_eq!(key.neighbor(Face::NegY), SectionKey::new(5, 9, -15));
        assert_eq!(key.neighbor(Face::PosZ), SectionKey::new(5, 10, -14));
        assert_eq!(key.neighbor(Face::NegZ), SectionKey::new(5, 10, -16));
    }

    #[test]
    fn ivec3_conversions_agree() {
        let key = SectionKey::new(-3, 7, 2);
        let v: IVec3 = key.into();

        assert_eq!(v, IVec3::new(-3, 7, 2));
        assert_eq!(SectionKey::from(SectionUnits(v)), key);
        assert_eq!(key.with_y(0), SectionKey::new(-3, 0, 2));
    }
}
