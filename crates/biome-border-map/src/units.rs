macro_rules! def_units {
    ($t: ident, $space: literal) => {
        #[doc = concat!("Denotes that the inner `T` is given in units of ", $space, ".")]
        #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
        pub struct $t<T>(pub T);

        impl<T> $t<T> {
            pub fn into_inner(self) -> T {
                self.0
            }

            pub fn map<S>(self, mut f: impl FnMut(T) -> S) -> $t<S> {
                $t(f(self.0))
            }
        }
    };
}

def_units!(VoxelUnits, "voxels");
def_units!(SectionUnits, "sections");
