use std::fmt;

/// What a boundary-extended sampler reads outside the source domain.
///
/// Every policy except [`Constant`](Self::Constant) remaps each out-of-range
/// coordinate independently onto the source domain.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Boundary<T> {
    /// A fixed value everywhere outside the domain.
    Constant(T),
    /// Reflection without repeating the edge element, so that along a
    /// dimension of size 4 the coordinates `-3..=6` map to
    /// `3 2 1 0 1 2 3 2 1 0`.
    MirrorSingle,
    /// Reflection repeating the edge element, so that along a dimension of
    /// size 4 the coordinates `-3..=6` map to `2 1 0 0 1 2 3 3 2 1`.
    MirrorDouble,
    /// Wrap-around.
    Periodic,
    /// The closest element on the border.
    NearestBorder,
}

impl<T> fmt::Display for Boundary<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(_) => write!(f, "constant"),
            Self::MirrorSingle => write!(f, "mirror-single"),
            Self::MirrorDouble => write!(f, "mirror-double"),
            Self::Periodic => write!(f, "periodic"),
            Self::NearestBorder => write!(f, "nearest-border"),
        }
    }
}

impl<T> Boundary<T> {
    /// Returns `true` for [`Boundary::Constant`].
    pub fn is_constant(&self) -> bool {
        matches!(self, Self::Constant(_))
    }

    /// Maps `coord` onto `[min, min + len)` along one dimension. Coordinates
    /// already in range are returned unchanged, and so is every coordinate
    /// under [`Boundary::Constant`].
    pub fn remap(&self, coord: i64, min: i64, len: i64) -> i64 {
        debug_assert!(len > 0);
        let x = coord - min;
        if (0..len).contains(&x) {
            return coord;
        }
        let remapped = match self {
            Self::Constant(_) => return coord,
            Self::MirrorSingle => {
                if len == 1 {
                    0
                } else {
                    let period = 2 * len - 2;
                    let m = x.rem_euclid(period);
                    if m < len {
                        m
                    } else {
                        period - m
                    }
                }
            }
            Self::MirrorDouble => {
                let period = 2 * len;
                let m = x.rem_euclid(period);
                if m < len {
                    m
                } else {
                    period - 1 - m
                }
            }
            Self::Periodic => x.rem_euclid(len),
            Self::NearestBorder => x.clamp(0, len - 1),
        };
        min + remapped
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn remap_all(boundary: Boundary<u8>, range: std::ops::RangeInclusive<i64>, len: i64) -> Vec<i64> {
        range.map(|x| boundary.remap(x, 0, len)).collect()
    }

    #[test]
    fn test_boundary_remap() {
        assert_eq!(vec![3, 2, 1, 0, 1, 2, 3, 2, 1, 0], remap_all(Boundary::MirrorSingle, -3..=6, 4));
        assert_eq!(vec![2, 1, 0, 0, 1, 2, 3, 3, 2, 1], remap_all(Boundary::MirrorDouble, -3..=6, 4));
        assert_eq!(vec![1, 2, 3, 0, 1, 2, 3, 0, 1, 2], remap_all(Boundary::Periodic, -3..=6, 4));
        assert_eq!(vec![0, 0, 0, 0, 1, 2, 3, 3, 3, 3], remap_all(Boundary::NearestBorder, -3..=6, 4));
        assert_eq!(-7, Boundary::Constant(0_u8).remap(-7, 0, 4));

        // Length-one dimensions always map to their only element.
        assert_eq!(vec![0; 5], remap_all(Boundary::MirrorSingle, -2..=2, 1));
        assert_eq!(vec![0; 5], remap_all(Boundary::MirrorDouble, -2..=2, 1));

        // Offset domains.
        assert_eq!(10, Boundary::<u8>::Periodic.remap(7, 10, 3));
        assert_eq!(11, Boundary::<u8>::MirrorSingle.remap(9, 10, 3));
        assert_eq!(10, Boundary::<u8>::MirrorDouble.remap(9, 10, 3));
    }

    proptest! {
        /// Tests that the remapping policies land in range, are periodic
        /// where they should be, and mirror around the domain edges.
        #[test]
        fn test_boundary_remap_properties(
            x in -1000..1000_i64,
            min in -50..50_i64,
            len in 1..20_i64,
        ) {
            for boundary in [Boundary::<u8>::MirrorSingle, Boundary::MirrorDouble, Boundary::Periodic, Boundary::NearestBorder] {
                let r = boundary.remap(x, min, len);
                prop_assert!(min <= r && r < min + len);
            }

            prop_assert_eq!(
                Boundary::<u8>::Periodic.remap(x, min, len),
                Boundary::<u8>::Periodic.remap(x + len, min, len)
            );
            let single_period = std::cmp::max(1, 2 * len - 2);
            prop_assert_eq!(
                Boundary::<u8>::MirrorSingle.remap(x, min, len),
                Boundary::<u8>::MirrorSingle.remap(x + single_period, min, len)
            );
            prop_assert_eq!(
                Boundary::<u8>::MirrorDouble.remap(x, min, len),
                Boundary::<u8>::MirrorDouble.remap(x + 2 * len, min, len)
            );
            // Mirror-double reflects around the lower edge between min - 1
            // and min.
            prop_assert_eq!(
                Boundary::<u8>::MirrorDouble.remap(min - 1 - (x - min), min, len),
                Boundary::<u8>::MirrorDouble.remap(x, min, len)
            );
        }
    }
}
