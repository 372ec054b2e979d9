//! Conversion between N-dimensional positions and linear indices.
//!
//! Indexing is row-major with dimension 0 varying fastest: `step[0] = 1` and
//! `step[d] = step[d - 1] * dims[d - 1]`. Every function here is generic
//! over the coordinate width (`i32` or `i64`); callers must pick a width in
//! which the product of `dims` does not overflow. Overflow is a programming
//! error and is only caught in debug builds.

use crate::num::PosNum;

/// Converts a position into a linear index for an array with the given
/// size.
///
/// # Panics
///
/// This function panics in debug builds if `position` lies outside
/// `[0, dims)`.
#[inline]
pub fn position_to_index<N: PosNum>(position: &[N], dims: &[N]) -> N {
    debug_assert_eq!(position.len(), dims.len(), "Dimensionality mismatch");
    let max_dim = dims.len() - 1;
    let mut index = position[max_dim];
    for d in (0..max_dim).rev() {
        debug_assert!(N::zero() <= position[d] && position[d] < dims[d]);
        index = index * dims[d] + position[d];
    }
    index
}

/// Converts a position into a linear index for an array with the given size
/// whose minimum corner sits at `offset`.
///
/// This lets a chunk compute its local index directly from a position in its
/// parent's coordinates, without subtracting into a temporary position.
#[inline]
pub fn position_with_offset_to_index<N: PosNum>(position: &[N], dims: &[N], offset: &[N]) -> N {
    debug_assert_eq!(position.len(), dims.len(), "Dimensionality mismatch");
    debug_assert_eq!(offset.len(), dims.len(), "Dimensionality mismatch");
    let max_dim = dims.len() - 1;
    let mut index = position[max_dim] - offset[max_dim];
    for d in (0..max_dim).rev() {
        index = index * dims[d] + position[d] - offset[d];
    }
    index
}

/// Converts a linear index into a position for an array with the given size,
/// writing the result into `position`.
#[inline]
pub fn index_to_position<N: PosNum>(mut index: N, dims: &[N], position: &mut [N]) {
    debug_assert_eq!(position.len(), dims.len(), "Dimensionality mismatch");
    let max_dim = dims.len() - 1;
    for d in 0..max_dim {
        let j = index / dims[d];
        position[d] = index - j * dims[d];
        index = j;
    }
    position[max_dim] = index;
}

/// Converts a linear index into a position for an array with the given size
/// whose minimum corner sits at `offset`.
#[inline]
pub fn index_to_position_with_offset<N: PosNum>(
    mut index: N,
    dims: &[N],
    offset: &[N],
    position: &mut [N],
) {
    debug_assert_eq!(position.len(), dims.len(), "Dimensionality mismatch");
    let max_dim = dims.len() - 1;
    for d in 0..max_dim {
        let j = index / dims[d];
        position[d] = index - j * dims[d] + offset[d];
        index = j;
    }
    position[max_dim] = index + offset[max_dim];
}

/// Returns the coordinate along dimension `d` of the position with the given
/// linear index, using precomputed steps from [`create_steps()`].
#[inline]
pub fn index_to_position_along<N: PosNum>(index: N, dims: &[N], steps: &[N], d: usize) -> N {
    (index / steps[d]) % dims[d]
}

/// Computes the step (stride) along each dimension of an array with the given
/// size.
pub fn create_steps<N: PosNum>(dims: &[N]) -> Vec<N> {
    let mut steps = Vec::with_capacity(dims.len());
    let mut step = N::one();
    for &len in dims {
        steps.push(step);
        step *= len;
    }
    steps
}

/// Returns the number of elements in an array with the given size, or `None`
/// if that number overflows `N`.
pub fn checked_size<N: PosNum>(dims: &[N]) -> Option<N> {
    crate::math::checked_product(dims)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::interval::Interval;
    use crate::pos::LPos;

    /// Tests `position_to_index()` and `index_to_position()`.
    #[test]
    fn test_index_flatten_unflatten() {
        let dims = [4_i64, 5, 6, 7];
        let interval = Interval::from_dims(&dims).unwrap();
        let count = interval.count();
        let mut last_index = None;
        let mut unflattened = LPos::origin(4);
        for pos in interval.iter() {
            let index = position_to_index(&pos, &dims);
            assert!(0 <= index && index < count);
            index_to_position(index, &dims, &mut unflattened);
            assert_eq!(pos, unflattened);
            if let Some(last) = last_index {
                assert_eq!(index, last + 1);
            }
            last_index = Some(index);
        }
    }

    #[test]
    fn test_index_steps() {
        assert_eq!(vec![1, 4, 20, 120], create_steps(&[4_i32, 5, 6, 7]));
        assert_eq!(vec![1_i64], create_steps(&[9_i64]));
        assert_eq!(Some(840), checked_size(&[4_i32, 5, 6, 7]));
        assert_eq!(None, checked_size(&[1 << 20, 1 << 20_i32]));
    }

    #[test]
    fn test_index_32_bit() {
        let dims = [3_i32, 3, 3];
        let mut pos = [0_i32; 3];
        index_to_position(26, &dims, &mut pos);
        assert_eq!([2, 2, 2], pos);
        assert_eq!(26, position_to_index(&pos, &dims));
        index_to_position(5, &dims, &mut pos);
        assert_eq!([2, 1, 0], pos);
    }

    proptest! {
        /// Tests that the offset variants agree with subtracting the offset
        /// first.
        #[test]
        fn test_index_with_offset(
            dims in prop::collection::vec(1..=6_i64, 1..=4),
            offset_seed in prop::collection::vec(-50..=50_i64, 4),
            index_seed in 0..10_000_i64,
        ) {
            let ndim = dims.len();
            let offset = &offset_seed[..ndim];
            let size = checked_size(&dims).unwrap();
            let index = index_seed % size;

            let mut pos = vec![0; ndim];
            index_to_position_with_offset(index, &dims, offset, &mut pos);
            prop_assert_eq!(index, position_with_offset_to_index(&pos, &dims, offset));

            let local: Vec<i64> = pos.iter().zip(offset).map(|(p, o)| p - o).collect();
            prop_assert_eq!(index, position_to_index(&local, &dims));

            let steps = create_steps(&dims);
            for d in 0..ndim {
                prop_assert_eq!(local[d], index_to_position_along(index, &dims, &steps, d));
            }
        }
    }
}
