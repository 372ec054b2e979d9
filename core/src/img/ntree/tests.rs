use proptest::prelude::*;
use std::collections::HashMap;

use super::*;
use crate::sampler::{Cursor, CursorMut, Positionable, RandomAccess, RandomAccessMut};

fn interval(min: [i64; 2], max: [i64; 2]) -> Interval {
    Interval::new(LPos::from(min), LPos::from(max)).unwrap()
}

#[test]
fn test_ntree_construction() {
    let tree = NtreeImg::<u8>::new(&[5, 3]).unwrap();
    assert_eq!(8, tree.side());
    assert_eq!(1, tree.node_count());
    assert_eq!(0, tree.depth());
    assert_eq!(vec![(Interval::from_dims(&[5, 3]).unwrap(), 0)], tree.leaves());

    assert_eq!(
        Err(ConstructionError::InvalidGranularity(3)),
        NtreeImg::<u8>::with_granularity(&[4, 4], 0, 3),
    );
    assert_eq!(
        Err(ConstructionError::InvalidGranularity(0)),
        NtreeImg::<u8>::with_granularity(&[4, 4], 0, 0),
    );
    assert_eq!(
        Err(ConstructionError::TooLarge),
        NtreeImg::<u8>::new(&[1; MAX_NTREE_NDIM + 1]),
    );
}

#[test]
fn test_ntree_single_writes() {
    let mut tree = NtreeImg::<u16>::new(&[8, 8]).unwrap();
    tree.try_set(&[5, 2], 300).unwrap();
    assert_eq!(300, tree.get(&[5, 2]));
    assert_eq!(0, tree.get(&[5, 3]));
    assert_eq!(0, tree.get(&[0, 0]));
    // One split per level down to a single element.
    assert_eq!(3, tree.depth());
    assert_eq!(1 + 3 * 4, tree.node_count());

    // Writing the value back and compacting merges everything again.
    tree.try_set(&[5, 2], 0).unwrap();
    assert_eq!(13, tree.node_count());
    tree.compact();
    assert_eq!(1, tree.node_count());
    assert_eq!(1, tree.arena_len());
    assert_eq!(0, tree.depth());

    assert_eq!(Err(NtreeError::OutsideDomain), tree.try_set(&[8, 0], 1));
}

#[test]
fn test_ntree_fill_region() {
    let mut tree = NtreeImg::<u8>::new(&[8, 8]).unwrap();
    // Aligned quadrant: a single leaf write.
    tree.fill(&interval([4, 0], [7, 3]), 9).unwrap();
    assert_eq!(5, tree.node_count());
    assert_eq!(1, tree.depth());

    // Overwriting a subdivided region replaces it with one leaf.
    tree.try_set(&[5, 1], 2).unwrap();
    let arena_before = tree.arena_len();
    tree.fill(&interval([4, 0], [7, 3]), 3).unwrap();
    assert_eq!(5, tree.node_count());
    assert_eq!(arena_before, tree.arena_len());
    tree.compact();
    assert_eq!(5, tree.arena_len());

    // Unaligned region.
    tree.fill(&interval([1, 1], [5, 2]), 7).unwrap();
    for pos in Interval::from_dims(&[8, 8]).unwrap().iter() {
        let expected = if (1..=5).contains(&pos[0]) && (1..=2).contains(&pos[1]) {
            7
        } else if pos[0] >= 4 && pos[1] <= 3 {
            3
        } else {
            0
        };
        assert_eq!(expected, tree.get(&pos), "at {}", pos);
    }
}

/// Regions touching the upper edge of a domain that is not a power of two
/// may cover the unused part of the root cube.
#[test]
fn test_ntree_edge_fill() {
    let mut tree = NtreeImg::<u8>::with_granularity(&[5, 5], 0, 2).unwrap();
    assert_eq!(8, tree.side());
    // (4, 4) is the only element of the domain in the 4x4 node at (4, 4).
    tree.try_set(&[4, 4], 1).unwrap();
    assert_eq!(1, tree.get(&[4, 4]));
    assert_eq!(0, tree.get(&[3, 4]));
    assert_eq!(5, tree.node_count());
    assert!(matches!(
        tree.try_set(&[3, 3], 1),
        Err(NtreeError::GranularityExceeded { side: 2, .. }),
    ));
}

#[test]
fn test_ntree_granularity_exceeded() {
    let mut tree = NtreeImg::<u8>::with_granularity(&[8, 8], 0, 4).unwrap();
    tree.fill(&interval([0, 0], [3, 3]), 5).unwrap();
    let before = tree.clone();

    assert_eq!(
        Err(NtreeError::GranularityExceeded {
            side: 4,
            granularity: 4
        }),
        tree.try_set(&[6, 6], 1),
    );
    assert_eq!(before, tree);

    // A region that is fine in one quadrant but not another is rejected as
    // a whole.
    assert!(tree.fill(&interval([0, 4], [5, 7]), 2).is_err());
    assert_eq!(before, tree);

    // Writing the value a node already holds never needs a split.
    tree.try_set(&[1, 1], 5).unwrap();
    assert_eq!(before, tree);
}

#[test]
fn test_ntree_access() {
    let mut tree = NtreeImg::<i8>::new(&[4, 4, 4]).unwrap();
    {
        let mut access = tree.random_access_mut();
        access.set_position(&[1, 2, 3]);
        access.set(-4);
        assert_eq!(Some(1), access.leaf_side());
        access.set(-5);
        access.fwd(0);
        assert_eq!(0, access.get());
        access.set(6);
    }
    assert_eq!(-5, tree.get(&[1, 2, 3]));
    assert_eq!(6, tree.get(&[2, 2, 3]));

    let mut access = tree.random_access();
    access.set_position(&[0, 0, 0]);
    assert_eq!(Some(2), access.leaf_side());
    access.move_axis(-1, 1);
    assert_eq!(None, access.leaf_side());
    access.move_axis(3, 1);
    access.set_position(&[2, 2, 3]);
    assert_eq!(6, access.get());
}

/// Writes must keep the exact bits of a value, even when it compares equal
/// to what is already stored.
#[test]
fn test_ntree_writes_keep_bits() {
    let mut tree = NtreeImg::<f64>::new(&[4, 4]).unwrap();
    {
        let mut access = tree.random_access_mut();
        access.set_position(&[1, 1]);
        assert_eq!(Some(4), access.leaf_side());
        access.set(-0.0);
    }
    assert!(tree.get(&[1, 1]).is_sign_negative());
    assert!(!tree.get(&[1, 0]).is_sign_negative());

    tree.fill(&interval([2, 2], [3, 3]), -0.0).unwrap();
    assert!(tree.get(&[3, 2]).is_sign_negative());
    assert!(!tree.get(&[1, 2]).is_sign_negative());

    let mut flat = crate::img::ArrayImg::<f64>::new(&[4, 4]).unwrap();
    flat.set(&[1, 1], -0.0);
    assert_eq!(flat.get(&[1, 1]).to_bits(), tree.get(&[1, 1]).to_bits());
}

#[test]
#[should_panic(expected = "granularity")]
fn test_ntree_access_set_panics() {
    let mut tree = NtreeImg::<u8>::with_granularity(&[4, 4], 0, 2).unwrap();
    let mut access = tree.random_access_mut();
    access.set_position(&[1, 1]);
    access.set(1);
}

#[test]
fn test_ntree_cursor_write() {
    let mut tree = NtreeImg::<u8>::new(&[3, 5]).unwrap();
    {
        let mut cursor = tree.cursor_mut();
        let mut i = 0;
        while Cursor::<u8>::has_next(&cursor) {
            cursor.advance();
            cursor.set(i);
            i += 1;
        }
    }
    let mut cursor = tree.cursor();
    for expected in 0..15 {
        assert_eq!(Some(expected), cursor.next_sample());
    }
    assert_eq!(None, cursor.next_sample());
}

proptest! {
    /// Tests that random fills and compaction agree with a naive model.
    #[test]
    fn test_ntree_fill_model(
        dims in prop::collection::vec(1..7_i64, 1..=3),
        fills in prop::collection::vec((any::<u64>(), any::<u64>(), 0..4_u8), 0..8),
    ) {
        let domain = Interval::from_dims(&dims).unwrap();
        let mut tree = NtreeImg::<u8>::new(&dims).unwrap();
        let mut model = HashMap::new();
        for (a, b, value) in fills {
            let corner_a = LPos::from_fn(dims.len(), |d| ((a >> (8 * d)) % dims[d] as u64) as i64);
            let corner_b = LPos::from_fn(dims.len(), |d| ((b >> (8 * d)) % dims[d] as u64) as i64);
            let region = Interval::span(&corner_a, &corner_b);
            tree.fill(&region, value).unwrap();
            for pos in region.iter() {
                model.insert(pos, value);
            }
        }
        let check = |tree: &NtreeImg<u8>| {
            for pos in domain.iter() {
                assert_eq!(model.get(&pos).copied().unwrap_or(0), tree.get(&pos));
            }
        };
        check(&tree);
        let count = tree.node_count();
        tree.compact();
        check(&tree);
        prop_assert!(tree.node_count() <= count);
        prop_assert_eq!(tree.node_count(), tree.arena_len());
    }
}
