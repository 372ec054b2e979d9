//! Sparse backend: a 2^n-ary tree of uniform regions.
//!
//! The root covers the smallest power-of-two hypercube containing the
//! domain. Each node is either a leaf holding one value for its whole cube,
//! or a branch with 2^n children, one per half along each dimension. Bit `d`
//! of a child's index is set if it lies in the upper half along dimension
//! `d`.
//!
//! Nodes live in a flat arena and refer to their children by index.
//! Overwriting a branch leaves its old descendants unreachable until the
//! next [`NtreeImg::compact()`].

use itertools::Itertools;
use log::{debug, trace, warn};
use std::marker::PhantomData;

mod access;

pub use access::NtreeAccess;

use super::{Bounded, IterableInterval, IterableIntervalMut, RandomAccessible, RandomAccessibleMut};
use crate::codec::BitPacking;
use crate::error::{ConstructionError, ConstructionResult, NtreeError, NtreeResult};
use crate::interval::{validate_dims, Interval};
use crate::math::ceil_log_base_2;
use crate::pos::LPos;
use crate::sampler::IntervalCursor;
use crate::types::Sample;

/// Maximum number of dimensions of a tree (each branch has 2^n children).
pub const MAX_NTREE_NDIM: usize = 16;

/// Index of the root node in the arena.
const ROOT: usize = 0;

/// Node in the arena of an [`NtreeImg`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub(crate) enum NtreeNode {
    /// Uniform region, holding the raw bits of its value.
    Leaf(u64),
    /// Subdivided region, holding the arena index of its first child. The
    /// other children follow contiguously.
    Branch(usize),
}

/// Region write, with its upper bounds stretched to the root cube wherever
/// the region touches the upper edge of the domain.
#[derive(Debug)]
struct FillTarget {
    min: Vec<i64>,
    max: Vec<i64>,
    raw: u64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Overlap {
    None,
    Partial,
    Full,
}

impl FillTarget {
    fn overlap(&self, min: &[i64], side: i64) -> Overlap {
        let mut full = true;
        for d in 0..min.len() {
            let lo = min[d];
            let hi = min[d] + side - 1;
            if self.max[d] < lo || hi < self.min[d] {
                return Overlap::None;
            }
            if lo < self.min[d] || self.max[d] < hi {
                full = false;
            }
        }
        if full {
            Overlap::Full
        } else {
            Overlap::Partial
        }
    }
}

/// Backend storing uniform regions as leaves of a sparse tree.
///
/// Writes split leaves as needed, but never below the configured
/// granularity; a write that would do so fails with
/// [`NtreeError::GranularityExceeded`] and leaves the tree unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NtreeImg<T: Sample> {
    interval: Interval,
    side: i64,
    granularity: i64,
    branching: usize,
    packing: BitPacking,
    nodes: Vec<NtreeNode>,
    _phantom: PhantomData<T>,
}

impl<T: Sample> NtreeImg<T> {
    /// Creates a tree with the given size, filled with `T::default()`, that
    /// can be written one element at a time.
    pub fn new(dims: &[i64]) -> ConstructionResult<Self> {
        Self::with_granularity(dims, T::default(), 1)
    }
    /// Creates a tree with the given size, filled with `value`, whose leaves
    /// never get smaller than `granularity` along each dimension.
    pub fn with_granularity(dims: &[i64], value: T, granularity: i64) -> ConstructionResult<Self> {
        validate_dims(dims)?;
        let packing = T::CODEC.packing()?;
        if dims.len() > MAX_NTREE_NDIM {
            return Err(ConstructionError::TooLarge);
        }
        if granularity <= 0 || granularity & (granularity - 1) != 0 {
            return Err(ConstructionError::InvalidGranularity(granularity));
        }
        let max_dim = dims.iter().copied().max().unwrap_or(1);
        let depth = ceil_log_base_2(max_dim as u64);
        if depth >= i64::BITS - 1 {
            return Err(ConstructionError::TooLarge);
        }
        let side = 1_i64 << depth;
        debug!(
            "Created {:?} tree image with root side {} and granularity {}",
            dims, side, granularity,
        );
        Ok(Self {
            interval: Interval::from_dims(dims)?,
            side,
            granularity,
            branching: 1 << dims.len(),
            packing,
            nodes: vec![NtreeNode::Leaf(value.to_raw() & packing.mask())],
            _phantom: PhantomData,
        })
    }

    /// Returns the side of the root cube.
    pub fn side(&self) -> i64 {
        self.side
    }
    /// Returns the smallest side a leaf may have.
    pub fn granularity(&self) -> i64 {
        self.granularity
    }
    /// Returns the number of reachable nodes.
    pub fn node_count(&self) -> usize {
        self.count_nodes(ROOT)
    }
    /// Returns the number of nodes in the arena, including unreachable ones.
    pub fn arena_len(&self) -> usize {
        self.nodes.len()
    }
    /// Returns the number of branch levels between the root and the deepest
    /// leaf. A tree that is a single leaf has depth 0.
    pub fn depth(&self) -> u32 {
        self.node_depth(ROOT)
    }
    /// Returns every reachable leaf, clipped to the domain, with its value.
    /// Leaves that lie entirely outside the domain are skipped.
    pub fn leaves(&self) -> Vec<(Interval, T)> {
        let mut ret = vec![];
        self.collect_leaves(ROOT, LPos::origin(self.interval.ndim()), self.side, &mut ret);
        ret
    }

    /// Returns the sample at `pos`.
    ///
    /// # Panics
    ///
    /// This method panics if `pos` lies outside the domain.
    pub fn get(&self, pos: &[i64]) -> T {
        assert!(
            self.interval.contains(pos),
            "Position {} outside {}",
            LPos::from(pos),
            self.interval,
        );
        let mut min = vec![0; pos.len()];
        let (node, _) = self.descend(pos, &mut min);
        self.leaf_value(node)
    }

    /// Overwrites the sample at `pos`.
    pub fn try_set(&mut self, pos: &[i64], value: T) -> NtreeResult<()> {
        if pos.len() != self.interval.ndim() {
            return Err(NtreeError::OutsideDomain);
        }
        self.fill(&Interval::single_cell(pos.into()), value)
    }

    /// Overwrites every sample in `region`.
    ///
    /// Nothing is written if this returns an error.
    pub fn fill(&mut self, region: &Interval, value: T) -> NtreeResult<()> {
        if region.ndim() != self.interval.ndim() || !self.interval.contains_interval(region) {
            return Err(NtreeError::OutsideDomain);
        }
        // The part of the root cube past the domain is never observed, so a
        // region touching the upper edge may as well cover it.
        let max = (0..region.ndim())
            .map(|d| match region.max_at(d) {
                hi if hi == self.interval.max_at(d) => self.side - 1,
                hi => hi,
            })
            .collect();
        let target = FillTarget {
            min: region.min().to_vec(),
            max,
            raw: value.to_raw() & self.packing.mask(),
        };

        let origin = vec![0; self.interval.ndim()];
        if let Err(e) = self.check_fill(ROOT, &origin, self.side, &target) {
            warn!("Rejected fill of {} with {:?}: {}", region, value, e);
            return Err(e);
        }
        self.apply_fill(ROOT, &origin, self.side, &target);
        Ok(())
    }

    /// Merges every branch whose children are leaves with the same value and
    /// drops unreachable nodes from the arena.
    pub fn compact(&mut self) {
        let before = self.nodes.len();
        let mut nodes = Vec::with_capacity(before);
        nodes.push(NtreeNode::Leaf(0));
        let root = self.rebuild(ROOT, &mut nodes);
        nodes[ROOT] = root;
        self.nodes = nodes;
        debug!("Compacted tree from {} to {} nodes", before, self.nodes.len());
    }

    /// Finds the leaf containing `pos`, writing its minimum corner into `min`
    /// and returning its arena index and side.
    pub(crate) fn descend(&self, pos: &[i64], min: &mut [i64]) -> (usize, i64) {
        min.fill(0);
        let mut node = ROOT;
        let mut side = self.side;
        while let NtreeNode::Branch(first) = self.nodes[node] {
            side /= 2;
            let mut child = 0;
            for d in 0..pos.len() {
                if pos[d] >= min[d] + side {
                    child |= 1 << d;
                    min[d] += side;
                }
            }
            node = first + child;
        }
        (node, side)
    }

    pub(crate) fn leaf_value(&self, node: usize) -> T {
        match self.nodes[node] {
            NtreeNode::Leaf(raw) => T::from_raw(raw),
            NtreeNode::Branch(_) => panic!("Node {} is not a leaf", node),
        }
    }

    /// Overwrites a leaf of side 1 in place.
    pub(crate) fn set_unit_leaf(&mut self, node: usize, value: T) {
        debug_assert!(matches!(self.nodes[node], NtreeNode::Leaf(_)));
        self.nodes[node] = NtreeNode::Leaf(value.to_raw() & self.packing.mask());
    }

    fn child_min(min: &[i64], child: usize, half: i64) -> Vec<i64> {
        min.iter()
            .enumerate()
            .map(|(d, &lo)| if child & (1 << d) != 0 { lo + half } else { lo })
            .collect()
    }

    fn check_fill(&self, node: usize, min: &[i64], side: i64, target: &FillTarget) -> NtreeResult<()> {
        if target.overlap(min, side) != Overlap::Partial {
            return Ok(());
        }
        match self.nodes[node] {
            NtreeNode::Leaf(raw) if raw == target.raw => Ok(()),
            NtreeNode::Leaf(_) => self.check_split(min, side, target),
            NtreeNode::Branch(first) => {
                let half = side / 2;
                (0..self.branching).try_for_each(|c| {
                    self.check_fill(first + c, &Self::child_min(min, c, half), half, target)
                })
            }
        }
    }

    /// Checks that a uniform leaf partially covered by `target` can be split
    /// as far as needed.
    fn check_split(&self, min: &[i64], side: i64, target: &FillTarget) -> NtreeResult<()> {
        if side <= self.granularity {
            return Err(NtreeError::GranularityExceeded {
                side,
                granularity: self.granularity,
            });
        }
        let half = side / 2;
        (0..self.branching).try_for_each(|c| {
            let child_min = Self::child_min(min, c, half);
            match target.overlap(&child_min, half) {
                Overlap::Partial => self.check_split(&child_min, half, target),
                _ => Ok(()),
            }
        })
    }

    fn apply_fill(&mut self, node: usize, min: &[i64], side: i64, target: &FillTarget) {
        let first = match (target.overlap(min, side), self.nodes[node]) {
            (Overlap::None, _) => return,
            (Overlap::Full, _) => {
                self.nodes[node] = NtreeNode::Leaf(target.raw);
                return;
            }
            (Overlap::Partial, NtreeNode::Branch(first)) => first,
            (Overlap::Partial, NtreeNode::Leaf(raw)) if raw == target.raw => return,
            (Overlap::Partial, leaf @ NtreeNode::Leaf(_)) => {
                let first = self.nodes.len();
                self.nodes.extend(std::iter::repeat(leaf).take(self.branching));
                self.nodes[node] = NtreeNode::Branch(first);
                trace!("Split node {} of side {} at {:?}", node, side, min);
                first
            }
        };
        let half = side / 2;
        for c in 0..self.branching {
            self.apply_fill(first + c, &Self::child_min(min, c, half), half, target);
        }
    }

    /// Copies the subtree rooted at `node` into `out` with uniform branches
    /// merged, and returns its new root (not yet pushed).
    fn rebuild(&self, node: usize, out: &mut Vec<NtreeNode>) -> NtreeNode {
        match self.nodes[node] {
            leaf @ NtreeNode::Leaf(_) => leaf,
            NtreeNode::Branch(first) => {
                let children = (first..first + self.branching)
                    .map(|child| self.rebuild(child, out))
                    .collect_vec();
                if matches!(children[0], NtreeNode::Leaf(_)) && children.iter().all_equal() {
                    return children[0];
                }
                let new_first = out.len();
                out.extend(children);
                NtreeNode::Branch(new_first)
            }
        }
    }

    fn count_nodes(&self, node: usize) -> usize {
        match self.nodes[node] {
            NtreeNode::Leaf(_) => 1,
            NtreeNode::Branch(first) => {
                1 + (first..first + self.branching)
                    .map(|child| self.count_nodes(child))
                    .sum::<usize>()
            }
        }
    }

    fn node_depth(&self, node: usize) -> u32 {
        match self.nodes[node] {
            NtreeNode::Leaf(_) => 0,
            NtreeNode::Branch(first) => {
                1 + (first..first + self.branching)
                    .map(|child| self.node_depth(child))
                    .max()
                    .unwrap_or(0)
            }
        }
    }

    fn collect_leaves(&self, node: usize, min: LPos, side: i64, out: &mut Vec<(Interval, T)>) {
        match self.nodes[node] {
            NtreeNode::Leaf(raw) => {
                let max = &min + (side - 1);
                let cube = Interval::new(min, max).expect("Tree node is never empty");
                if let Some(visible) = cube.intersection(&self.interval) {
                    out.push((visible, T::from_raw(raw)));
                }
            }
            NtreeNode::Branch(first) => {
                let half = side / 2;
                for c in 0..self.branching {
                    let child_min = Self::child_min(&min, c, half);
                    self.collect_leaves(first + c, child_min.into(), half, out);
                }
            }
        }
    }
}

impl<T: Sample> Bounded for NtreeImg<T> {
    #[inline]
    fn interval(&self) -> &Interval {
        &self.interval
    }
}

impl<T: Sample> RandomAccessible<T> for NtreeImg<T> {
    type Access<'a> = NtreeAccess<&'a NtreeImg<T>>;

    fn random_access(&self) -> Self::Access<'_> {
        NtreeAccess::new(self)
    }
}
impl<T: Sample> RandomAccessibleMut<T> for NtreeImg<T> {
    type AccessMut<'a> = NtreeAccess<&'a mut NtreeImg<T>>;

    fn random_access_mut(&mut self) -> Self::AccessMut<'_> {
        NtreeAccess::new(self)
    }
}
impl<T: Sample> IterableInterval<T> for NtreeImg<T> {
    type Cursor<'a> = IntervalCursor<NtreeAccess<&'a NtreeImg<T>>>;

    fn cursor(&self) -> Self::Cursor<'_> {
        IntervalCursor::new(NtreeAccess::new(self), self.interval.clone())
    }
}
impl<T: Sample> IterableIntervalMut<T> for NtreeImg<T> {
    type CursorMut<'a> = IntervalCursor<NtreeAccess<&'a mut NtreeImg<T>>>;

    fn cursor_mut(&mut self) -> Self::CursorMut<'_> {
        let interval = self.interval.clone();
        IntervalCursor::new(NtreeAccess::new(self), interval)
    }
}

#[cfg(test)]
mod tests;
