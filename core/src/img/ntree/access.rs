use std::ops::{Deref, DerefMut};

use super::{NtreeImg, NtreeNode};
use crate::error::{NtreeError, NtreeResult};
use crate::pos::LPos;
use crate::sampler::{Localizable, Positionable, RandomAccess, RandomAccessMut};
use crate::types::Sample;

/// Sentinel leaf index for a sampler outside the domain.
const NO_LEAF: usize = usize::MAX;

/// Random-access sampler over an [`NtreeImg`].
///
/// The sampler caches the leaf it is in along with that leaf's cube, and
/// only walks the tree again when it leaves the cube.
#[derive(Debug, Clone)]
pub struct NtreeAccess<R> {
    img: R,
    position: LPos,
    leaf: usize,
    leaf_min: Vec<i64>,
    leaf_side: i64,
}

impl<T: Sample, R: Deref<Target = NtreeImg<T>>> NtreeAccess<R> {
    pub(super) fn new(img: R) -> Self {
        let ndim = img.interval.ndim();
        let mut ret = Self {
            img,
            position: LPos::origin(ndim),
            leaf: NO_LEAF,
            leaf_min: vec![0; ndim],
            leaf_side: 0,
        };
        ret.update_leaf();
        ret
    }

    /// Returns the side of the uniform region around the current position,
    /// or `None` if the sampler is outside the domain.
    pub fn leaf_side(&self) -> Option<i64> {
        (self.leaf != NO_LEAF).then(|| self.leaf_side)
    }

    fn update_leaf(&mut self) {
        if !self.img.interval.contains(&self.position) {
            self.leaf = NO_LEAF;
            return;
        }
        let (leaf, side) = self.img.descend(&self.position, &mut self.leaf_min);
        self.leaf = leaf;
        self.leaf_side = side;
    }

    #[inline]
    fn in_leaf_along(&self, d: usize) -> bool {
        let offset = self.position[d] - self.leaf_min[d];
        self.leaf != NO_LEAF && 0 <= offset && offset < self.leaf_side
    }
}

impl<R> Localizable for NtreeAccess<R> {
    #[inline]
    fn position(&self) -> &[i64] {
        &self.position
    }
}
impl<T: Sample, R: Deref<Target = NtreeImg<T>>> Positionable for NtreeAccess<R> {
    #[inline]
    fn move_axis(&mut self, distance: i64, d: usize) {
        self.position[d] += distance;
        if !self.in_leaf_along(d) {
            self.update_leaf();
        }
    }
    fn set_position(&mut self, pos: &[i64]) {
        self.position.set_from(pos);
        if !(0..pos.len()).all(|d| self.in_leaf_along(d)) {
            self.update_leaf();
        }
    }
}
impl<T: Sample, R: Deref<Target = NtreeImg<T>>> RandomAccess<T> for NtreeAccess<R> {
    #[inline]
    fn get(&self) -> T {
        if self.leaf == NO_LEAF {
            panic!("Position {} outside {}", self.position, self.img.interval);
        }
        self.img.leaf_value(self.leaf)
    }
}

impl<T: Sample, R: DerefMut<Target = NtreeImg<T>>> NtreeAccess<R> {
    /// Overwrites the sample at the current position, or returns an error if
    /// that would split a node below the tree's granularity.
    pub fn try_set(&mut self, value: T) -> NtreeResult<()> {
        if self.leaf == NO_LEAF {
            return Err(NtreeError::OutsideDomain);
        }
        if self.leaf_side == 1 {
            self.img.set_unit_leaf(self.leaf, value);
            return Ok(());
        }
        // Compare raw bits, so that values that are equal but not identical
        // (such as `0.0` and `-0.0`) are still written.
        let raw = value.to_raw() & self.img.packing.mask();
        if self.img.nodes[self.leaf] == NtreeNode::Leaf(raw) {
            return Ok(());
        }
        self.img.try_set(&self.position, value)?;
        self.update_leaf();
        Ok(())
    }
}
impl<T: Sample, R: DerefMut<Target = NtreeImg<T>>> RandomAccessMut<T> for NtreeAccess<R> {
    /// Overwrites the sample at the current position.
    ///
    /// # Panics
    ///
    /// This method panics if the write would split a node below the tree's
    /// granularity, or if the position lies outside the domain. Use
    /// [`NtreeAccess::try_set()`] to handle those cases.
    fn set(&mut self, value: T) {
        if let Err(e) = self.try_set(value) {
            panic!("Cannot write {:?} at {}: {}", value, self.position, e);
        }
    }
}
