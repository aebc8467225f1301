//! Byte-slot array with a runtime item size
//!
//! `RawArray` is the untyped counterpart of [`GenericArray`](super::GenericArray)
//! for callers that decide the element layout at runtime. Every element is an
//! opaque `item_size`-byte slot; the array owns the bytes but not whatever those
//! bytes refer to, so removal and teardown accept an optional callback that sees
//! each slot before it is discarded.

use std::cmp::Ordering;

use log::{debug, trace, warn};

use super::array::{DEFAULT_MAX_ITEMS, grown_capacity};
use super::search;
use crate::error::{Error, Result};

/// Growable array of fixed-size byte slots
#[derive(Clone)]
pub struct RawArray {
    /// Exactly `len * item_size` bytes of live slots
    buffer: Vec<u8>,
    item_size: usize,
    max_items: usize,
}

impl RawArray {
    /// Create an empty array of `item_size`-byte slots with the default item limit
    ///
    /// # Panics
    /// Panics if `item_size` is zero.
    pub fn new(item_size: usize) -> Self {
        Self::with_limit(item_size, DEFAULT_MAX_ITEMS)
    }

    /// Create an empty array holding at most `max_items` slots
    ///
    /// # Panics
    /// Panics if `item_size` is zero.
    pub fn with_limit(item_size: usize, max_items: usize) -> Self {
        assert!(item_size > 0, "item size must be positive");
        RawArray {
            buffer: Vec::new(),
            item_size,
            max_items,
        }
    }

    /// Size of one slot in bytes
    #[inline]
    pub fn item_size(&self) -> usize {
        self.item_size
    }

    /// Number of live slots
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len() / self.item_size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Number of slots currently allocated
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity() / self.item_size
    }

    #[inline]
    pub fn limit(&self) -> usize {
        self.max_items
    }

    #[inline]
    fn span(&self, index: usize) -> std::ops::Range<usize> {
        index * self.item_size..(index + 1) * self.item_size
    }

    /// Ensure room for at least `min_capacity` slots
    pub fn reserve(&mut self, min_capacity: usize) -> Result<()> {
        let current = self.capacity();
        if min_capacity <= current {
            return Ok(());
        }
        let limit_err = Error::CapacityLimit {
            requested: min_capacity,
            limit: self.max_items,
        };
        if min_capacity > self.max_items {
            warn!(
                "raw array growth to {} slots refused, limit is {}",
                min_capacity, self.max_items
            );
            return Err(limit_err);
        }

        let target = grown_capacity(current, min_capacity, self.max_items);
        let Some(target_bytes) = target.checked_mul(self.item_size) else {
            warn!("raw array growth to {} slots overflows", target);
            return Err(limit_err);
        };
        trace!(
            "growing raw array of {}-byte slots from {} to {} slots",
            self.item_size, current, target
        );
        self.buffer
            .try_reserve_exact(target_bytes - self.buffer.len())
            .map_err(|e| {
                warn!("raw array growth to {} slots failed: {}", target, e);
                Error::from(e)
            })
    }

    #[inline]
    fn check_index(&self, index: usize) -> Result<()> {
        let len = self.len();
        if index < len {
            Ok(())
        } else {
            Err(Error::Range { index, len })
        }
    }

    /// Open a zero-filled slot at `index` and return it for the caller to fill
    pub fn insert_raw(&mut self, index: usize) -> Result<&mut [u8]> {
        let len = self.len();
        if index > len {
            return Err(Error::Range { index, len });
        }
        self.reserve(len + 1)?;

        let at = index * self.item_size;
        self.buffer.resize(self.buffer.len() + self.item_size, 0);
        self.buffer[at..].rotate_right(self.item_size);
        let span = self.span(index);
        Ok(&mut self.buffer[span])
    }

    /// Copy `item` into a new slot at `index`
    ///
    /// # Panics
    /// Panics if `item` is not exactly `item_size` bytes long.
    pub fn insert(&mut self, index: usize, item: &[u8]) -> Result<()> {
        assert_eq!(item.len(), self.item_size, "item has the wrong size");
        self.insert_raw(index)?.copy_from_slice(item);
        Ok(())
    }

    /// Append a copy of `item`, returning its index
    pub fn push(&mut self, item: &[u8]) -> Result<usize> {
        let index = self.len();
        self.insert(index, item)?;
        Ok(index)
    }

    /// Remove the slot at `index`
    pub fn remove(&mut self, index: usize) -> Result<()> {
        self.remove_with(index, |_| {})
    }

    /// Hand the slot at `index` to `teardown`, then remove it
    pub fn remove_with(&mut self, index: usize, teardown: impl FnOnce(&mut [u8])) -> Result<()> {
        self.check_index(index)?;
        let span = self.span(index);
        teardown(&mut self.buffer[span.clone()]);
        self.buffer[span.start..].rotate_left(self.item_size);
        self.buffer.truncate(self.buffer.len() - self.item_size);
        Ok(())
    }

    /// Remove all slots. Capacity is kept.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Hand every slot to `teardown` in index order, then remove them all
    pub fn clear_with(&mut self, mut teardown: impl FnMut(&mut [u8])) {
        for slot in self.buffer.chunks_exact_mut(self.item_size) {
            teardown(slot);
        }
        self.buffer.clear();
    }

    /// Consume the array, handing every slot to `teardown` in index order
    pub fn finalize(mut self, teardown: impl FnMut(&mut [u8])) {
        self.clear_with(teardown);
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        (index < self.len()).then(|| &self.buffer[self.span(index)])
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut [u8]> {
        if index < self.len() {
            let span = self.span(index);
            Some(&mut self.buffer[span])
        } else {
            None
        }
    }

    /// Iterate over the live slots
    pub fn iter(&self) -> std::slice::ChunksExact<'_, u8> {
        self.buffer.chunks_exact(self.item_size)
    }

    /// Index of a slot given a slice that starts inside this array
    pub fn index_of(&self, item: &[u8]) -> Option<usize> {
        let base = self.buffer.as_ptr() as usize;
        let offset = (item.as_ptr() as usize).checked_sub(base)?;
        if offset % self.item_size != 0 {
            return None;
        }
        let index = offset / self.item_size;
        (index < self.len()).then_some(index)
    }

    fn swap_items(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let (lo, hi) = (a.min(b), a.max(b));
        let size = self.item_size;
        let (head, tail) = self.buffer.split_at_mut(hi * size);
        head[lo * size..(lo + 1) * size].swap_with_slice(&mut tail[..size]);
    }

    /// Reorder all slots by `cmp`
    ///
    /// Heapsort over the slots in place: not stable, deterministic, and never
    /// allocates.
    pub fn sort(&mut self, mut cmp: impl FnMut(&[u8], &[u8]) -> Ordering) {
        let len = self.len();
        for root in (0..len / 2).rev() {
            self.sift_down(root, len, &mut cmp);
        }
        for end in (1..len).rev() {
            self.swap_items(0, end);
            self.sift_down(0, end, &mut cmp);
        }
    }

    fn sift_down(
        &mut self,
        mut root: usize,
        end: usize,
        cmp: &mut impl FnMut(&[u8], &[u8]) -> Ordering,
    ) {
        loop {
            let mut child = 2 * root + 1;
            if child >= end {
                return;
            }
            if child + 1 < end
                && cmp(&self.buffer[self.span(child)], &self.buffer[self.span(child + 1)])
                    == Ordering::Less
            {
                child += 1;
            }
            if cmp(&self.buffer[self.span(root)], &self.buffer[self.span(child)]) != Ordering::Less
            {
                return;
            }
            self.swap_items(root, child);
            root = child;
        }
    }

    /// Insert a copy of `item` before the first slot not less than it
    pub fn insert_sorted(
        &mut self,
        item: &[u8],
        mut cmp: impl FnMut(&[u8], &[u8]) -> Ordering,
    ) -> Result<usize> {
        let index = search::lower_bound(0, self.len(), |i| cmp(&self.buffer[self.span(i)], item));
        self.insert(index, item)?;
        Ok(index)
    }

    /// Insert a copy of `item` at `hint` if that is its lower bound, otherwise
    /// search for it
    pub fn insert_smart(
        &mut self,
        hint: usize,
        item: &[u8],
        mut cmp: impl FnMut(&[u8], &[u8]) -> Ordering,
    ) -> Result<usize> {
        let len = self.len();
        let index = if search::hint_is_lower_bound(hint, len, |i| {
            cmp(&self.buffer[self.span(i)], item)
        }) {
            hint
        } else {
            let index = search::lower_bound(0, len, |i| cmp(&self.buffer[self.span(i)], item));
            debug!("insertion hint {} rejected, sorted position is {}", hint, index);
            index
        };
        self.insert(index, item)?;
        Ok(index)
    }

    /// Restore order after the slot at `index` was modified in place
    pub fn move_sorted(
        &mut self,
        index: usize,
        mut cmp: impl FnMut(&[u8], &[u8]) -> Ordering,
    ) -> Result<usize> {
        self.check_index(index)?;
        let moved = self.span(index);
        let target = search::relocation_target(self.len(), index, |i| {
            cmp(&self.buffer[self.span(i)], &self.buffer[moved.clone()])
        });

        let size = self.item_size;
        if target < index {
            self.buffer[target * size..moved.end].rotate_right(size);
        } else if target > index {
            self.buffer[moved.start..(target + 1) * size].rotate_left(size);
        }
        if target != index {
            debug!("moved sorted slot from {} to {}", index, target);
        }
        Ok(target)
    }
}

impl std::fmt::Debug for RawArray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawArray")
            .field("item_size", &self.item_size)
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}
