//! Typed growable array with order-preserving insertion
//!
//! `GenericArray<T>` is the container the list and grid controls keep their rows
//! and cells in. Besides plain indexed insert/remove it can keep its contents
//! sorted by a caller-supplied comparator:
//!
//! - [`GenericArray::insert_sorted`] searches for the lower bound and inserts there
//! - [`GenericArray::insert_smart`] trusts a caller hint when both neighbors agree
//! - [`GenericArray::move_sorted`] repositions one element after its key changed
//!
//! All growth is fallible and bounded by a per-array item limit.

use std::cmp::Ordering;
use std::mem;
use std::ops::Index;

use log::{debug, trace, warn};

use super::search;
use crate::error::{Error, Result};

/// Item limit matching the 16-bit item counts of older control toolkits
pub const LEGACY_MAX_ITEMS: usize = u16::MAX as usize;

/// Item limit applied by [`GenericArray::new`]
#[cfg(feature = "legacy-limits")]
pub const DEFAULT_MAX_ITEMS: usize = LEGACY_MAX_ITEMS;
/// Item limit applied by [`GenericArray::new`]
#[cfg(not(feature = "legacy-limits"))]
pub const DEFAULT_MAX_ITEMS: usize = isize::MAX as usize;

/// Smallest capacity allocated on first growth
pub(crate) const MIN_CAPACITY: usize = 4;

/// Capacity to grow to so that `min_capacity` fits, doubling when possible
pub(crate) fn grown_capacity(current: usize, min_capacity: usize, max_items: usize) -> usize {
    min_capacity
        .max(current.saturating_mul(2))
        .max(MIN_CAPACITY)
        .min(max_items)
}

/// Growable array of `T` that can maintain a comparator-defined order
#[derive(Clone)]
pub struct GenericArray<T> {
    /// Live elements, front-packed
    items: Vec<T>,
    /// Upper bound on `items.len()`
    max_items: usize,
}

impl<T> GenericArray<T> {
    /// Create an empty array with the default item limit
    ///
    /// # Panics
    /// Panics if `T` is zero-sized.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_MAX_ITEMS)
    }

    /// Create an empty array holding at most `max_items` elements
    ///
    /// # Panics
    /// Panics if `T` is zero-sized.
    pub fn with_limit(max_items: usize) -> Self {
        assert!(mem::size_of::<T>() > 0, "array items must not be zero-sized");
        GenericArray {
            items: Vec::new(),
            max_items,
        }
    }

    /// Size of one element in bytes
    #[inline]
    pub const fn item_size(&self) -> usize {
        mem::size_of::<T>()
    }

    /// Number of live elements
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the array is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of element slots currently allocated
    #[inline]
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Maximum number of elements this array accepts
    #[inline]
    pub fn limit(&self) -> usize {
        self.max_items
    }

    /// Ensure room for at least `min_capacity` elements
    ///
    /// Grows to at least twice the current capacity so repeated appends are
    /// amortized O(1). On failure the array is left unchanged.
    pub fn reserve(&mut self, min_capacity: usize) -> Result<()> {
        let current = self.items.capacity();
        if min_capacity <= current {
            return Ok(());
        }
        if min_capacity > self.max_items {
            warn!(
                "array growth to {} items refused, limit is {}",
                min_capacity, self.max_items
            );
            return Err(Error::CapacityLimit {
                requested: min_capacity,
                limit: self.max_items,
            });
        }

        let target = grown_capacity(current, min_capacity, self.max_items);
        trace!(
            "growing array of {}-byte items from {} to {} slots",
            self.item_size(),
            current,
            target
        );
        self.items
            .try_reserve_exact(target - self.items.len())
            .map_err(|e| {
                warn!("array growth to {} slots failed: {}", target, e);
                Error::from(e)
            })
    }

    #[inline]
    fn reserve_one(&mut self) -> Result<()> {
        self.reserve(self.items.len() + 1)
    }

    #[inline]
    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(Error::Range {
                index,
                len: self.items.len(),
            })
        }
    }

    /// Open a slot at `index`, fill it with `make()` and return it
    ///
    /// Elements at and after `index` shift right. Nothing is constructed when
    /// the index is invalid or growth fails.
    pub fn insert_with(&mut self, index: usize, make: impl FnOnce() -> T) -> Result<&mut T> {
        if index > self.items.len() {
            return Err(Error::Range {
                index,
                len: self.items.len(),
            });
        }
        self.reserve_one()?;
        self.items.insert(index, make());
        Ok(&mut self.items[index])
    }

    /// Insert `item` at `index`, shifting later elements right
    pub fn insert(&mut self, index: usize, item: T) -> Result<()> {
        self.insert_with(index, || item).map(|_| ())
    }

    /// Append `item`, returning its index
    pub fn push(&mut self, item: T) -> Result<usize> {
        let index = self.items.len();
        self.insert(index, item)?;
        Ok(index)
    }

    /// Remove and return the element at `index`, shifting later elements left
    pub fn remove(&mut self, index: usize) -> Result<T> {
        self.check_index(index)?;
        Ok(self.items.remove(index))
    }

    /// Drop all elements in index order. Capacity is kept.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Hand every element to `teardown` in index order, leaving the array empty
    pub fn clear_with(&mut self, mut teardown: impl FnMut(T)) {
        for item in self.items.drain(..) {
            teardown(item);
        }
    }

    /// Get a reference to the element at `index`
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Get a mutable reference to the element at `index`
    ///
    /// When the change affects the sort key, follow up with
    /// [`GenericArray::move_sorted`].
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// View the live elements
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Iterate over the live elements
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Index of an element given a reference into this array
    ///
    /// Returns `None` if `item` does not point at one of the live elements.
    pub fn index_of(&self, item: &T) -> Option<usize> {
        let base = self.items.as_ptr() as usize;
        let addr = item as *const T as usize;
        let offset = addr.checked_sub(base)?;
        if offset % self.item_size() != 0 {
            return None;
        }
        let index = offset / self.item_size();
        (index < self.items.len()).then_some(index)
    }

    /// Reorder all elements by `cmp`
    ///
    /// Not stable, but deterministic for a given input and comparator.
    pub fn sort(&mut self, cmp: impl FnMut(&T, &T) -> Ordering) {
        self.items.sort_unstable_by(cmp);
    }

    /// Insert `item` before the first element not less than it
    ///
    /// Returns the insertion index. On failure nothing is inserted.
    pub fn insert_sorted(
        &mut self,
        item: T,
        mut cmp: impl FnMut(&T, &T) -> Ordering,
    ) -> Result<usize> {
        let items = &self.items;
        let index = search::lower_bound(0, items.len(), |i| cmp(&items[i], &item));
        self.insert(index, item)?;
        Ok(index)
    }

    /// Insert `item` at `hint` if that is where [`GenericArray::insert_sorted`]
    /// would put it, otherwise search for the right place
    ///
    /// The hint is accepted exactly when it is the lower bound: the element
    /// before it is less than `item` and the element at it is not. Checking
    /// takes at most two comparisons. Returns the actual insertion index.
    pub fn insert_smart(
        &mut self,
        hint: usize,
        item: T,
        mut cmp: impl FnMut(&T, &T) -> Ordering,
    ) -> Result<usize> {
        let items = &self.items;
        let len = items.len();
        let index = if search::hint_is_lower_bound(hint, len, |i| cmp(&items[i], &item)) {
            hint
        } else {
            let index = search::lower_bound(0, len, |i| cmp(&items[i], &item));
            debug!("insertion hint {} rejected, sorted position is {}", hint, index);
            index
        };
        self.insert(index, item)?;
        Ok(index)
    }

    /// Restore order after the element at `index` was modified in place
    ///
    /// All other elements must still be ordered by `cmp`. The element ends up
    /// where removing it and calling [`GenericArray::insert_sorted`] would put
    /// it; the search starts next to its old position. Returns the new index.
    pub fn move_sorted(
        &mut self,
        index: usize,
        mut cmp: impl FnMut(&T, &T) -> Ordering,
    ) -> Result<usize> {
        self.check_index(index)?;
        let items = &self.items;
        let target =
            search::relocation_target(items.len(), index, |i| cmp(&items[i], &items[index]));

        if target < index {
            self.items[target..=index].rotate_right(1);
        } else if target > index {
            self.items[index..=target].rotate_left(1);
        }
        if target != index {
            debug!("moved sorted item from {} to {}", index, target);
        }
        Ok(target)
    }
}

impl<T> Default for GenericArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for GenericArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a GenericArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> TryFrom<Vec<T>> for GenericArray<T> {
    type Error = Error;

    /// Adopt `items` as-is, subject to the default item limit
    fn try_from(items: Vec<T>) -> Result<Self> {
        let mut array = Self::new();
        if items.len() > array.max_items {
            return Err(Error::CapacityLimit {
                requested: items.len(),
                limit: array.max_items,
            });
        }
        array.items = items;
        Ok(array)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for GenericArray<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}
