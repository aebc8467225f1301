//! Ordered search over index ranges
//!
//! Both array flavors keep their elements in caller-defined order, so the
//! searches here only see an index and a closure `cmp_at(i)` that compares the
//! element at `i` against the probe element. Every search returns a lower bound:
//! the first index whose element is not less than the probe.

use std::cmp::Ordering::{self, Less};

/// Binary search for the lower bound within `lo..hi`
pub(crate) fn lower_bound(
    mut lo: usize,
    mut hi: usize,
    mut cmp_at: impl FnMut(usize) -> Ordering,
) -> usize {
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if cmp_at(mid) == Less {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

/// Lower bound within `lo..hi`, probing forward from `lo` with doubling steps
/// before bisecting. Costs O(log d) comparisons where d is the distance from `lo`.
pub(crate) fn gallop_forward(lo: usize, hi: usize, mut cmp_at: impl FnMut(usize) -> Ordering) -> usize {
    // Everything in lo..start is known to be less than the probe
    let mut start = lo;
    let mut step = 1;
    let mut probe = lo;
    while probe < hi {
        if cmp_at(probe) != Less {
            return lower_bound(start, probe, &mut cmp_at);
        }
        start = probe + 1;
        probe = probe.saturating_add(step);
        step = step.saturating_mul(2);
    }
    lower_bound(start, hi, cmp_at)
}

/// Lower bound within `lo..hi`, probing backward from `hi` with doubling steps
/// before bisecting.
pub(crate) fn gallop_backward(lo: usize, hi: usize, mut cmp_at: impl FnMut(usize) -> Ordering) -> usize {
    // Everything in end..hi is known to be not less than the probe
    let mut end = hi;
    let mut step = 1;
    while end > lo {
        let probe = end - step.min(end - lo);
        if cmp_at(probe) == Less {
            return lower_bound(probe + 1, end, &mut cmp_at);
        }
        end = probe;
        step = step.saturating_mul(2);
    }
    lo
}

/// Check whether `hint` is exactly the lower bound of the probe in `0..len`.
///
/// Only the two would-be neighbors are compared.
pub(crate) fn hint_is_lower_bound(
    hint: usize,
    len: usize,
    mut cmp_at: impl FnMut(usize) -> Ordering,
) -> bool {
    hint <= len
        && (hint == 0 || cmp_at(hint - 1) == Less)
        && (hint == len || cmp_at(hint) != Less)
}

/// Final index of the element at `index` once it is taken out and inserted
/// again at its lower bound.
///
/// `cmp_at(i)` compares element `i` against the element at `index`; it is never
/// called with `index` itself. All other elements must already be in order.
pub(crate) fn relocation_target(
    len: usize,
    index: usize,
    mut cmp_at: impl FnMut(usize) -> Ordering,
) -> usize {
    if index > 0 && cmp_at(index - 1) != Less {
        gallop_backward(0, index, cmp_at)
    } else if index + 1 < len && cmp_at(index + 1) == Less {
        // Indices past `index` shift down by one once it is taken out
        gallop_forward(index + 1, len, cmp_at) - 1
    } else {
        index
    }
}
