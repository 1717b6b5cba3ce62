//! Sort engine: fallible stable reordering with a scoped reentrancy lock
//!
//! Comparators here can fail (a caller-supplied block may raise, and the
//! generic comparison capability is fallible), so the sort is written
//! against a `Result`-returning comparison seam. The lock is a scoped
//! guard: it is released when the guard drops, on every exit path.

use std::cell::Cell;
use std::cmp::Ordering;
use std::rc::Rc;

use crate::error::Result;
use crate::value::{Value, ValueRef};

/// Scoped sort lock.
///
/// Sets the flag on acquisition and clears it on drop, so the container is
/// never left permanently un-mutable by a failing comparator.
pub(crate) struct SortLock<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> SortLock<'a> {
    pub fn acquire(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self { flag }
    }
}

impl Drop for SortLock<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// Map a numeric ordering signal to an `Ordering`.
pub(crate) fn signal_to_ordering(signal: i64) -> Ordering {
    signal.cmp(&0)
}

/// Type-sensitive default comparison.
///
/// Fixnum pairs and text pairs take the fast paths; everything else goes
/// through the value's own generic three-way-comparison capability, which
/// keeps the ordering open to host-defined types.
pub(crate) fn default_compare(a: &ValueRef, b: &ValueRef) -> Result<Ordering> {
    match (&**a, &**b) {
        (Value::Fixnum(x), Value::Fixnum(y)) => Ok(x.cmp(y)),
        (Value::Text(x), Value::Text(y)) => Ok(x.cmp(y)),
        _ => a.compare(b).map(signal_to_ordering),
    }
}

/// Stable merge sort with an error-propagating comparator.
///
/// Deterministic for a fixed comparator; equal elements keep their
/// relative order. On comparator failure the buffer contents are
/// unspecified, so callers sort a scratch copy and write back only on
/// success.
pub(crate) fn merge_sort<F>(items: &mut Vec<ValueRef>, cmp: &F) -> Result<()>
where
    F: Fn(&ValueRef, &ValueRef) -> Result<Ordering>,
{
    let n = items.len();
    if n <= 1 {
        return Ok(());
    }

    let mut left = std::mem::take(items);
    let mut right = left.split_off(n / 2);
    merge_sort(&mut left, cmp)?;
    merge_sort(&mut right, cmp)?;

    items.reserve(n);
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        // left wins ties for stability
        if cmp(&left[i], &right[j])? == Ordering::Greater {
            items.push(Rc::clone(&right[j]));
            j += 1;
        } else {
            items.push(Rc::clone(&left[i]));
            i += 1;
        }
    }
    items.extend(left[i..].iter().cloned());
    items.extend(right[j..].iter().cloned());
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
