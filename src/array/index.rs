//! Index resolver: signed logical indexes to physical positions
//!
//! Reads and writes deliberately disagree about failure: a read that
//! resolves out of range is absent (`None`), while a write that resolves
//! below zero is an index error. Writes past the end are not errors
//! either; they signal auto-extension.

use crate::error::{Result, RutaError};

/// Where a resolved write lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WriteSlot {
    /// Overwrite an existing position.
    Existing(usize),
    /// Append directly at the end.
    Append,
    /// Extend with fill values up to this position, then append there.
    Extend(usize),
}

/// Resolve a signed logical index for a read against length `len`.
///
/// Negative indexes count from the end. Anything that resolves outside
/// `0..len` is absent, never an error.
pub(crate) fn resolve_read(idx: i64, len: usize) -> Option<usize> {
    let len = len as i64;
    let resolved = if idx < 0 { idx + len } else { idx };
    if resolved < 0 || resolved >= len {
        None
    } else {
        Some(resolved as usize)
    }
}

/// Resolve a signed logical index for a write against length `len`.
///
/// A negative index that still resolves below zero reports the original
/// negative distance past the start.
pub(crate) fn resolve_write(idx: i64, len: usize) -> Result<WriteSlot> {
    let n = len as i64;
    if idx < 0 {
        let resolved = idx + n;
        if resolved < 0 {
            return Err(RutaError::Index(format!("index {} out of array", idx)));
        }
        return Ok(WriteSlot::Existing(resolved as usize));
    }
    if idx < n {
        Ok(WriteSlot::Existing(idx as usize))
    } else if idx == n {
        Ok(WriteSlot::Append)
    } else {
        Ok(WriteSlot::Extend(idx as usize))
    }
}

/// Normalize a resolved `(begin, length)` pair against length `n`.
///
/// `beg` must already have had any negative resolution applied by the
/// caller; a begin outside `0..=n` is absent. An over-long request clamps
/// to the available run, a negative length clamps to zero. A zero-length
/// result is a valid empty range, distinct from absent.
pub(crate) fn clamp_range(beg: i64, len: i64, n: usize) -> Option<(usize, usize)> {
    let n = n as i64;
    if beg < 0 || beg > n {
        return None;
    }
    let mut len = len;
    if len.saturating_add(beg) > n {
        len = n - beg;
    }
    if len < 0 {
        len = 0;
    }
    Some((beg as usize, len as usize))
}

// ============================================================================
// Tests
// ============================================================================
