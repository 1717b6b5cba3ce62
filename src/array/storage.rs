//! Storage engine: mechanical, policy-free element storage
//!
//! Owns a contiguous, order-preserving sequence of value handles. All
//! index/guard policy lives above this layer; callers pass only validated
//! physical positions.

use crate::value::ValueRef;

/// Contiguous element storage for one array.
#[derive(Debug, Default, Clone)]
pub(crate) struct Storage {
    items: Vec<ValueRef>,
}

impl Storage {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn from_vec(items: Vec<ValueRef>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Element at a validated physical position.
    pub fn get(&self, pos: usize) -> Option<&ValueRef> {
        self.items.get(pos)
    }

    /// Overwrite a validated physical position.
    pub fn set(&mut self, pos: usize, value: ValueRef) {
        self.items[pos] = value;
    }

    /// Append one element. Amortized O(1).
    pub fn push(&mut self, value: ValueRef) {
        self.items.push(value);
    }

    /// Insert elements at position 0, preserving their order. O(n).
    pub fn push_front_all(&mut self, values: &[ValueRef]) {
        let mut items = Vec::with_capacity(self.items.len() + values.len());
        items.extend(values.iter().cloned());
        items.append(&mut self.items);
        self.items = items;
    }

    /// Remove and return the last element, or `None` when empty.
    pub fn pop_back(&mut self) -> Option<ValueRef> {
        self.items.pop()
    }

    /// Remove and return the first element, or `None` when empty. O(n).
    pub fn pop_front(&mut self) -> Option<ValueRef> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.items.remove(0))
        }
    }

    /// Extend to `target` elements by appending `fill`.
    ///
    /// The auto-extension primitive: positions `[len, target)` become the
    /// fill value. A target at or below the current length is a no-op.
    pub fn fill_to(&mut self, target: usize, fill: &ValueRef) {
        if target > self.items.len() {
            self.items.reserve(target - self.items.len());
            while self.items.len() < target {
                self.items.push(fill.clone());
            }
        }
    }

    /// Overwrite every element with `fill`.
    pub fn fill_all(&mut self, fill: &ValueRef) {
        for slot in &mut self.items {
            *slot = fill.clone();
        }
    }

    /// Independent copy of the contiguous run `[beg, beg + len)`.
    ///
    /// The caller guarantees the run is within bounds.
    pub fn copy_range(&self, beg: usize, len: usize) -> Vec<ValueRef> {
        self.items[beg..beg + len].to_vec()
    }

    /// Independent copy of the whole sequence.
    pub fn snapshot(&self) -> Vec<ValueRef> {
        self.items.clone()
    }

    /// Replace the whole sequence. Used by the sort write-back.
    pub fn replace(&mut self, items: Vec<ValueRef>) {
        self.items = items;
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValueRef> {
        self.items.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================
