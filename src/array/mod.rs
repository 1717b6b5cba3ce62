//! The array container
//!
//! A dynamically-resizable, boundary-tolerant sequence of value handles
//! with the mutation semantics of the Ruta array type: negative indexing,
//! sparse growth with nil fill, copy-producing slices, guard-gated
//! destructive operations, and an in-place sort protected by a transient
//! reentrancy lock.
//!
//! Arrays are shared by handle (`Rc<Array>`) and mutated through `&self`
//! with interior mutability. That is what allows a comparison block to
//! legally reach back into the array being sorted and be refused by the
//! mutability guard instead of crashing on a borrow conflict.

mod index;
mod sort;
mod storage;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::trace;

use crate::error::{Result, RutaError};
use crate::host::{Host, TAINT_SECURITY_THRESHOLD};
use crate::value::{Value, ValueRef};

use self::index::WriteSlot;
use self::sort::SortLock;
use self::storage::Storage;

/// Largest element count a pre-size request may ask for.
pub const MAX_ARRAY_SIZE: i64 = i32::MAX as i64;

/// An ordered, heterogeneous, mutable sequence of value handles.
#[derive(Debug)]
pub struct Array {
    /// Handle to the host runtime (sentinels, security level, block)
    host: Rc<Host>,
    /// Element storage; insertion order is significant
    elements: RefCell<Storage>,
    /// Set once by `freeze`, never cleared
    frozen: Cell<bool>,
    /// Derived-from-untrusted-input marker
    tainted: Cell<bool>,
    /// True only while a sort on this array is executing
    sort_locked: Cell<bool>,
}

impl Array {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Create an empty array.
    pub fn new(host: &Rc<Host>) -> Rc<Self> {
        Self::with_storage(host, Storage::new())
    }

    /// Create an empty array with room for `capacity` elements.
    pub fn with_capacity(host: &Rc<Host>, capacity: usize) -> Rc<Self> {
        Self::with_storage(host, Storage::with_capacity(capacity))
    }

    /// Create a length-1 array wrapping a single value.
    pub fn from_value(host: &Rc<Host>, value: ValueRef) -> Rc<Self> {
        Self::with_storage(host, Storage::from_vec(vec![value]))
    }

    /// Create a 2-element pair array.
    pub fn assoc(host: &Rc<Host>, car: ValueRef, cdr: ValueRef) -> Rc<Self> {
        Self::with_storage(host, Storage::from_vec(vec![car, cdr]))
    }

    /// Create an array owning the given element sequence.
    pub fn from_values(host: &Rc<Host>, values: Vec<ValueRef>) -> Rc<Self> {
        Self::with_storage(host, Storage::from_vec(values))
    }

    fn with_storage(host: &Rc<Host>, storage: Storage) -> Rc<Self> {
        Rc::new(Self {
            host: Rc::clone(host),
            elements: RefCell::new(storage),
            frozen: Cell::new(false),
            tainted: Cell::new(false),
            sort_locked: Cell::new(false),
        })
    }

    /// Independent copy of this array.
    ///
    /// The element handles are shared, the sequence structure is not.
    /// The copy preserves `tainted` and starts unfrozen and unlocked.
    pub fn duplicate(&self) -> Rc<Self> {
        let copy = Self::with_storage(
            &self.host,
            Storage::from_vec(self.elements.borrow().snapshot()),
        );
        copy.tainted.set(self.tainted.get());
        copy
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Logical length.
    pub fn len(&self) -> usize {
        self.elements.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.borrow().is_empty()
    }

    /// Handle to the host this array was created in.
    pub fn host(&self) -> &Rc<Host> {
        &self.host
    }

    /// Permanently forbid mutation.
    pub fn freeze(&self) {
        self.frozen.set(true);
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.get()
    }

    /// Mark as derived from untrusted input.
    pub fn taint(&self) {
        self.tainted.set(true);
    }

    pub fn is_tainted(&self) -> bool {
        self.tainted.get()
    }

    pub fn is_sort_locked(&self) -> bool {
        self.sort_locked.get()
    }

    /// Host boolean answering the frozen query: a sorting array reports
    /// itself frozen for the duration of the sort.
    pub fn frozen_query(&self) -> ValueRef {
        self.host.boolean(self.frozen.get() || self.sort_locked.get())
    }

    // ========================================================================
    // Mutability guard
    // ========================================================================

    /// Check that destructive operations are currently allowed.
    ///
    /// Evaluated in order: frozen, sort-locked, tainted under a security
    /// level at or above the threshold. The ordering is part of the
    /// contract. No side effects on failure.
    pub fn check_mutable(&self) -> Result<()> {
        if self.frozen.get() {
            trace!("mutation rejected: array is frozen");
            return Err(RutaError::Frozen);
        }
        if self.sort_locked.get() {
            trace!("mutation rejected: array is being sorted");
            return Err(RutaError::ModifyDuringSort);
        }
        if self.tainted.get() && self.host.security_level() >= TAINT_SECURITY_THRESHOLD {
            trace!(
                "mutation rejected: tainted array at security level {}",
                self.host.security_level()
            );
            return Err(RutaError::Security);
        }
        Ok(())
    }

    // ========================================================================
    // Stack-style operations
    // ========================================================================

    /// Append one value.
    pub fn push(&self, value: ValueRef) -> Result<()> {
        self.check_mutable()?;
        self.elements.borrow_mut().push(value);
        Ok(())
    }

    /// Append every value in order. Zero values is an argument error.
    pub fn push_values(&self, values: &[ValueRef]) -> Result<()> {
        if values.is_empty() {
            return Err(RutaError::Argument(
                "wrong number of arguments (at least 1)".to_string(),
            ));
        }
        self.check_mutable()?;
        let mut elements = self.elements.borrow_mut();
        for value in values {
            elements.push(Rc::clone(value));
        }
        Ok(())
    }

    /// Remove and return the last value, or nil when empty.
    pub fn pop(&self) -> Result<ValueRef> {
        self.check_mutable()?;
        Ok(self
            .elements
            .borrow_mut()
            .pop_back()
            .unwrap_or_else(|| self.host.nil()))
    }

    /// Remove and return the first value, or nil when empty.
    pub fn shift(&self) -> Result<ValueRef> {
        self.check_mutable()?;
        Ok(self
            .elements
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| self.host.nil()))
    }

    /// Prepend one value.
    pub fn unshift(&self, value: ValueRef) -> Result<()> {
        self.check_mutable()?;
        self.elements
            .borrow_mut()
            .push_front_all(std::slice::from_ref(&value));
        Ok(())
    }

    /// Prepend every value, preserving their order. Zero values is an
    /// argument error.
    pub fn unshift_values(&self, values: &[ValueRef]) -> Result<()> {
        if values.is_empty() {
            return Err(RutaError::Argument(
                "wrong number of arguments (at least 1)".to_string(),
            ));
        }
        self.check_mutable()?;
        self.elements.borrow_mut().push_front_all(values);
        Ok(())
    }

    // ========================================================================
    // Indexed access
    // ========================================================================

    /// Store `value` at logical index `idx`.
    ///
    /// Negative indexes count from the end and must land within the
    /// current length. An index past the end extends the array, filling
    /// the gap with nil.
    pub fn store(&self, idx: i64, value: ValueRef) -> Result<()> {
        self.check_mutable()?;
        let mut elements = self.elements.borrow_mut();
        match index::resolve_write(idx, elements.len())? {
            WriteSlot::Existing(pos) => elements.set(pos, value),
            WriteSlot::Append => elements.push(value),
            WriteSlot::Extend(pos) => {
                let nil = self.host.nil();
                elements.fill_to(pos, &nil);
                elements.push(value);
            }
        }
        Ok(())
    }

    /// Value at logical index `idx`, or nil when out of range.
    pub fn entry(&self, idx: i64) -> ValueRef {
        let elements = self.elements.borrow();
        index::resolve_read(idx, elements.len())
            .and_then(|pos| elements.get(pos).cloned())
            .unwrap_or_else(|| self.host.nil())
    }

    /// Alias for [`entry`](Self::entry).
    pub fn at(&self, idx: i64) -> ValueRef {
        self.entry(idx)
    }

    /// Independent copy of the run `[beg, beg + len)`, clamped to the
    /// available elements.
    ///
    /// Returns a new empty array for a zero-length run and nil when `beg`
    /// is out of range.
    pub fn subseq(&self, beg: i64, len: i64) -> ValueRef {
        let copied = {
            let elements = self.elements.borrow();
            match index::clamp_range(beg, len, elements.len()) {
                None => return self.host.nil(),
                Some((beg, len)) => elements.copy_range(beg, len),
            }
        };
        Value::array(Self::with_storage(&self.host, Storage::from_vec(copied)))
    }

    /// General index-or-range accessor.
    ///
    /// Two fixnums select a `(begin, length)` run (negative begin counts
    /// from the end); one fixnum selects a single entry; a range value is
    /// resolved against the current length; a bignum index is past the
    /// small-integer encoding and fails. Anything else is nil.
    pub fn slice(&self, args: &[ValueRef]) -> Result<ValueRef> {
        match args {
            [a, b] => match (&**a, &**b) {
                (Value::Fixnum(beg), Value::Fixnum(len)) => {
                    let mut beg = *beg;
                    if beg < 0 {
                        beg += self.len() as i64;
                    }
                    Ok(self.subseq(beg, *len))
                }
                _ => Ok(self.host.nil()),
            },
            [a] => match &**a {
                Value::Fixnum(idx) => Ok(self.entry(*idx)),
                Value::Bignum(_) => Err(RutaError::Index("index too big".to_string())),
                Value::Range(range) => match range.begin_length(self.len() as i64) {
                    Some((beg, len)) => Ok(self.subseq(beg, len)),
                    None => Ok(self.host.nil()),
                },
                _ => Ok(self.host.nil()),
            },
            _ => Ok(self.host.nil()),
        }
    }

    // ========================================================================
    // Whole-array operations
    // ========================================================================

    /// Host boolean: whether any element equals `value`.
    pub fn includes(&self, value: &ValueRef) -> ValueRef {
        let found = self.elements.borrow().iter().any(|e| **e == **value);
        self.host.boolean(found)
    }

    /// Pre-size to `len` elements, overwriting existing elements with
    /// `fill` and extending with it.
    pub fn initialize(&self, len: i64, fill: ValueRef) -> Result<()> {
        self.check_mutable()?;
        if len < 0 {
            return Err(RutaError::Argument("negative array size".to_string()));
        }
        if len > MAX_ARRAY_SIZE {
            return Err(RutaError::Argument("array size too big".to_string()));
        }
        let mut elements = self.elements.borrow_mut();
        elements.fill_all(&fill);
        elements.fill_to(len as usize, &fill);
        Ok(())
    }

    /// Bracketed text rendering of the elements.
    ///
    /// Convenience view only; it is not parsed back.
    pub fn inspect(&self) -> String {
        let elements = self.elements.borrow();
        let rendered: Vec<String> = elements.iter().map(|v| v.to_text()).collect();
        format!("[{}]", rendered.join(", "))
    }

    // ========================================================================
    // Sorting
    // ========================================================================

    /// Destructive in-place sort.
    ///
    /// Uses the caller-supplied comparison block when one is registered
    /// with the host, the type-sensitive default ordering otherwise.
    /// Length 0 and 1 return immediately without a guard check. The sort
    /// lock is held for the duration and released on every exit path; a
    /// comparator failure leaves the element order untouched.
    pub fn sort_bang(&self) -> Result<()> {
        if self.len() <= 1 {
            return Ok(());
        }
        self.check_mutable()?;

        trace!("sort: begin, {} elements", self.len());
        let _lock = SortLock::acquire(&self.sort_locked);

        let mut scratch = self.elements.borrow().snapshot();
        if self.host.block_given() {
            let host = &self.host;
            sort::merge_sort(&mut scratch, &|a: &ValueRef, b: &ValueRef| {
                host.yield_pair(a, b).map(sort::signal_to_ordering)
            })?;
        } else {
            sort::merge_sort(&mut scratch, &sort::default_compare)?;
        }
        self.elements.borrow_mut().replace(scratch);

        trace!("sort: done");
        Ok(())
    }

    /// Non-destructive sort: returns a sorted duplicate, leaving this
    /// array untouched.
    pub fn sort(&self) -> Result<Rc<Self>> {
        let copy = self.duplicate();
        copy.sort_bang()?;
        Ok(copy)
    }
}

// ============================================================================
// Tests
// ============================================================================
