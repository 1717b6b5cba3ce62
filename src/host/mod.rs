//! Host runtime services for the array core
//!
//! The container does not own its runtime environment; it consumes a small
//! set of ambient services from the embedding interpreter: the singleton
//! sentinel values (nil, true, false), the process-wide security level,
//! and the optional caller-supplied comparison block used by sort.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::error::{Result, RutaError};
use crate::value::{Value, ValueRef};

/// Security level at or above which tainted data may not be mutated.
pub const TAINT_SECURITY_THRESHOLD: u32 = 4;

/// A caller-supplied comparison block.
///
/// Receives the value pair being compared and returns a host numeric whose
/// sign carries the ordering signal. The block may fail, and may legally
/// call back into the array being sorted (such calls are refused by the
/// sort lock, not by this seam).
pub type CompareBlock = dyn Fn(&ValueRef, &ValueRef) -> Result<ValueRef>;

/// Ambient runtime state shared by every value the host creates.
pub struct Host {
    nil: ValueRef,
    bool_true: ValueRef,
    bool_false: ValueRef,
    security_level: Cell<u32>,
    block: RefCell<Option<Rc<CompareBlock>>>,
}

impl Host {
    /// Create a host with security level 0 and no comparison block.
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            nil: Rc::new(Value::Nil),
            bool_true: Rc::new(Value::Bool(true)),
            bool_false: Rc::new(Value::Bool(false)),
            security_level: Cell::new(0),
            block: RefCell::new(None),
        })
    }

    /// The absent sentinel. Every call returns a handle to the same
    /// singleton.
    pub fn nil(&self) -> ValueRef {
        Rc::clone(&self.nil)
    }

    /// Boolean singleton for predicate results.
    pub fn boolean(&self, value: bool) -> ValueRef {
        if value {
            Rc::clone(&self.bool_true)
        } else {
            Rc::clone(&self.bool_false)
        }
    }

    /// Current ambient security level.
    pub fn security_level(&self) -> u32 {
        self.security_level.get()
    }

    /// Set the ambient security level.
    pub fn set_security_level(&self, level: u32) {
        self.security_level.set(level);
    }

    /// Register a comparison block for subsequent sorts.
    pub fn set_block<F>(&self, block: F)
    where
        F: Fn(&ValueRef, &ValueRef) -> Result<ValueRef> + 'static,
    {
        *self.block.borrow_mut() = Some(Rc::new(block));
    }

    /// Remove the registered comparison block.
    pub fn clear_block(&self) {
        *self.block.borrow_mut() = None;
    }

    /// Whether a comparison block is currently supplied.
    pub fn block_given(&self) -> bool {
        self.block.borrow().is_some()
    }

    /// Invoke the comparison block on a value pair and interpret its
    /// numeric result as an ordering signal.
    ///
    /// The block handle is cloned out of its cell before the call, so the
    /// block itself may re-enter host services without aliasing a live
    /// borrow.
    pub fn yield_pair(&self, a: &ValueRef, b: &ValueRef) -> Result<i64> {
        let block = match self.block.borrow().as_ref() {
            Some(block) => Rc::clone(block),
            None => {
                return Err(RutaError::Comparison(
                    "no comparator block supplied".to_string(),
                ))
            }
        };

        let result = block(a, b)?;
        match &*result {
            Value::Fixnum(n) => Ok(*n),
            Value::Bignum(n) => Ok(n.signum() as i64),
            other => Err(RutaError::Comparison(format!(
                "comparator block returned {}, expected a numeric",
                other.type_name()
            ))),
        }
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host")
            .field("security_level", &self.security_level.get())
            .field("block_given", &self.block_given())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
