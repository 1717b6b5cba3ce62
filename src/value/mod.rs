//! Host value model for Ruta
//!
//! The array core stores opaque value handles. This module defines the
//! handle type and the small set of capabilities the container relies on:
//! structural equality (for `includes`), a generic three-way comparison
//! (for the default sort order), and text rendering (for `inspect`).
//!
//! The model is open-ended: host embedders add new comparable/renderable
//! types by implementing [`HostObject`] rather than by extending the enum.

use std::fmt;
use std::rc::Rc;

use crate::array::Array;
use crate::error::{Result, RutaError};

/// Shared handle to a host value.
///
/// Values have reference semantics: cloning a handle shares the value,
/// it never copies the underlying data.
pub type ValueRef = Rc<Value>;

/// A host value.
#[derive(Debug, Clone)]
pub enum Value {
    /// The absent sentinel. Reads that find nothing return this.
    Nil,
    /// Boolean singletons, used for predicate results.
    Bool(bool),
    /// Small integer within the host encoding.
    Fixnum(i64),
    /// Integer past the small-integer encoding; valid as data, rejected
    /// as an index.
    Bignum(i128),
    /// Text value with lexicographic ordering.
    Text(String),
    /// Interval value usable as a slice argument.
    Range(RangeValue),
    /// Host-defined object participating through the HostObject trait.
    Object(Rc<dyn HostObject>),
    /// A nested array handle.
    Array(Rc<Array>),
}

impl Value {
    /// Wrap a small integer.
    pub fn fixnum(n: i64) -> ValueRef {
        Rc::new(Value::Fixnum(n))
    }

    /// Wrap an integer past the small-integer encoding.
    pub fn bignum(n: i128) -> ValueRef {
        Rc::new(Value::Bignum(n))
    }

    /// Wrap a text value.
    pub fn text(s: impl Into<String>) -> ValueRef {
        Rc::new(Value::Text(s.into()))
    }

    /// Wrap a range value.
    pub fn range(range: RangeValue) -> ValueRef {
        Rc::new(Value::Range(range))
    }

    /// Wrap a host-defined object.
    pub fn object(obj: Rc<dyn HostObject>) -> ValueRef {
        Rc::new(Value::Object(obj))
    }

    /// Wrap an array handle.
    pub fn array(array: Rc<Array>) -> ValueRef {
        Rc::new(Value::Array(array))
    }

    /// Whether this value is the absent sentinel.
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Host type name, used in comparison error messages.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "boolean",
            Value::Fixnum(_) => "fixnum",
            Value::Bignum(_) => "bignum",
            Value::Text(_) => "text",
            Value::Range(_) => "range",
            Value::Object(obj) => obj.type_name(),
            Value::Array(_) => "array",
        }
    }

    /// Generic three-way comparison capability.
    ///
    /// Returns a negative, zero, or positive signal. Host objects dispatch
    /// through their own [`HostObject::compare`]; pairs with no usable
    /// ordering fail with a comparison error.
    pub fn compare(&self, other: &Value) -> Result<i64> {
        match (self, other) {
            (Value::Nil, Value::Nil) => Ok(0),
            (Value::Fixnum(a), Value::Fixnum(b)) => Ok(ordering_signal(a.cmp(b))),
            (Value::Fixnum(a), Value::Bignum(b)) => Ok(ordering_signal((*a as i128).cmp(b))),
            (Value::Bignum(a), Value::Fixnum(b)) => Ok(ordering_signal(a.cmp(&(*b as i128)))),
            (Value::Bignum(a), Value::Bignum(b)) => Ok(ordering_signal(a.cmp(b))),
            (Value::Text(a), Value::Text(b)) => Ok(ordering_signal(a.cmp(b))),
            (Value::Object(obj), _) => obj.compare(other),
            _ => Err(RutaError::Comparison(format!(
                "{} cannot be compared with {}",
                self.type_name(),
                other.type_name()
            ))),
        }
    }

    /// Convert-to-text capability, used by `inspect`.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

fn ordering_signal(ordering: std::cmp::Ordering) -> i64 {
    match ordering {
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => 1,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Fixnum(n) => write!(f, "{}", n),
            Value::Bignum(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "\"{}\"", s),
            Value::Range(r) => write!(f, "{}", r),
            Value::Object(obj) => write!(f, "{}", obj.to_text()),
            Value::Array(a) => write!(f, "{}", a.inspect()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Fixnum(a), Value::Fixnum(b)) => a == b,
            (Value::Bignum(a), Value::Bignum(b)) => a == b,
            (Value::Fixnum(a), Value::Bignum(b)) => *a as i128 == *b,
            (Value::Bignum(a), Value::Fixnum(b)) => *a == *b as i128,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Range(a), Value::Range(b)) => a == b,
            // Host objects and arrays compare by handle identity
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Capability trait for host-defined value types.
///
/// Implementing this trait is how an embedder's own types participate in
/// the default sort order and in `inspect`, without the core enumerating
/// them.
pub trait HostObject: fmt::Debug {
    /// Host-visible type name.
    fn type_name(&self) -> &str {
        "object"
    }

    /// Three-way comparison against another value.
    fn compare(&self, other: &Value) -> Result<i64>;

    /// Text rendering of this object.
    fn to_text(&self) -> String;
}

/// An interval value: begin and end bounds, inclusive or exclusive end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeValue {
    pub begin: i64,
    pub end: i64,
    pub exclusive: bool,
}

impl RangeValue {
    /// An inclusive range `begin..=end`.
    pub fn inclusive(begin: i64, end: i64) -> Self {
        Self {
            begin,
            end,
            exclusive: false,
        }
    }

    /// A half-open range `begin..end`.
    pub fn exclusive(begin: i64, end: i64) -> Self {
        Self {
            begin,
            end,
            exclusive: true,
        }
    }

    /// Resolve this range against a sequence length into a
    /// `(begin, length)` pair.
    ///
    /// Negative bounds count from the end. Returns `None` when the
    /// resolved begin falls outside `0..=len`; a negative span clamps to
    /// an empty one.
    pub fn begin_length(&self, len: i64) -> Option<(i64, i64)> {
        let mut begin = self.begin;
        if begin < 0 {
            begin += len;
        }
        if begin < 0 || begin > len {
            return None;
        }

        let mut end = self.end;
        if end < 0 {
            end += len;
        }

        let mut length = end.saturating_sub(begin);
        if !self.exclusive {
            length = length.saturating_add(1);
        }
        if length < 0 {
            length = 0;
        }
        Some((begin, length))
    }
}

impl fmt::Display for RangeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.exclusive {
            write!(f, "{}...{}", self.begin, self.end)
        } else {
            write!(f, "{}..{}", self.begin, self.end)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
