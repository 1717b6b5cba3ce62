//! Ruta - array runtime core for the Ruta scripting language
//!
//! Ruta arrays are ordered, heterogeneous, mutable sequences of shared
//! value handles with scripting-language semantics: negative indexes count
//! from the end, writes past the end grow the array with nil fill,
//! out-of-range reads return nil instead of failing, slices are
//! independent copies, and destructive operations are gated by the
//! frozen/tainted/sort-locked guard.
//!
//! # Example
//!
//! ```
//! use ruta::{Array, Host, Value};
//!
//! let host = Host::new();
//! let array = Array::from_values(&host, vec![
//!     Value::fixnum(3),
//!     Value::fixnum(1),
//!     Value::fixnum(2),
//! ]);
//!
//! let sorted = array.sort().unwrap();
//! assert_eq!(sorted.inspect(), "[1, 2, 3]");
//! assert_eq!(array.inspect(), "[3, 1, 2]");
//!
//! array.store(5, Value::text("x")).unwrap();
//! assert!(array.entry(3).is_nil());
//! assert_eq!(array.len(), 6);
//! ```

pub mod array;
pub mod error;
pub mod host;
pub mod value;

pub use array::{Array, MAX_ARRAY_SIZE};
pub use error::{Result, RutaError};
pub use host::{Host, TAINT_SECURITY_THRESHOLD};
pub use value::{HostObject, RangeValue, Value, ValueRef};
