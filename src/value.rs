//! Dynamically typed heap elements
//!
//! [`Value`] holds an integer, a float or a string. Numbers compare with each
//! other by numeric value; strings compare with strings; a number and a string
//! have no ordering at all. Storing `Value`s in an
//! [`IndexedHeap`](crate::indexed::IndexedHeap) therefore gives a heap whose
//! element kind is fixed by its first value: once it holds numbers, inserting
//! a string fails with [`HeapError::Incomparable`](crate::HeapError::Incomparable).
//!
//! Equality and hashing agree with numeric comparison, so `Int(3)` and
//! `Float(3.0)` are the same heap value and share one entry.
//!
//! # Example
//!
//! ```rust
//! use rust_indexed_heaps::{HeapError, MinIndexedHeap, Value};
//!
//! let mut heap = MinIndexedHeap::heapify([
//!     Value::from(500),
//!     Value::from(-1.5),
//!     Value::from(-1000),
//! ])
//! .unwrap();
//!
//! assert_eq!(heap.peek(), Some(&Value::Int(-1000)));
//! assert_eq!(heap.insert(Value::from("text")), Err(HeapError::Incomparable));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 2^63 as an `f64`; the first float above the `i64` range
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// A dynamically typed element
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// A signed integer
    Int(i64),
    /// A floating-point number; NaN is not comparable with anything
    Float(f64),
    /// A string, ordered lexicographically
    Text(String),
}

impl Value {
    /// Returns true for `Int` and `Float`
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }
}

/// The integer an integral, in-range float is equal to
fn float_as_int(f: f64) -> Option<i64> {
    if f.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&f) {
        Some(f as i64)
    } else {
        None
    }
}

fn cmp_int_float(i: i64, f: f64) -> Option<Ordering> {
    if f.is_nan() {
        return None;
    }
    if let Some(whole) = float_as_int(f) {
        return Some(i.cmp(&whole));
    }
    if f >= I64_BOUND {
        Some(Ordering::Less)
    } else if f < -I64_BOUND {
        Some(Ordering::Greater)
    } else {
        // f has a fractional part, so |f| < 2^52 and rounding i cannot cross it
        (i as f64).partial_cmp(&f)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::Int(i), Value::Float(f)) | (Value::Float(f), Value::Int(i)) => {
                float_as_int(*f) == Some(*i)
            }
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }
}

// NaN equals NaN here so that the position index stays well-formed; heaps
// never admit NaN because it fails the comparability check.
impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Int(i), Value::Float(f)) => cmp_int_float(*i, *f),
            (Value::Float(f), Value::Int(i)) => cmp_int_float(*i, *f).map(Ordering::reverse),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Int(i) => {
                0u8.hash(state);
                i.hash(state);
            }
            Value::Float(f) => match float_as_int(*f) {
                Some(i) => {
                    0u8.hash(state);
                    i.hash(state);
                }
                None => {
                    1u8.hash(state);
                    let bits = if f.is_nan() { f64::NAN.to_bits() } else { f.to_bits() };
                    bits.hash(state);
                }
            },
            Value::Text(s) => {
                2u8.hash(state);
                s.hash(state);
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}
