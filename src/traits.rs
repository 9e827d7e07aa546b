//! Common traits and error types for indexed heaps
//!
//! This module provides:
//!
//! - [`Order`]: the ordering strategy a heap is parameterized over
//! - [`HeapError`]: failures reported by heap operations
//! - [`InvariantError`]: failures reported by
//!   [`IndexedHeap::check_invariants`](crate::indexed::IndexedHeap::check_invariants)
//!
//! Strategies are zero-sized marker types chosen through a type parameter,
//! so every comparison is statically dispatched. The two built-in strategies
//! live in [`order`](crate::order).

use std::fmt;

/// Error type for heap operations
///
/// Every public operation validates its arguments before touching the heap,
/// so a returned error means the heap is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The value cannot be ordered against the values already in the heap
    Incomparable,
    /// The requested count is zero or exceeds the available multiplicity
    InvalidCount {
        /// The count that was asked for
        requested: usize,
        /// The multiplicity currently stored (0 where no upper bound applies)
        available: usize,
    },
    /// `replace` was asked to replace a value with an equal value
    SameValue,
    /// The value is not present in the heap
    MissingValue,
    /// The heap has no entries
    Empty,
    /// Adding occurrences would push a multiplicity past `usize::MAX`
    Overflow {
        /// The multiplicity already stored
        current: usize,
        /// The occurrences that were to be added
        added: usize,
    },
    /// An internal sift was started outside the array bounds
    IndexOutOfRange {
        /// The offending index
        index: usize,
        /// The array length at the time
        len: usize,
    },
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::Incomparable => {
                write!(f, "value is not comparable with the values in the heap")
            }
            HeapError::InvalidCount {
                requested,
                available,
            } => {
                if *available == 0 {
                    write!(f, "invalid count {requested}: must be at least 1")
                } else {
                    write!(
                        f,
                        "invalid count {requested}: must be between 1 and {available}"
                    )
                }
            }
            HeapError::SameValue => {
                write!(f, "new value is equal to the current value, use update instead")
            }
            HeapError::MissingValue => write!(f, "value is not in the heap"),
            HeapError::Empty => write!(f, "pop from empty heap"),
            HeapError::Overflow { current, added } => {
                write!(f, "multiplicity overflow: cannot add {added} to {current}")
            }
            HeapError::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for heap of size {len}")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// Error returned when a heap's internal invariants do not hold.
///
/// Carries a human-readable description of the first violation found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

/// Ordering strategy for an indexed heap
///
/// A strategy decides which of two values belongs closer to the root.
/// It is stateless and fixed for the lifetime of a heap.
///
/// Comparisons go through [`PartialOrd`] so that element types with a partial
/// order (such as [`Value`](crate::value::Value)) can be stored. The heap calls
/// [`is_comparable`](Order::is_comparable) before admitting a new value, which
/// keeps incomparable pairs out of the sift loops.
///
/// # Example
///
/// ```rust
/// use rust_indexed_heaps::order::{MaxOrder, MinOrder};
/// use rust_indexed_heaps::Order;
///
/// assert!(MinOrder::comes_before(&1, &2));
/// assert!(MaxOrder::comes_before(&2, &1));
/// assert!(!MinOrder::is_comparable(&f64::NAN, &1.0));
/// ```
pub trait Order {
    /// Short name used in `Debug` output and log lines
    const NAME: &'static str;

    /// Returns true if `a` must sit above `b` in the heap
    ///
    /// This is a strict relation: `comes_before(a, a)` is false.
    fn comes_before<T: PartialOrd + ?Sized>(a: &T, b: &T) -> bool;

    /// Returns true if `a` and `b` can be ordered in both directions
    fn is_comparable<T: PartialOrd + ?Sized>(a: &T, b: &T) -> bool {
        a.partial_cmp(b).is_some() && b.partial_cmp(a).is_some()
    }
}
