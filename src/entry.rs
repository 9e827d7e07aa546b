//! Heap entries and count arguments
//!
//! An [`Entry`] collapses every occurrence of one value into a single heap
//! slot. Its identity (equality, ordering, hashing) is the identity of the
//! value; the multiplicity never takes part in it.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use crate::traits::HeapError;

/// A value stored in one heap slot together with its number of occurrences
///
/// With the `serde` feature, deserialization rejects a multiplicity of 0.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawEntry<T>"))]
pub struct Entry<T> {
    value: T,
    multiplicity: usize,
}

impl<T> Entry<T> {
    pub(crate) fn new(value: T, multiplicity: usize) -> Self {
        debug_assert!(multiplicity > 0, "entries hold at least one occurrence");
        Self {
            value,
            multiplicity,
        }
    }

    /// The stored value
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// How many occurrences of the value this entry represents (always ≥ 1)
    #[inline]
    pub fn multiplicity(&self) -> usize {
        self.multiplicity
    }

    #[inline]
    pub(crate) fn set_multiplicity(&mut self, multiplicity: usize) {
        debug_assert!(multiplicity > 0);
        self.multiplicity = multiplicity;
    }

    /// Swaps in a new value, keeping the multiplicity. Returns the old value.
    #[inline]
    pub(crate) fn replace_value(&mut self, value: T) -> T {
        std::mem::replace(&mut self.value, value)
    }

    /// Consumes the entry, returning the value and its multiplicity
    pub fn into_parts(self) -> (T, usize) {
        (self.value, self.multiplicity)
    }
}

/// Unvalidated wire form of an [`Entry`]
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawEntry<T> {
    value: T,
    multiplicity: usize,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<RawEntry<T>> for Entry<T> {
    type Error = HeapError;

    fn try_from(raw: RawEntry<T>) -> Result<Self, Self::Error> {
        if raw.multiplicity == 0 {
            return Err(HeapError::InvalidCount {
                requested: 0,
                available: 0,
            });
        }
        Ok(Entry::new(raw.value, raw.multiplicity))
    }
}

impl<T: PartialEq> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq> Eq for Entry<T> {}

impl<T: PartialOrd> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<T: Hash> Hash for Entry<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

/// How many occurrences an operation applies to
///
/// `All` stands for "the current multiplicity of the value", whatever it is
/// when the operation runs.
///
/// ```rust
/// use rust_indexed_heaps::Count;
///
/// assert_eq!(Count::from(3), Count::Exactly(3));
/// assert_eq!(Count::All.resolve(7), 7);
/// assert_eq!(Count::Exactly(2).resolve(7), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Count {
    /// Every occurrence currently stored
    #[default]
    All,
    /// An explicit number of occurrences
    Exactly(usize),
}

impl Count {
    /// Resolves the count against the current multiplicity
    #[inline]
    pub fn resolve(self, current: usize) -> usize {
        match self {
            Count::All => current,
            Count::Exactly(n) => n,
        }
    }
}

impl From<usize> for Count {
    fn from(n: usize) -> Self {
        Count::Exactly(n)
    }
}
