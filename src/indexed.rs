//! Indexed binary heap with multiplicities
//!
//! A binary heap stored in a `Vec`, augmented with a position index
//! (value → slot) and a per-entry occurrence count. Inserting a value that is
//! already present only bumps its count; the heap topology changes only when
//! a value enters or leaves the heap for good.
//!
//! Three pieces of state are kept consistent by every operation:
//!
//! - the array, in heap order under the strategy `O`
//! - the position index, `index[data[i].value] == i` for every slot
//! - the multiplicities, each at least 1
//!
//! Every swap goes through a single routine that moves both entries and
//! rewrites both index slots.
//!
//! # Time Complexity
//!
//! | Operation          | Complexity |
//! |--------------------|------------|
//! | `insert`           | O(log n)   |
//! | `pop`              | O(log n)   |
//! | `peek`             | O(1)       |
//! | `update`/`remove`  | O(log n)   |
//! | `replace`          | O(log n)   |
//! | `heapify`          | O(n)       |
//!
//! `n` is the number of distinct values, not the total number of occurrences.
//!
//! # Example
//!
//! ```rust
//! use rust_indexed_heaps::{Count, MinIndexedHeap};
//!
//! let mut heap = MinIndexedHeap::new();
//! heap.insert(10).unwrap();
//! heap.insert_many(5, 3).unwrap();
//! heap.insert(-100).unwrap();
//!
//! assert_eq!(heap.len(), 3);
//! assert_eq!(heap.total_len(), 5);
//! assert_eq!(heap.peek(), Some(&-100));
//!
//! heap.update(&5, Count::Exactly(1)).unwrap();
//! heap.replace(&10, 7, Count::All).unwrap();
//! assert_eq!(heap.snapshot_with_counts().len(), 3);
//!
//! assert_eq!(heap.pop(), Ok(-100));
//! assert_eq!(heap.pop(), Ok(5));
//! assert_eq!(heap.pop(), Ok(7));
//! assert!(heap.pop().is_err());
//! ```

use crate::entry::{Count, Entry};
use crate::order::{MaxOrder, MinOrder};
use crate::traits::{HeapError, InvariantError, Order};
use log::{debug, trace};
use rustc_hash::FxHashMap;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

/// Indexed heap with the smallest value at the root
pub type MinIndexedHeap<T> = IndexedHeap<T, MinOrder>;

/// Indexed heap with the largest value at the root
pub type MaxIndexedHeap<T> = IndexedHeap<T, MaxOrder>;

/// A binary heap over a multiset, with a value → slot index
///
/// Each distinct value occupies one slot; repeated insertions raise the
/// slot's multiplicity. The position index lets any stored value be updated,
/// removed or replaced in O(log n).
///
/// Values are compared through [`PartialOrd`]. A value that cannot be ordered
/// against the heap's contents is rejected with [`HeapError::Incomparable`]
/// before anything is modified.
pub struct IndexedHeap<T, O = MinOrder> {
    /// Entries in heap order
    data: Vec<Entry<T>>,
    /// Slot of every stored value
    index: FxHashMap<T, usize>,
    _order: PhantomData<O>,
}

impl<T, O> IndexedHeap<T, O>
where
    T: PartialOrd + Eq + Hash + Clone,
    O: Order,
{
    /// Creates a new empty heap
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            index: FxHashMap::default(),
            _order: PhantomData,
        }
    }

    /// Creates an empty heap with room for `capacity` distinct values
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            _order: PhantomData,
        }
    }

    /// Builds a heap from a sequence of values in O(n)
    ///
    /// Equal values are folded into one entry whose slot is that of the first
    /// occurrence. The heap property is then established bottom-up.
    ///
    /// # Errors
    /// Returns `HeapError::Incomparable` if any value cannot be ordered
    /// against the first one.
    pub fn heapify<I>(values: I) -> Result<Self, HeapError>
    where
        I: IntoIterator<Item = T>,
    {
        let values: Vec<T> = values.into_iter().collect();
        if let Some(first) = values.first() {
            if values.iter().any(|v| !O::is_comparable(v, first)) {
                debug!("{} heap: heapify rejected incomparable input", O::NAME);
                return Err(HeapError::Incomparable);
            }
        }

        let mut heap = Self::with_capacity(values.len());
        for value in values {
            if let Some(&slot) = heap.index.get(&value) {
                let entry = &mut heap.data[slot];
                let grown = grow(entry.multiplicity(), 1)?;
                entry.set_multiplicity(grown);
            } else {
                heap.index.insert(value.clone(), heap.data.len());
                heap.data.push(Entry::new(value, 1));
            }
        }

        for i in (0..heap.data.len() / 2).rev() {
            heap.sift_down(i)?;
        }

        trace!("{} heap: heapified {} entries", O::NAME, heap.data.len());
        heap.debug_check_slot(0);
        Ok(heap)
    }

    /// Returns the number of distinct values in the heap
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the heap holds no values
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the total number of occurrences across all entries
    ///
    /// Saturates at `usize::MAX`.
    pub fn total_len(&self) -> usize {
        self.data
            .iter()
            .fold(0usize, |total, e| total.saturating_add(e.multiplicity()))
    }

    /// Returns the value at the root without removing it
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.data.first().map(Entry::value)
    }

    /// Returns the root entry, including its multiplicity
    #[inline]
    pub fn peek_entry(&self) -> Option<&Entry<T>> {
        self.data.first()
    }

    /// Returns how many occurrences of `value` are stored (0 if absent)
    pub fn multiplicity(&self, value: &T) -> usize {
        self.index
            .get(value)
            .map_or(0, |&slot| self.data[slot].multiplicity())
    }

    /// Returns true if `value` is stored in the heap
    #[inline]
    pub fn contains(&self, value: &T) -> bool {
        self.index.contains_key(value)
    }

    /// Returns the array slot currently holding `value`
    #[inline]
    pub fn position(&self, value: &T) -> Option<usize> {
        self.index.get(value).copied()
    }

    /// Iterates over the entries in array order
    pub fn iter(&self) -> std::slice::Iter<'_, Entry<T>> {
        self.data.iter()
    }

    /// Removes every value
    pub fn clear(&mut self) {
        self.data.clear();
        self.index.clear();
    }

    /// Inserts one occurrence of `value`
    ///
    /// # Errors
    /// Returns `HeapError::Incomparable` if `value` cannot be ordered against
    /// the values already stored.
    pub fn insert(&mut self, value: T) -> Result<(), HeapError> {
        self.insert_many(value, 1)
    }

    /// Inserts `count` occurrences of `value`
    ///
    /// If the value is already present only its multiplicity grows. Otherwise
    /// a new entry is appended and sifted up.
    ///
    /// # Errors
    /// - `HeapError::InvalidCount` if `count` is zero
    /// - `HeapError::Incomparable` if `value` cannot be ordered against the
    ///   values already stored
    /// - `HeapError::Overflow` if the multiplicity would exceed `usize::MAX`
    pub fn insert_many(&mut self, value: T, count: usize) -> Result<(), HeapError> {
        if count == 0 {
            return Err(HeapError::InvalidCount {
                requested: 0,
                available: 0,
            });
        }
        self.ensure_comparable(&value)?;

        let settled = if let Some(&slot) = self.index.get(&value) {
            let entry = &mut self.data[slot];
            let grown = grow(entry.multiplicity(), count)?;
            entry.set_multiplicity(grown);
            slot
        } else {
            let slot = self.data.len();
            self.index.insert(value.clone(), slot);
            self.data.push(Entry::new(value, count));
            let settled = self.sift_up(slot)?;
            trace!(
                "{} heap: appended entry at slot {slot}, settled at {settled}",
                O::NAME
            );
            settled
        };

        self.debug_check_slot(settled);
        Ok(())
    }

    /// Removes and returns one occurrence of the root value
    ///
    /// The root entry leaves the array only when its last occurrence is
    /// popped.
    ///
    /// # Errors
    /// Returns `HeapError::Empty` if the heap has no values.
    pub fn pop(&mut self) -> Result<T, HeapError> {
        let root = self.data.first_mut().ok_or(HeapError::Empty)?;
        let remaining = root.multiplicity() - 1;
        if remaining > 0 {
            root.set_multiplicity(remaining);
            return Ok(root.value().clone());
        }

        let entry = self.remove_at(0)?;
        Ok(entry.into_parts().0)
    }

    /// Sets the multiplicity of a stored value
    ///
    /// `Count::Exactly(n)` with `n > 0` rewrites the count in place.
    /// `Count::Exactly(0)` and `Count::All` remove the entry.
    ///
    /// # Errors
    /// Returns `HeapError::MissingValue` if `value` is not stored.
    pub fn update(&mut self, value: &T, count: impl Into<Count>) -> Result<(), HeapError> {
        let slot = self.slot_of(value)?;
        let count: Count = count.into();
        match count {
            Count::Exactly(n) if n > 0 => {
                self.data[slot].set_multiplicity(n);
                self.debug_check_slot(slot);
            }
            _ => {
                self.remove_at(slot)?;
            }
        }
        Ok(())
    }

    /// Removes every occurrence of `value`
    ///
    /// # Errors
    /// Returns `HeapError::MissingValue` if `value` is not stored.
    pub fn remove(&mut self, value: &T) -> Result<(), HeapError> {
        self.update(value, Count::All)
    }

    /// Replaces `count` occurrences of `current` with `new`
    ///
    /// When every occurrence is replaced the entry keeps its slot, takes the
    /// new value and is re-balanced in whichever direction it needs. When only
    /// some occurrences are replaced, `current` keeps the rest and `new` is
    /// inserted with the replaced count.
    ///
    /// If `new` is already stored, the replaced occurrences are added to its
    /// entry.
    ///
    /// # Errors
    /// - `HeapError::MissingValue` if `current` is not stored
    /// - `HeapError::Incomparable` if `new` cannot be ordered against the heap
    /// - `HeapError::SameValue` if `new == current`
    /// - `HeapError::InvalidCount` if the count is 0 or exceeds the
    ///   multiplicity of `current`
    /// - `HeapError::Overflow` if merging into an existing `new` entry would
    ///   exceed `usize::MAX` occurrences
    pub fn replace(
        &mut self,
        current: &T,
        new: T,
        count: impl Into<Count>,
    ) -> Result<(), HeapError> {
        let slot = self.slot_of(current)?;
        if !O::is_comparable(&new, current) {
            debug!("{} heap: replacement value is not comparable", O::NAME);
            return Err(HeapError::Incomparable);
        }
        self.ensure_comparable(&new)?;
        if new == *current {
            return Err(HeapError::SameValue);
        }

        let available = self.data[slot].multiplicity();
        let requested = Count::resolve(count.into(), available);
        if requested == 0 || requested > available {
            return Err(HeapError::InvalidCount {
                requested,
                available,
            });
        }

        // The merged count is checked before anything is touched.
        if let Some(&target) = self.index.get(&new) {
            grow(self.data[target].multiplicity(), requested)?;
        }

        if requested < available {
            self.data[slot].set_multiplicity(available - requested);
            return self.insert_many(new, requested);
        }

        if self.index.contains_key(&new) {
            // Folding into the existing entry keeps one slot per value.
            self.remove_at(slot)?;
            return self.insert_many(new, requested);
        }

        let old = self.data[slot].replace_value(new.clone());
        self.index.remove(&old);
        self.index.insert(new, slot);
        let moved = self.sift_down(slot)?;
        let settled = self.sift_up(moved)?;
        trace!(
            "{} heap: replaced value in slot {slot}, settled at {settled}",
            O::NAME
        );

        self.debug_check_slot(settled);
        Ok(())
    }

    /// Returns the values in array order
    pub fn snapshot(&self) -> Vec<T> {
        self.data.iter().map(|e| e.value().clone()).collect()
    }

    /// Returns `(value, multiplicity)` pairs in array order
    pub fn snapshot_with_counts(&self) -> Vec<(T, usize)> {
        self.data
            .iter()
            .map(|e| (e.value().clone(), e.multiplicity()))
            .collect()
    }

    /// Verifies heap order, index consistency and multiplicities
    ///
    /// # Errors
    /// Returns an [`InvariantError`] describing the first violation found.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() != self.data.len() {
            return Err(InvariantError::new(format!(
                "index holds {} values but array holds {} entries",
                self.index.len(),
                self.data.len()
            )));
        }

        for (i, entry) in self.data.iter().enumerate() {
            if entry.multiplicity() == 0 {
                return Err(InvariantError::new(format!(
                    "entry at slot {i} has zero multiplicity"
                )));
            }
            match self.index.get(entry.value()) {
                Some(&slot) if slot == i => {}
                Some(&slot) => {
                    return Err(InvariantError::new(format!(
                        "entry at slot {i} is indexed at slot {slot}"
                    )))
                }
                None => {
                    return Err(InvariantError::new(format!(
                        "entry at slot {i} is missing from the index"
                    )))
                }
            }
            if i > 0 {
                let parent = (i - 1) / 2;
                if O::comes_before(entry.value(), self.data[parent].value()) {
                    return Err(InvariantError::new(format!(
                        "entry at slot {i} comes before its parent at slot {parent}"
                    )));
                }
            }
        }

        Ok(())
    }

    fn slot_of(&self, value: &T) -> Result<usize, HeapError> {
        self.index.get(value).copied().ok_or(HeapError::MissingValue)
    }

    /// Checks `value` against the root, or against itself on an empty heap
    fn ensure_comparable(&self, value: &T) -> Result<(), HeapError> {
        let reference = self.data.first().map_or(value, Entry::value);
        if O::is_comparable(value, reference) {
            Ok(())
        } else {
            debug!("{} heap: rejected incomparable value", O::NAME);
            Err(HeapError::Incomparable)
        }
    }

    /// Swaps two slots and rewrites both index entries
    fn swap_entries(&mut self, a: usize, b: usize) {
        self.data.swap(a, b);
        if let Some(slot) = self.index.get_mut(self.data[a].value()) {
            *slot = a;
        }
        if let Some(slot) = self.index.get_mut(self.data[b].value()) {
            *slot = b;
        }
    }

    /// Takes the entry at `slot` out of the heap entirely
    ///
    /// The last entry fills the hole and is then sifted in both directions,
    /// since it may belong above or below its new position.
    fn remove_at(&mut self, slot: usize) -> Result<Entry<T>, HeapError> {
        let len = self.data.len();
        if slot >= len {
            return Err(HeapError::IndexOutOfRange { index: slot, len });
        }

        let last = len - 1;
        if slot != last {
            self.swap_entries(slot, last);
        }
        let entry = self.data.pop().ok_or(HeapError::Empty)?;
        self.index.remove(entry.value());

        if slot < self.data.len() {
            let moved = self.sift_down(slot)?;
            let settled = self.sift_up(moved)?;
            self.debug_check_slot(settled);
        } else {
            self.debug_check_slot(slot);
        }

        trace!("{} heap: removed entry from slot {slot}", O::NAME);
        Ok(entry)
    }

    /// Move element at index up to maintain heap property
    ///
    /// Returns the slot where the entry came to rest.
    fn sift_up(&mut self, mut index: usize) -> Result<usize, HeapError> {
        let len = self.data.len();
        if index >= len {
            return Err(HeapError::IndexOutOfRange { index, len });
        }

        while index > 0 {
            let parent = (index - 1) / 2;
            if O::comes_before(self.data[index].value(), self.data[parent].value()) {
                self.swap_entries(index, parent);
                index = parent;
            } else {
                break;
            }
        }
        Ok(index)
    }

    /// Move element at index down to maintain heap property
    ///
    /// Swaps with whichever child comes first under `O`. Returns the slot
    /// where the entry came to rest.
    fn sift_down(&mut self, mut index: usize) -> Result<usize, HeapError> {
        let len = self.data.len();
        if index >= len {
            return Err(HeapError::IndexOutOfRange { index, len });
        }

        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut first = index;

            if left < len && O::comes_before(self.data[left].value(), self.data[first].value()) {
                first = left;
            }
            if right < len && O::comes_before(self.data[right].value(), self.data[first].value())
            {
                first = right;
            }

            if first != index {
                self.swap_entries(index, first);
                index = first;
            } else {
                return Ok(index);
            }
        }
    }

    /// Checks one slot against its parent, its children and the index
    ///
    /// Only the slot an operation settled on is examined, which keeps debug
    /// builds O(log n) per operation. `check_invariants` covers the whole heap.
    #[inline]
    fn debug_check_slot(&self, slot: usize) {
        #[cfg(debug_assertions)]
        {
            assert_eq!(
                self.index.len(),
                self.data.len(),
                "{} heap: index and array sizes diverged",
                O::NAME
            );
            if let Some(entry) = self.data.get(slot) {
                assert!(
                    entry.multiplicity() > 0,
                    "{} heap: zero multiplicity at slot {slot}",
                    O::NAME
                );
                assert_eq!(
                    self.index.get(entry.value()),
                    Some(&slot),
                    "{} heap: slot {slot} is indexed elsewhere",
                    O::NAME
                );
                if slot > 0 {
                    let parent = (slot - 1) / 2;
                    assert!(
                        !O::comes_before(entry.value(), self.data[parent].value()),
                        "{} heap: slot {slot} comes before its parent",
                        O::NAME
                    );
                }
                for child in [2 * slot + 1, 2 * slot + 2] {
                    if let Some(below) = self.data.get(child) {
                        assert!(
                            !O::comes_before(below.value(), entry.value()),
                            "{} heap: child {child} comes before slot {slot}",
                            O::NAME
                        );
                    }
                }
            }
        }
        #[cfg(not(debug_assertions))]
        let _ = slot;
    }
}

/// Adds occurrences to a multiplicity, failing instead of wrapping
#[inline]
fn grow(current: usize, added: usize) -> Result<usize, HeapError> {
    current
        .checked_add(added)
        .ok_or(HeapError::Overflow { current, added })
}

impl<T, O> Default for IndexedHeap<T, O>
where
    T: PartialOrd + Eq + Hash + Clone,
    O: Order,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, O> Clone for IndexedHeap<T, O> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            index: self.index.clone(),
            _order: PhantomData,
        }
    }
}

impl<T: fmt::Debug, O: Order> fmt::Debug for IndexedHeap<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedHeap")
            .field("order", &O::NAME)
            .field("entries", &self.data)
            .finish()
    }
}

/// Positional equality
///
/// Two heaps are equal when every slot holds the same value with the same
/// multiplicity and the same index entry. Heaps holding the same multiset in
/// different valid arrangements are not equal.
impl<T, O> PartialEq for IndexedHeap<T, O>
where
    T: Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.data.len() == other.data.len()
            && self.data.iter().zip(&other.data).all(|(a, b)| {
                a.value() == b.value()
                    && a.multiplicity() == b.multiplicity()
                    && self.index.get(a.value()) == other.index.get(b.value())
            })
    }
}

impl<T: Eq + Hash, O> Eq for IndexedHeap<T, O> {}

impl<'a, T, O> IntoIterator for &'a IndexedHeap<T, O> {
    type Item = &'a Entry<T>;
    type IntoIter = std::slice::Iter<'a, Entry<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
