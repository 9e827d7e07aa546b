//! Edge case tests
//!
//! These target the concrete scenarios a user of the heap relies on:
//! - Empty heap behaviour
//! - Single entry with a multiplicity above one
//! - Replacing values in place
//! - Mixed numeric input and incomparable values
//! - Positional equality

use rust_indexed_heaps::{Count, HeapError, MaxIndexedHeap, MinIndexedHeap, Value};
use std::f64::consts::PI;

// ============================================================================
// Basic scenarios
// ============================================================================

#[test]
fn test_peek_tracks_minimum() {
    let mut heap = MinIndexedHeap::new();
    for v in [10, 5, -100, 1000] {
        heap.insert(v).unwrap();
    }
    assert_eq!(heap.peek(), Some(&-100));
}

#[test]
fn test_repeated_value_pops_each_occurrence() {
    let mut heap = MinIndexedHeap::new();
    for _ in 0..3 {
        heap.insert(5).unwrap();
    }

    for remaining in (0..3).rev() {
        assert_eq!(heap.pop(), Ok(5));
        assert_eq!(heap.multiplicity(&5), remaining);
    }
    assert!(heap.is_empty());
    assert_eq!(heap.position(&5), None);
}

#[test]
fn test_heapify_mixed_numbers() {
    let values = [
        Value::from(500),
        Value::from(300),
        Value::from(-1000),
        Value::from(-1.5),
        Value::from(PI),
    ];
    let heap = MinIndexedHeap::heapify(values).unwrap();

    assert_eq!(heap.peek(), Some(&Value::Int(-1000)));
    assert_eq!(heap.len(), 5);
}

#[test]
fn test_replace_only_value() {
    let mut heap = MinIndexedHeap::new();
    heap.insert("a").unwrap();
    heap.replace(&"a", "b", Count::All).unwrap();

    assert_eq!(heap.peek(), Some(&"b"));
    assert!(!heap.contains(&"a"));
    assert_eq!(heap.len(), 1);
}

#[test]
fn test_update_lowers_multiplicity() {
    let mut heap = MinIndexedHeap::new();
    heap.insert_many(5, 3).unwrap();
    heap.update(&5, 1).unwrap();

    assert_eq!(heap.pop(), Ok(5));
    assert!(!heap.contains(&5));
    assert_eq!(heap.pop(), Err(HeapError::Empty));
}

#[test]
fn test_pop_empty_heap() {
    let mut heap: MaxIndexedHeap<i32> = MaxIndexedHeap::new();
    assert_eq!(heap.pop(), Err(HeapError::Empty));
    assert_eq!(heap.peek(), None);
}

// ============================================================================
// Boundaries
// ============================================================================

#[test]
fn test_single_entry_remove_and_replace() {
    let mut heap = MaxIndexedHeap::new();
    heap.insert(1).unwrap();
    heap.replace(&1, 2, 1).unwrap();
    assert_eq!(heap.snapshot_with_counts(), vec![(2, 1)]);

    heap.remove(&2).unwrap();
    assert!(heap.is_empty());
    assert!(heap.check_invariants().is_ok());
}

#[test]
fn test_peek_entry_reports_multiplicity() {
    let mut heap = MinIndexedHeap::new();
    heap.insert_many('q', 4).unwrap();
    heap.insert('z').unwrap();

    let root = heap.peek_entry().unwrap();
    assert_eq!(root.value(), &'q');
    assert_eq!(root.multiplicity(), 4);
    assert_eq!(heap.total_len(), 5);
}

#[test]
fn test_replace_all_after_partial_pops() {
    let mut heap = MinIndexedHeap::new();
    heap.insert_many(1, 3).unwrap();
    heap.insert(2).unwrap();
    heap.pop().unwrap();

    heap.replace(&1, 9, Count::All).unwrap();
    assert_eq!(heap.multiplicity(&9), 2);
    assert_eq!(heap.peek(), Some(&2));
}

#[test]
fn test_error_messages() {
    assert_eq!(HeapError::Empty.to_string(), "pop from empty heap");
    assert!(HeapError::InvalidCount {
        requested: 4,
        available: 2
    }
    .to_string()
    .contains("between 1 and 2"));
    assert!(HeapError::MissingValue.to_string().contains("not in the heap"));
}

// ============================================================================
// Incomparable values
// ============================================================================

#[test]
fn test_text_into_numeric_heap_fails() {
    let mut heap = MinIndexedHeap::heapify([Value::from(1), Value::from(2.5)]).unwrap();
    let before = heap.clone();

    assert_eq!(heap.insert(Value::from("x")), Err(HeapError::Incomparable));
    assert_eq!(
        heap.replace(&Value::from(1), Value::from("x"), Count::All),
        Err(HeapError::Incomparable)
    );
    assert_eq!(heap, before);
}

#[test]
fn test_heapify_rejects_mixed_kinds() {
    let result = MaxIndexedHeap::heapify([Value::from("a"), Value::from(3)]);
    assert_eq!(result.unwrap_err(), HeapError::Incomparable);
}

#[test]
fn test_nan_rejected() {
    let mut heap = MinIndexedHeap::new();
    assert_eq!(heap.insert(Value::from(f64::NAN)), Err(HeapError::Incomparable));
    heap.insert(Value::from(0.5)).unwrap();
    assert_eq!(heap.insert(Value::from(f64::NAN)), Err(HeapError::Incomparable));
    assert_eq!(heap.len(), 1);
}

// ============================================================================
// Structural equality
// ============================================================================

#[test]
fn test_equality_is_positional() {
    // Same multiset, different valid layouts
    let mut a = MinIndexedHeap::new();
    let mut b = MinIndexedHeap::new();
    for v in [1, 2, 3] {
        a.insert(v).unwrap();
    }
    for v in [1, 3, 2] {
        b.insert(v).unwrap();
    }

    assert!(a.check_invariants().is_ok());
    assert!(b.check_invariants().is_ok());
    assert_ne!(a, b);
    assert_eq!(a.clone(), a);
}

#[test]
fn test_equality_checks_multiplicity() {
    let a = MaxIndexedHeap::heapify([4, 4, 1]).unwrap();
    let b = MaxIndexedHeap::heapify([4, 1]).unwrap();
    assert_ne!(a, b);
    assert_eq!(a.snapshot(), b.snapshot());
}
