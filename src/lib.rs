//! Indexed Heap Data Structures for Rust
//!
//! This crate provides a binary heap over a multiset, augmented with a
//! position index so that any stored value can be updated, removed or replaced
//! in O(log n).
//!
//! # Features
//!
//! - **Multiplicities**: inserting a value that is already present raises its
//!   count instead of taking a second slot
//! - **Position index**: value → slot map kept in sync on every swap
//! - **Pluggable ordering**: [`MinOrder`](order::MinOrder) and
//!   [`MaxOrder`](order::MaxOrder) strategies chosen by type parameter
//! - **Validate-then-act**: a failed operation leaves the heap unchanged
//! - **O(n) construction** via [`IndexedHeap::heapify`]
//!
//! # Example
//!
//! ```rust
//! use rust_indexed_heaps::MaxIndexedHeap;
//!
//! let mut heap = MaxIndexedHeap::new();
//! heap.insert("low").unwrap();
//! heap.insert_many("urgent", 2).unwrap();
//!
//! assert_eq!(heap.peek(), Some(&"urgent"));
//! heap.replace(&"urgent", "later", 1).unwrap();
//!
//! assert_eq!(heap.pop(), Ok("urgent"));
//! assert_eq!(heap.pop(), Ok("low"));
//! assert_eq!(heap.pop(), Ok("later"));
//! assert!(heap.is_empty());
//! ```

pub mod entry;
pub mod indexed;
pub mod order;
pub mod traits;
pub mod value;

// Re-export the main types for convenience
pub use entry::{Count, Entry};
pub use indexed::{IndexedHeap, MaxIndexedHeap, MinIndexedHeap};
pub use traits::{HeapError, InvariantError, Order};
pub use value::Value;
