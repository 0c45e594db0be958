//! Sort engine
//!
//! Stable merge sort over a `RecordSequence`, keyed by any one attribute.
//!
//! # Invariants
//!
//! 1. Records with equal keys keep their relative input order (ascending)
//! 2. Descending output is the exact reverse of ascending output
//! 3. Empty and single-record sequences are returned unchanged
//! 4. Sorting relinks nodes; records are never cloned

mod sorter;

pub use sorter::{merge_sort, reverse, sort_sequence, SortDirection, SortSpec};
