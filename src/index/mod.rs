//! Attribute index subsystem
//!
//! One chained hash table per record attribute, built once when a batch is
//! loaded and never rebuilt from a filtered subset.
//!
//! # Design Principles
//!
//! - Derived state: indexes mirror the loaded batch, never the source of truth
//! - In-memory only: no persistence
//! - Sized up front: `ceil(distinct values x load factor)` buckets per attribute,
//!   never more distinct values than records
//!
//! # Invariants
//!
//! - Every loaded record appears in exactly one key entry per attribute
//! - A key entry's records keep their relative batch order
//! - An unknown value is "not found" (`None`), never an error

mod attribute_index;
mod hasher;
mod indexes;

pub use attribute_index::{AttributeIndex, DEFAULT_LOAD_FACTOR, MAX_BUCKETS, MAX_LOAD_FACTOR};
pub use hasher::{BucketHasher, HashStrategy};
pub use indexes::{AttributeIndexes, SizeHints};
