//! Bucket hash functions for attribute indexes
//!
//! Both strategies hash the value's string form (`2024-01-02`, `09:00:00`,
//! `40`, or the text itself), so switching strategy never changes which
//! records share a key, only how keys spread over buckets.

use serde::{Deserialize, Serialize};

use crate::record::AttributeRef;

/// Which hash feeds the chained bucket table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HashStrategy {
    /// SeaHash over the UTF-8 bytes of the string form
    #[default]
    #[serde(rename = "seahash")]
    SeaHash,
    /// Sum of character codes of the string form.
    ///
    /// Anagrams collide. Only useful to reproduce legacy bucket layouts.
    #[serde(rename = "char_sum")]
    CharSum,
}

/// Maps attribute values to bucket slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BucketHasher {
    strategy: HashStrategy,
}

impl BucketHasher {
    /// Creates a hasher using the given strategy
    pub fn new(strategy: HashStrategy) -> Self {
        Self { strategy }
    }

    /// Returns the configured strategy
    pub fn strategy(&self) -> HashStrategy {
        self.strategy
    }

    /// Raw 64-bit hash of a value
    pub fn hash(&self, value: AttributeRef<'_>) -> u64 {
        let text = value.hash_text();
        match self.strategy {
            HashStrategy::SeaHash => seahash::hash(text.as_bytes()),
            HashStrategy::CharSum => text.chars().map(u64::from).sum(),
        }
    }

    /// Bucket slot in `[0, bucket_count)`.
    ///
    /// `bucket_count` must be non-zero.
    pub fn bucket(&self, value: AttributeRef<'_>, bucket_count: usize) -> usize {
        (self.hash(value) % bucket_count as u64) as usize
    }
}
