//! Chained hash table from one attribute's values to the records carrying them
//!
//! Each bucket is a chain of key entries; each key entry owns the sequence of
//! records sharing that value, in the order they were added.

use crate::record::{Attribute, AttributeRef, AttributeValue, RecordRef, RecordSequence};

use super::hasher::BucketHasher;

/// Default ratio of buckets to expected distinct values
pub const DEFAULT_LOAD_FACTOR: f64 = 1.3;

/// Largest accepted ratio of buckets to expected distinct values
pub const MAX_LOAD_FACTOR: f64 = 16.0;

/// Upper bound on one table's bucket count, whatever the hint
pub const MAX_BUCKETS: usize = 1 << 20;

/// One distinct value and every record that carries it
#[derive(Debug, Clone)]
struct KeyEntry {
    key: AttributeValue,
    records: RecordSequence,
}

/// Hash index over a single attribute.
///
/// Lookups are O(1) on average; chain length depends on hash quality.
#[derive(Debug, Clone)]
pub struct AttributeIndex {
    attribute: Attribute,
    hasher: BucketHasher,
    buckets: Vec<Vec<KeyEntry>>,
    record_count: usize,
}

impl AttributeIndex {
    /// Creates an empty index sized for `distinct_hint` distinct values.
    ///
    /// Allocates `max(1, ceil(distinct_hint * load_factor))` buckets.
    pub fn with_size_hint(
        attribute: Attribute,
        distinct_hint: usize,
        hasher: BucketHasher,
        load_factor: f64,
    ) -> Self {
        let bucket_count = Self::bucket_count_for(distinct_hint, load_factor);
        Self {
            attribute,
            hasher,
            buckets: vec![Vec::new(); bucket_count],
            record_count: 0,
        }
    }

    /// Bucket table size for a given hint and load factor, between 1 and
    /// `MAX_BUCKETS`
    pub fn bucket_count_for(distinct_hint: usize, load_factor: f64) -> usize {
        let wanted = (distinct_hint as f64 * load_factor).ceil();
        if wanted.is_finite() && wanted < MAX_BUCKETS as f64 {
            (wanted as usize).max(1)
        } else {
            MAX_BUCKETS
        }
    }

    /// Indexed attribute
    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    /// Adds a record under its value for this attribute.
    ///
    /// Walks the target chain; appends to the matching key entry, or opens
    /// a new entry at the tail of the chain.
    pub fn add(&mut self, record: RecordRef) {
        let key = record.get(self.attribute);
        let slot = self.hasher.bucket(key, self.buckets.len());
        let chain = &mut self.buckets[slot];

        match chain.iter_mut().find(|entry| entry.key.as_ref() == key) {
            Some(entry) => entry.records.push(record.clone()),
            None => {
                let mut records = RecordSequence::new();
                records.push(record.clone());
                chain.push(KeyEntry {
                    key: key.to_value(),
                    records,
                });
            }
        }
        self.record_count += 1;
    }

    /// Records carrying `value`, in insertion order.
    ///
    /// `None` means the value was never indexed. A value of the wrong kind
    /// for this attribute is simply never found.
    pub fn get(&self, value: &AttributeValue) -> Option<&RecordSequence> {
        self.lookup(value.as_ref())
    }

    /// Same as `get`, probing with a borrowed value
    pub fn lookup(&self, value: AttributeRef<'_>) -> Option<&RecordSequence> {
        let slot = self.hasher.bucket(value, self.buckets.len());
        self.buckets[slot]
            .iter()
            .find(|entry| entry.key.as_ref() == value)
            .map(|entry| &entry.records)
    }

    /// Number of buckets in the table
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of distinct values indexed
    pub fn key_count(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Number of records indexed
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Length of the longest bucket chain (collision diagnostics)
    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Indexed values, in bucket order
    pub fn keys(&self) -> impl Iterator<Item = &AttributeValue> {
        self.buckets.iter().flatten().map(|entry| &entry.key)
    }
}
