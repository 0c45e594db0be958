//! The full set of attribute indexes for one loaded batch

use crate::record::{Attribute, AttributeValue, RecordSequence, ATTRIBUTE_COUNT};

use super::attribute_index::AttributeIndex;
use super::hasher::BucketHasher;

/// Expected distinct-value count per attribute, used to size each index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizeHints([usize; ATTRIBUTE_COUNT]);

impl SizeHints {
    /// Hints in canonical attribute order
    pub fn new(counts: [usize; ATTRIBUTE_COUNT]) -> Self {
        Self(counts)
    }

    /// Same hint for every attribute
    pub fn uniform(count: usize) -> Self {
        Self([count; ATTRIBUTE_COUNT])
    }

    /// Hint for one attribute
    pub fn get(&self, attribute: Attribute) -> usize {
        self.0[attribute.position()]
    }

    /// Overrides the hint for one attribute
    pub fn set(&mut self, attribute: Attribute, count: usize) {
        self.0[attribute.position()] = count;
    }
}

/// One `AttributeIndex` per attribute, built once per batch
#[derive(Debug, Clone)]
pub struct AttributeIndexes {
    indexes: Vec<AttributeIndex>,
}

impl AttributeIndexes {
    /// Builds all indexes in a single pass over `records`.
    ///
    /// Each index's value sequences keep the relative order of `records`.
    /// A hint larger than the batch is clamped to the batch length.
    pub fn build(
        records: &RecordSequence,
        hints: &SizeHints,
        hasher: BucketHasher,
        load_factor: f64,
    ) -> Self {
        let mut indexes: Vec<AttributeIndex> = Attribute::ALL
            .iter()
            .map(|&attribute| {
                let hint = hints.get(attribute).min(records.len());
                AttributeIndex::with_size_hint(attribute, hint, hasher, load_factor)
            })
            .collect();

        for record in records {
            for index in indexes.iter_mut() {
                index.add(record.clone());
            }
        }

        Self { indexes }
    }

    /// Index for one attribute
    pub fn get(&self, attribute: Attribute) -> &AttributeIndex {
        &self.indexes[attribute.position()]
    }

    /// Records whose `attribute` equals `value`; `None` if never indexed
    pub fn lookup(&self, attribute: Attribute, value: &AttributeValue) -> Option<&RecordSequence> {
        self.get(attribute).get(value)
    }

    /// Iterates indexes in canonical attribute order
    pub fn iter(&self) -> impl Iterator<Item = &AttributeIndex> {
        self.indexes.iter()
    }
}
