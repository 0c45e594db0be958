//! Input handed from the ingestion collaborator to the engine

use crate::index::SizeHints;
use crate::record::{Record, RecordRef, RecordSequence};

use super::domains::Domains;

/// An ordered batch of parsed records plus per-attribute index size hints
#[derive(Debug, Clone)]
pub struct RecordBatch {
    records: RecordSequence,
    hints: SizeHints,
}

impl RecordBatch {
    /// Wraps records in ingestion order, counting distinct values for hints
    pub fn new(records: impl IntoIterator<Item = Record>) -> Self {
        let records: RecordSequence = records.into_iter().map(Record::into_ref).collect();
        let hints = Domains::collect(&records).size_hints();
        Self { records, hints }
    }

    /// Wraps records with hints supplied by the ingestion collaborator
    pub fn with_size_hints(records: impl IntoIterator<Item = RecordRef>, hints: SizeHints) -> Self {
        Self {
            records: records.into_iter().collect(),
            hints,
        }
    }

    /// Records in ingestion order
    pub fn records(&self) -> &RecordSequence {
        &self.records
    }

    /// Index size hints
    pub fn hints(&self) -> &SizeHints {
        &self.hints
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the batch has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn into_parts(self) -> (RecordSequence, SizeHints) {
        (self.records, self.hints)
    }
}
