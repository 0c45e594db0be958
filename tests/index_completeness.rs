//! Index Completeness Tests
//!
//! Tests for attribute index invariants:
//! - Every record is found under its own value, for every attribute
//! - Key entries keep batch order
//! - Both hash strategies index identically
//! - Unknown values are "not found", not errors

mod common;

use common::*;
use timetable::config::EngineConfig;
use timetable::index::{AttributeIndex, AttributeIndexes, BucketHasher, HashStrategy, SizeHints};
use timetable::query::{Domains, QueryEngine, RecordBatch};
use timetable::record::{Attribute, AttributeValue, Record, RecordRef, RecordSequence};

// =============================================================================
// Helper Functions
// =============================================================================

fn sequence(records: Vec<Record>) -> RecordSequence {
    records.into_iter().map(Record::into_ref).collect()
}

fn build(records: &RecordSequence, strategy: HashStrategy) -> AttributeIndexes {
    let hints = Domains::collect(records).size_hints();
    AttributeIndexes::build(records, &hints, BucketHasher::new(strategy), 1.3)
}

fn assert_complete(indexes: &AttributeIndexes, records: &RecordSequence) {
    for record in records {
        for attribute in Attribute::ALL {
            let found = indexes
                .lookup(attribute, &record.value(attribute))
                .unwrap_or_else(|| panic!("{} not indexed under {}", record.location(), attribute));
            assert!(found.contains(record), "{} missing under {}", record.location(), attribute);
        }
    }
}

// =============================================================================
// Completeness Tests
// =============================================================================

/// SeaHash buckets index every record under every attribute.
#[test]
fn test_completeness_seahash() {
    let records = sequence(mixed_batch());
    assert_complete(&build(&records, HashStrategy::SeaHash), &records);
}

/// Character-sum buckets collide often but still index everything.
#[test]
fn test_completeness_char_sum() {
    let records = sequence(mixed_batch());
    assert_complete(&build(&records, HashStrategy::CharSum), &records);
}

/// Undersized hints still index everything, just with longer chains.
#[test]
fn test_completeness_with_undersized_hints() {
    let records = sequence(mixed_batch());
    let indexes = AttributeIndexes::build(
        &records,
        &SizeHints::uniform(1),
        BucketHasher::new(HashStrategy::SeaHash),
        1.3,
    );
    assert_complete(&indexes, &records);
}

/// Engine-built indexes match the configured strategy and are complete.
#[test]
fn test_engine_indexes_complete() {
    let config = EngineConfig {
        hash_strategy: HashStrategy::CharSum,
        ..EngineConfig::default()
    };
    let mut engine = QueryEngine::new(config);
    engine.load(RecordBatch::new(mixed_batch()));

    let pristine = engine.pristine().unwrap().clone();
    assert_complete(engine.indexes().unwrap(), &pristine);
}

// =============================================================================
// Key Entry Tests
// =============================================================================

/// Records under one key appear in batch order.
#[test]
fn test_key_entry_batch_order() {
    let records = sequence(vec![
        with_code("IP", "first"),
        with_code("OS", "x"),
        with_code("IP", "second"),
        with_code("DB", "y"),
        with_code("IP", "third"),
    ]);

    for strategy in [HashStrategy::SeaHash, HashStrategy::CharSum] {
        let indexes = build(&records, strategy);
        let found = indexes
            .lookup(Attribute::ModuleCode, &AttributeValue::from("IP"))
            .unwrap();
        assert_eq!(locations(found), vec!["first", "second", "third"]);
    }
}

/// Key entries partition the batch for each attribute.
#[test]
fn test_key_entries_partition_batch() {
    let records = sequence(mixed_batch());
    let indexes = build(&records, HashStrategy::SeaHash);
    let domains = Domains::collect(&records);

    for index in indexes.iter() {
        assert_eq!(index.record_count(), records.len());
        assert_eq!(index.key_count(), domains.count(index.attribute()));
    }
}

/// Anagram codes land in one char-sum bucket but stay distinct keys.
#[test]
fn test_char_sum_collisions_keep_keys_apart() {
    let records = sequence(vec![with_code("AB", "ab"), with_code("BA", "ba")]);
    let indexes = build(&records, HashStrategy::CharSum);

    let ab = indexes
        .lookup(Attribute::ModuleCode, &AttributeValue::from("AB"))
        .unwrap();
    assert_eq!(locations(ab), vec!["ab"]);

    let index: &AttributeIndex = indexes.get(Attribute::ModuleCode);
    assert_eq!(index.key_count(), 2);
}

/// Values never seen are `None`.
#[test]
fn test_unknown_value_not_found() {
    let records = sequence(mixed_batch());
    let indexes = build(&records, HashStrategy::SeaHash);

    assert!(indexes
        .lookup(Attribute::Lecturer, &AttributeValue::from("Nobody"))
        .is_none());
    assert!(indexes
        .lookup(Attribute::Size, &AttributeValue::Integer(999))
        .is_none());
}

/// Bucket sizing follows ceil(distinct x load factor).
#[test]
fn test_bucket_sizing() {
    assert_eq!(AttributeIndex::bucket_count_for(10, 1.3), 13);
    assert_eq!(AttributeIndex::bucket_count_for(3, 1.3), 4);

    let records = sequence(mixed_batch());
    let indexes = build(&records, HashStrategy::SeaHash);
    let index = indexes.get(Attribute::ModuleCode);
    assert_eq!(index.bucket_count(), AttributeIndex::bucket_count_for(4, 1.3));
}

/// Shared records: index entries point at the same allocation as the batch.
#[test]
fn test_index_shares_records() {
    let records = sequence(vec![with_code("IP", "only")]);
    let indexes = build(&records, HashStrategy::SeaHash);

    let original: &RecordRef = records.first().unwrap();
    let indexed = indexes
        .lookup(Attribute::Location, &AttributeValue::from("only"))
        .unwrap()
        .first()
        .unwrap();
    assert!(std::sync::Arc::ptr_eq(original, indexed));
}
