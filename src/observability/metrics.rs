//! Query engine metrics
//!
//! - Counters only
//! - Monotonic increase
//! - Reset only when the registry is created

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for one engine session
///
/// Counters are atomics so a shared `&MetricsRegistry` can be read while the
/// engine owns it.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Batches loaded
    batches_loaded: AtomicU64,
    /// Records loaded across all batches
    records_loaded: AtomicU64,
    /// Filters applied
    filters_applied: AtomicU64,
    /// Sorts applied
    sorts_applied: AtomicU64,
    /// Range and time-window searches
    range_searches: AtomicU64,
    /// Resets to the pristine batch
    resets: AtomicU64,
    /// Export sequences prepared
    exports: AtomicU64,
    /// Operations that left the working result empty
    empty_results: AtomicU64,
    /// Caller requests rejected before reaching the engine
    rejected_requests: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a loaded batch of `records` records
    pub fn record_batch(&self, records: u64) {
        self.batches_loaded.fetch_add(1, Ordering::Relaxed);
        self.records_loaded.fetch_add(records, Ordering::Relaxed);
    }

    /// Increment filters applied
    pub fn increment_filters(&self) {
        self.filters_applied.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment sorts applied
    pub fn increment_sorts(&self) {
        self.sorts_applied.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment range searches
    pub fn increment_range_searches(&self) {
        self.range_searches.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment resets
    pub fn increment_resets(&self) {
        self.resets.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment exports
    pub fn increment_exports(&self) {
        self.exports.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment empty results
    pub fn increment_empty_results(&self) {
        self.empty_results.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment rejected requests
    pub fn increment_rejected(&self) {
        self.rejected_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            batches_loaded: self.batches_loaded.load(Ordering::Relaxed),
            records_loaded: self.records_loaded.load(Ordering::Relaxed),
            filters_applied: self.filters_applied.load(Ordering::Relaxed),
            sorts_applied: self.sorts_applied.load(Ordering::Relaxed),
            range_searches: self.range_searches.load(Ordering::Relaxed),
            resets: self.resets.load(Ordering::Relaxed),
            exports: self.exports.load(Ordering::Relaxed),
            empty_results: self.empty_results.load(Ordering::Relaxed),
            rejected_requests: self.rejected_requests.load(Ordering::Relaxed),
        }
    }

    /// Current snapshot serialized as JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.snapshot()).unwrap_or_default()
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub batches_loaded: u64,
    pub records_loaded: u64,
    pub filters_applied: u64,
    pub sorts_applied: u64,
    pub range_searches: u64,
    pub resets: u64,
    pub exports: u64,
    pub empty_results: u64,
    pub rejected_requests: u64,
}
