//! The stateful query session over one loaded batch
//!
//! Every filter, sort and range operation replaces the working result with
//! a derived sequence. Indexes and the pristine backup are built once per
//! load and never rebuilt from a filtered subset.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::mem;

use chrono::NaiveTime;
use serde::Serialize;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::index::{AttributeIndex, AttributeIndexes};
use crate::observability::{log_event, log_event_with_fields, Event, MetricsRegistry};
use crate::record::{Attribute, AttributeValue, Record, RecordSequence};
use crate::sort::{merge_sort, sort_sequence, SortDirection, SortSpec};

use super::batch::RecordBatch;
use super::domains::Domains;
use super::errors::{QueryError, QueryResult};
use super::export::ExportSink;
use super::range::{self, RangeKey};

/// Lifecycle state of a query engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    /// No batch loaded; every query fails with TT_INDEX_NOT_BUILT
    Empty,
    /// Working result is the pristine batch
    Unfiltered,
    /// Working result was derived by filter, sort or range operations
    Filtered,
}

impl EngineState {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineState::Empty => "empty",
            EngineState::Unfiltered => "unfiltered",
            EngineState::Filtered => "filtered",
        }
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything derived from one loaded batch
#[derive(Debug)]
struct LoadedBatch {
    id: Uuid,
    indexes: AttributeIndexes,
    pristine: RecordSequence,
    working: RecordSequence,
    domains: Domains,
    filtered: bool,
}

impl LoadedBatch {
    /// Marks the working result derived and refreshes its domains
    fn refresh_domains(&mut self) -> usize {
        self.domains = QueryEngine::recompute_domains(&self.working);
        self.filtered = true;
        self.working.len()
    }
}

/// Query session: owns the working result for one batch at a time
#[derive(Debug)]
pub struct QueryEngine {
    config: EngineConfig,
    batch: Option<LoadedBatch>,
    metrics: MetricsRegistry,
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl QueryEngine {
    /// Creates an engine with no batch loaded
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            batch: None,
            metrics: MetricsRegistry::new(),
        }
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Operation counters for this session
    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    /// Current lifecycle state
    pub fn state(&self) -> EngineState {
        match &self.batch {
            None => EngineState::Empty,
            Some(loaded) if loaded.filtered => EngineState::Filtered,
            Some(_) => EngineState::Unfiltered,
        }
    }

    /// Discards all state and builds indexes, pristine backup and domains
    /// for `batch`. Returns the new batch id.
    pub fn load(&mut self, batch: RecordBatch) -> Uuid {
        let id = Uuid::new_v4();
        let id_text = id.to_string();
        let count = batch.len().to_string();
        log_event_with_fields(
            Event::BatchLoadBegin,
            &[("batch_id", id_text.as_str()), ("records", count.as_str())],
        );

        self.batch = None;
        let (records, hints) = batch.into_parts();

        let indexes = AttributeIndexes::build(
            &records,
            &hints,
            self.config.hasher(),
            self.config.load_factor,
        );
        let buckets: usize = indexes.iter().map(AttributeIndex::bucket_count).sum();
        let longest = indexes
            .iter()
            .map(AttributeIndex::longest_chain)
            .max()
            .unwrap_or(0);
        let (buckets, longest) = (buckets.to_string(), longest.to_string());
        log_event_with_fields(
            Event::IndexBuilt,
            &[
                ("batch_id", id_text.as_str()),
                ("buckets", buckets.as_str()),
                ("longest_chain", longest.as_str()),
            ],
        );

        let domains = Domains::collect(&records);
        self.metrics.record_batch(records.len() as u64);
        self.batch = Some(LoadedBatch {
            id,
            indexes,
            working: records.clone(),
            pristine: records,
            domains,
            filtered: false,
        });

        log_event_with_fields(
            Event::BatchLoaded,
            &[("batch_id", id_text.as_str()), ("records", count.as_str())],
        );
        id
    }

    /// Id of the loaded batch
    pub fn batch_id(&self) -> QueryResult<Uuid> {
        Ok(self.loaded()?.id)
    }

    /// Current working result, in its current order
    pub fn working(&self) -> QueryResult<&RecordSequence> {
        Ok(&self.loaded()?.working)
    }

    /// The full batch in ingestion order
    pub fn pristine(&self) -> QueryResult<&RecordSequence> {
        Ok(&self.loaded()?.pristine)
    }

    /// The 15 attribute indexes of the loaded batch
    pub fn indexes(&self) -> QueryResult<&AttributeIndexes> {
        Ok(&self.loaded()?.indexes)
    }

    /// Distinct values per attribute over the working result
    pub fn domains(&self) -> QueryResult<&Domains> {
        Ok(&self.loaded()?.domains)
    }

    /// Distinct values of one attribute over the working result
    pub fn domain(&self, attribute: Attribute) -> QueryResult<&BTreeSet<AttributeValue>> {
        Ok(self.loaded()?.domains.get(attribute))
    }

    /// True when more than one value of `attribute` remains
    pub fn is_selectable(&self, attribute: Attribute) -> QueryResult<bool> {
        Ok(self.loaded()?.domains.is_selectable(attribute))
    }

    /// Collects per-attribute domains over any sequence
    pub fn recompute_domains(sequence: &RecordSequence) -> Domains {
        Domains::collect(sequence)
    }

    /// Index lookup; does not touch the working result.
    ///
    /// `None` means no record of the batch carries `value`.
    pub fn filter_by_attribute(
        &self,
        attribute: Attribute,
        value: &AttributeValue,
    ) -> QueryResult<Option<&RecordSequence>> {
        Ok(self.loaded()?.indexes.lookup(attribute, value))
    }

    /// Keeps the working-result records present in `candidate`, preserving
    /// the working result's order
    pub fn apply_filter(&mut self, candidate: &RecordSequence) -> QueryResult<()> {
        let loaded = Self::loaded_mut(&mut self.batch)?;
        loaded.working = intersect(&loaded.working, Some(candidate));
        let remaining = loaded.refresh_domains();

        let size = candidate.len().to_string();
        self.metrics.increment_filters();
        self.observe(Event::FilterApplied, remaining, &[("candidate", size.as_str())]);
        Ok(())
    }

    /// Lookup plus intersection. A value never indexed empties the working
    /// result.
    pub fn filter(&mut self, attribute: Attribute, value: &AttributeValue) -> QueryResult<()> {
        let loaded = Self::loaded_mut(&mut self.batch)?;
        let candidate = loaded.indexes.lookup(attribute, value);
        let filtered = intersect(&loaded.working, candidate);
        loaded.working = filtered;
        let remaining = loaded.refresh_domains();

        let value = value.to_string();
        self.metrics.increment_filters();
        self.observe(
            Event::FilterApplied,
            remaining,
            &[("attribute", attribute.name()), ("value", value.as_str())],
        );
        Ok(())
    }

    /// Stable re-sort of the current working result
    pub fn sort(&mut self, spec: SortSpec) -> QueryResult<()> {
        let loaded = Self::loaded_mut(&mut self.batch)?;
        let working = mem::take(&mut loaded.working);
        loaded.working = sort_sequence(working, spec);
        loaded.filtered = true;
        let remaining = loaded.working.len();

        let direction = match spec.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        self.metrics.increment_sorts();
        self.observe(
            Event::SortApplied,
            remaining,
            &[("attribute", spec.attribute.name()), ("direction", direction)],
        );
        Ok(())
    }

    /// Inclusive range search.
    ///
    /// Bounds are applied literally; `lower > upper` yields an empty result.
    pub fn range_search(
        &mut self,
        lower: &AttributeValue,
        upper: &AttributeValue,
        key: RangeKey,
    ) -> QueryResult<()> {
        let loaded = Self::loaded_mut(&mut self.batch)?;
        key.check_bounds(lower, upper)?;

        let mut window_empty = false;
        match key {
            RangeKey::Attribute(attribute) => {
                let working = mem::take(&mut loaded.working);
                loaded.working = range::range_by_attribute(working, attribute, lower, upper);
            }
            RangeKey::TimeWindow => {
                let (start, end) = range::time_bounds(lower, upper)?;
                let working = mem::take(&mut loaded.working);
                let outcome = range::time_window(working, start, end);
                window_empty = outcome.lower_unmatched;
                loaded.working = outcome.records;
            }
        }
        let remaining = loaded.refresh_domains();

        let (key, lower, upper) = (key.to_string(), lower.to_string(), upper.to_string());
        self.metrics.increment_range_searches();
        if window_empty && self.config.trace_operations {
            log_event_with_fields(Event::TimeWindowEmpty, &[("lower", lower.as_str())]);
        }
        self.observe(
            Event::RangeApplied,
            remaining,
            &[
                ("key", key.as_str()),
                ("lower", lower.as_str()),
                ("upper", upper.as_str()),
            ],
        );
        Ok(())
    }

    /// Time-of-day containment window over start and end times
    pub fn time_window(&mut self, start: NaiveTime, end: NaiveTime) -> QueryResult<()> {
        self.range_search(&start.into(), &end.into(), RangeKey::TimeWindow)
    }

    /// Restores the working result to the pristine batch
    pub fn reset(&mut self) -> QueryResult<()> {
        let loaded = Self::loaded_mut(&mut self.batch)?;
        loaded.working = loaded.pristine.clone();
        loaded.domains = Self::recompute_domains(&loaded.working);
        loaded.filtered = false;
        let remaining = loaded.working.len();

        self.metrics.increment_resets();
        self.observe(Event::WorkingResultReset, remaining, &[]);
        Ok(())
    }

    /// Copy of the working result stably sorted by activity date.
    ///
    /// The working result itself keeps its order.
    pub fn export_sequence(&self) -> QueryResult<RecordSequence> {
        let loaded = self.loaded()?;
        let sequence = merge_sort(loaded.working.clone(), Attribute::ActivityDate);

        let (id, count) = (loaded.id.to_string(), sequence.len().to_string());
        self.metrics.increment_exports();
        log_event_with_fields(
            Event::ExportPrepared,
            &[("batch_id", id.as_str()), ("records", count.as_str())],
        );
        Ok(sequence)
    }

    /// Hands the chronological export sequence to `sink`
    pub fn export_to(&self, sink: &mut dyn ExportSink) -> QueryResult<()> {
        let sequence = self.export_sequence()?;
        sink.export(&sequence)
    }

    fn loaded(&self) -> QueryResult<&LoadedBatch> {
        self.batch.as_ref().ok_or_else(index_not_built)
    }

    fn loaded_mut(batch: &mut Option<LoadedBatch>) -> QueryResult<&mut LoadedBatch> {
        batch.as_mut().ok_or_else(index_not_built)
    }

    /// Per-operation bookkeeping: empty-result counter and gated TRACE line
    fn observe(&self, event: Event, remaining: usize, fields: &[(&str, &str)]) {
        if remaining == 0 {
            self.metrics.increment_empty_results();
        }
        if self.config.trace_operations {
            let remaining = remaining.to_string();
            let mut all: Vec<(&str, &str)> = fields.to_vec();
            all.push(("remaining", remaining.as_str()));
            log_event_with_fields(event, &all);
        }
    }
}

fn index_not_built() -> QueryError {
    log_event(Event::IndexNotBuilt);
    QueryError::index_not_built()
}

/// Records of `working` whose value also occurs in `candidate`, in
/// `working` order
fn intersect(working: &RecordSequence, candidate: Option<&RecordSequence>) -> RecordSequence {
    let Some(candidate) = candidate else {
        return RecordSequence::new();
    };

    let members: HashSet<&Record> = candidate.iter().map(|record| &**record).collect();
    working
        .iter()
        .filter(|record| {
            let record: &Record = record;
            members.contains(record)
        })
        .cloned()
        .collect()
}
