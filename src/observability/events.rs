//! Observable lifecycle events of the query engine
//!
//! Events are explicit and typed.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Batch lifecycle
    /// Batch load started
    BatchLoadBegin,
    /// Indexes built for a batch
    IndexBuilt,
    /// Batch loaded, engine unfiltered
    BatchLoaded,

    // Working result operations (TRACE)
    /// Filter intersected into the working result
    FilterApplied,
    /// Working result re-sorted
    SortApplied,
    /// Range search applied
    RangeApplied,
    /// Time window matched nothing at its lower bound
    TimeWindowEmpty,
    /// Working result restored to the pristine batch
    WorkingResultReset,

    // Export
    /// Chronological export sequence prepared
    ExportPrepared,

    // Rejections
    /// Caller bound rejected (lower above upper)
    InvalidBound,
    /// Query issued before any batch was loaded (FATAL)
    IndexNotBuilt,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BatchLoadBegin => "BATCH_LOAD_BEGIN",
            Event::IndexBuilt => "INDEX_BUILT",
            Event::BatchLoaded => "BATCH_LOADED",
            Event::FilterApplied => "FILTER_APPLIED",
            Event::SortApplied => "SORT_APPLIED",
            Event::RangeApplied => "RANGE_APPLIED",
            Event::TimeWindowEmpty => "TIME_WINDOW_EMPTY",
            Event::WorkingResultReset => "WORKING_RESULT_RESET",
            Event::ExportPrepared => "EXPORT_PREPARED",
            Event::InvalidBound => "INVALID_BOUND",
            Event::IndexNotBuilt => "INDEX_NOT_BUILT",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::IndexNotBuilt)
    }

    /// Returns true for per-operation events gated behind tracing
    pub fn is_trace(&self) -> bool {
        matches!(
            self,
            Event::FilterApplied
                | Event::SortApplied
                | Event::RangeApplied
                | Event::TimeWindowEmpty
                | Event::WorkingResultReset
        )
    }

    /// Severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::IndexNotBuilt => Severity::Fatal,
            Event::InvalidBound => Severity::Warn,
            e if e.is_trace() => Severity::Trace,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
