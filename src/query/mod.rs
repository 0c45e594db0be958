//! Query engine
//!
//! The session object that owns the working result for one loaded batch and
//! composes filters, sorts and range searches over it.
//!
//! # Lifecycle
//!
//! ```text
//! Empty --load--> Unfiltered --filter/sort/range--> Filtered
//!                     ^                                |
//!                     +-------------reset--------------+
//! ```
//!
//! Loading a new batch from any state discards everything and re-enters
//! `Unfiltered`.
//!
//! # Invariants
//!
//! 1. Filters intersect against the working result and keep its order
//! 2. Filters compose as AND; the final set is independent of their order
//! 3. Both range bounds are inclusive
//! 4. Lookups that match nothing produce an empty working result, not an error
//! 5. Every operation on an empty working result leaves it empty
//! 6. Querying before any load is a FATAL precondition violation
//!
//! # Usage
//!
//! ```ignore
//! use timetable::query::{QueryEngine, RecordBatch, RangeKey};
//!
//! let mut engine = QueryEngine::default();
//! engine.load(RecordBatch::new(records));
//! engine.filter(Attribute::ModuleCode, &"IP".into())?;
//! engine.range_search(&lower, &upper, RangeKey::Attribute(Attribute::ActivityDate))?;
//! let rows = engine.export_sequence()?;
//! ```

mod batch;
mod domains;
mod engine;
mod errors;
mod export;
mod range;
mod request;

pub use batch::RecordBatch;
pub use domains::Domains;
pub use engine::{EngineState, QueryEngine};
pub use errors::{QueryError, QueryErrorCode, QueryResult, Severity};
pub use export::{ExportSink, JsonExporter};
pub use range::RangeKey;
pub use request::Operation;
