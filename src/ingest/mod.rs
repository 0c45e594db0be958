//! Ingestion collaborator interface
//!
//! The engine consumes already-parsed records. This module defines the
//! `RecordSource` seam and ships a JSON adapter; delimited-text parsing is
//! left to other sources.

mod errors;
mod source;

pub use errors::{IngestError, IngestResult};
pub use source::{JsonRecordSource, RecordSource};
