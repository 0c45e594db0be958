//! Caller-facing request layer
//!
//! Operations arrive as human-entered strings (JSON). This layer parses them
//! against each attribute's kind and rejects reversed range bounds before the
//! engine sees them; the engine itself applies bounds literally.

use serde::{Deserialize, Serialize};

use crate::observability::{log_event_with_fields, Event};
use crate::record::{Attribute, AttributeValue};
use crate::sort::{SortDirection, SortSpec};

use super::engine::QueryEngine;
use super::errors::{QueryError, QueryResult};
use super::range::RangeKey;

/// One caller request against the working result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// Keep records whose `attribute` equals `value`
    Filter { attribute: String, value: String },
    /// Re-sort the working result
    Sort {
        attribute: String,
        #[serde(default)]
        direction: SortDirection,
    },
    /// Inclusive range on one ordered attribute
    Range {
        attribute: String,
        lower: String,
        upper: String,
    },
    /// Sessions starting at or after `start` and ending at or before `end`
    TimeWindow { start: String, end: String },
    /// Back to the full batch
    Reset,
}

impl Operation {
    /// Parses and applies this request
    pub fn apply(&self, engine: &mut QueryEngine) -> QueryResult<()> {
        match self {
            Operation::Filter { attribute, value } => {
                let attribute: Attribute = attribute.parse()?;
                let value = attribute.parse_value(value)?;
                engine.filter(attribute, &value)
            }
            Operation::Sort {
                attribute,
                direction,
            } => {
                let attribute: Attribute = attribute.parse()?;
                engine.sort(SortSpec {
                    attribute,
                    direction: *direction,
                })
            }
            Operation::Range {
                attribute,
                lower,
                upper,
            } => {
                let attribute: Attribute = attribute.parse()?;
                let lower = attribute.parse_value(lower)?;
                let upper = attribute.parse_value(upper)?;
                let key = RangeKey::Attribute(attribute);
                check_order(engine, key, &lower, &upper)?;
                engine.range_search(&lower, &upper, key)
            }
            Operation::TimeWindow { start, end } => {
                let lower = Attribute::StartTime.parse_value(start)?;
                let upper = Attribute::EndTime.parse_value(end)?;
                let key = RangeKey::TimeWindow;
                check_order(engine, key, &lower, &upper)?;
                engine.range_search(&lower, &upper, key)
            }
            Operation::Reset => engine.reset(),
        }
    }

    /// Applies requests in order, stopping at the first failure
    pub fn apply_all(operations: &[Operation], engine: &mut QueryEngine) -> QueryResult<()> {
        for operation in operations {
            operation.apply(engine)?;
        }
        Ok(())
    }
}

/// Rejects `lower > upper` with TT_INVALID_BOUND, logged at WARN
fn check_order(
    engine: &QueryEngine,
    key: RangeKey,
    lower: &AttributeValue,
    upper: &AttributeValue,
) -> QueryResult<()> {
    if lower <= upper {
        return Ok(());
    }

    let (target, lower, upper) = (key.to_string(), lower.to_string(), upper.to_string());
    engine.metrics().increment_rejected();
    log_event_with_fields(
        Event::InvalidBound,
        &[
            ("key", target.as_str()),
            ("lower", lower.as_str()),
            ("upper", upper.as_str()),
        ],
    );
    Err(QueryError::invalid_bound(&target, &lower, &upper))
}
