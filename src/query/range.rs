//! Bounded range searches over ordered attributes
//!
//! Both bounds are inclusive and applied literally: a lower bound above the
//! upper bound yields an empty result rather than an error.

use std::fmt;

use chrono::NaiveTime;

use crate::record::{Attribute, AttributeKind, AttributeValue, RecordSequence};
use crate::sort::merge_sort;

use super::errors::{QueryError, QueryResult};

/// What a range search is keyed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeKey {
    /// A single ordered attribute
    Attribute(Attribute),
    /// Sessions fully contained in a time-of-day window
    /// (`startTime >= lower` and `endTime <= upper`)
    TimeWindow,
}

impl RangeKey {
    /// Kind both bounds must have
    pub fn bound_kind(&self) -> AttributeKind {
        match self {
            RangeKey::Attribute(attribute) => attribute.kind(),
            RangeKey::TimeWindow => AttributeKind::Time,
        }
    }

    /// Checks both bounds against the key's kind
    pub fn check_bounds(&self, lower: &AttributeValue, upper: &AttributeValue) -> QueryResult<()> {
        let expected = self.bound_kind();
        for bound in [lower, upper] {
            if bound.kind() != expected {
                return Err(QueryError::bound_type_mismatch(
                    &self.to_string(),
                    expected,
                    bound.kind(),
                ));
            }
        }
        Ok(())
    }
}

impl fmt::Display for RangeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeKey::Attribute(attribute) => write!(f, "{}", attribute),
            RangeKey::TimeWindow => write!(f, "timeWindow"),
        }
    }
}

/// Unpacks time-window bounds
pub(crate) fn time_bounds(
    lower: &AttributeValue,
    upper: &AttributeValue,
) -> QueryResult<(NaiveTime, NaiveTime)> {
    match (lower, upper) {
        (AttributeValue::Time(start), AttributeValue::Time(end)) => Ok((*start, *end)),
        (AttributeValue::Time(_), other) | (other, _) => Err(QueryError::bound_type_mismatch(
            &RangeKey::TimeWindow.to_string(),
            AttributeKind::Time,
            other.kind(),
        )),
    }
}

/// Outcome of a time-window search
#[derive(Debug)]
pub(crate) struct WindowOutcome {
    pub(crate) records: RecordSequence,
    /// No record started at or after the lower bound; phase two skipped
    pub(crate) lower_unmatched: bool,
}

/// Sorts ascending by `attribute`, then keeps `lower <= value <= upper`.
///
/// Bounds must already match the attribute's kind.
pub(crate) fn range_by_attribute(
    working: RecordSequence,
    attribute: Attribute,
    lower: &AttributeValue,
    upper: &AttributeValue,
) -> RecordSequence {
    let sorted = merge_sort(working, attribute);
    let (lower, upper) = (lower.as_ref(), upper.as_ref());

    sorted
        .iter()
        .skip_while(|record| record.get(attribute) < lower)
        .take_while(|record| record.get(attribute) <= upper)
        .cloned()
        .collect()
}

/// Two-phase containment search.
///
/// Phase one sorts by start time and drops records starting before `lower`.
/// Phase two re-sorts the survivors by end time and truncates at the first
/// record ending after `upper`.
pub(crate) fn time_window(working: RecordSequence, lower: NaiveTime, upper: NaiveTime) -> WindowOutcome {
    let by_start = merge_sort(working, Attribute::StartTime);
    let started: RecordSequence = by_start
        .iter()
        .skip_while(|record| record.start_time() < lower)
        .cloned()
        .collect();

    if started.is_empty() {
        return WindowOutcome {
            records: started,
            lower_unmatched: true,
        };
    }

    let by_end = merge_sort(started, Attribute::EndTime);
    let records = by_end
        .iter()
        .take_while(|record| record.end_time() <= upper)
        .cloned()
        .collect();

    WindowOutcome {
        records,
        lower_unmatched: false,
    }
}
