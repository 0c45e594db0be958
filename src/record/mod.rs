//! Record subsystem
//!
//! Records are immutable once loaded and shared by reference between the
//! pristine backup, the attribute indexes and every working result.
//!
//! # Invariants
//!
//! - `scheduledDay` always equals the ISO weekday of `activityDate`
//! - Record equality is by attribute values
//! - A sequence's iteration order is its link order, not its arena order

mod attribute;
mod errors;
mod record;
mod sequence;

pub use attribute::{Attribute, AttributeKind, AttributeRef, AttributeValue, ATTRIBUTE_COUNT};
pub use errors::{RecordError, RecordErrorCode, RecordResult};
pub use record::{Record, RecordFields, RecordRef};
pub use sequence::{Iter, RecordSequence};

pub(crate) use sequence::Link;
