//! Attribute names and typed attribute values
//!
//! Every record carries the same 15 attributes. Each attribute has exactly
//! one kind, and values of one attribute always share that kind, so the
//! derived ordering on values never has to compare across kinds.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::errors::{RecordError, RecordResult};

/// Number of attributes on a record
pub const ATTRIBUTE_COUNT: usize = 15;

/// Accepted date spellings, tried in order
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y"];

/// Accepted time-of-day spellings, tried in order
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// The 15 named attributes of a record, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Attribute {
    Module,
    ModuleCode,
    Cohort,
    Course,
    FullPart,
    Session,
    ActivityDate,
    ScheduledDay,
    StartTime,
    EndTime,
    Duration,
    Location,
    Size,
    Lecturer,
    Zone,
}

/// Semantic type of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// Free text, ordered lexicographically
    Text,
    /// Calendar date, ordered chronologically
    Date,
    /// Whole number, ordered numerically
    Integer,
    /// Wall-clock time of day, ordered chronologically
    Time,
}

impl AttributeKind {
    /// Lower-case name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            AttributeKind::Text => "text",
            AttributeKind::Date => "date",
            AttributeKind::Integer => "integer",
            AttributeKind::Time => "time",
        }
    }
}

impl Attribute {
    /// All attributes in canonical order
    pub const ALL: [Attribute; ATTRIBUTE_COUNT] = [
        Attribute::Module,
        Attribute::ModuleCode,
        Attribute::Cohort,
        Attribute::Course,
        Attribute::FullPart,
        Attribute::Session,
        Attribute::ActivityDate,
        Attribute::ScheduledDay,
        Attribute::StartTime,
        Attribute::EndTime,
        Attribute::Duration,
        Attribute::Location,
        Attribute::Size,
        Attribute::Lecturer,
        Attribute::Zone,
    ];

    /// Stable position in `ALL`, used to address per-attribute tables
    pub fn position(self) -> usize {
        self as usize
    }

    /// camelCase attribute name
    pub fn name(self) -> &'static str {
        match self {
            Attribute::Module => "module",
            Attribute::ModuleCode => "moduleCode",
            Attribute::Cohort => "cohort",
            Attribute::Course => "course",
            Attribute::FullPart => "fullPart",
            Attribute::Session => "session",
            Attribute::ActivityDate => "activityDate",
            Attribute::ScheduledDay => "scheduledDay",
            Attribute::StartTime => "startTime",
            Attribute::EndTime => "endTime",
            Attribute::Duration => "duration",
            Attribute::Location => "location",
            Attribute::Size => "size",
            Attribute::Lecturer => "lecturer",
            Attribute::Zone => "zone",
        }
    }

    /// Semantic type of this attribute's values
    pub fn kind(self) -> AttributeKind {
        match self {
            Attribute::ActivityDate => AttributeKind::Date,
            Attribute::ScheduledDay | Attribute::Size => AttributeKind::Integer,
            Attribute::StartTime | Attribute::EndTime => AttributeKind::Time,
            _ => AttributeKind::Text,
        }
    }

    /// Reads a human-entered string as a value of this attribute's kind.
    ///
    /// Text is taken verbatim. Dates accept `YYYY-MM-DD`, `DD-MM-YYYY` and
    /// `DD/MM/YYYY`; times accept `HH:MM:SS` and `HH:MM`.
    pub fn parse_value(self, raw: &str) -> RecordResult<AttributeValue> {
        let trimmed = raw.trim();
        let invalid = || RecordError::invalid_value(self.name(), raw, self.kind().name());

        match self.kind() {
            AttributeKind::Text => Ok(AttributeValue::Text(raw.to_string())),
            AttributeKind::Date => DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
                .map(AttributeValue::Date)
                .ok_or_else(invalid),
            AttributeKind::Time => TIME_FORMATS
                .iter()
                .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
                .map(AttributeValue::Time)
                .ok_or_else(invalid),
            AttributeKind::Integer => trimmed
                .parse::<i64>()
                .map(AttributeValue::Integer)
                .map_err(|_| invalid()),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Attribute {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Attribute::ALL
            .iter()
            .copied()
            .find(|attribute| attribute.name() == s)
            .ok_or_else(|| RecordError::unknown_attribute(s))
    }
}

/// An owned attribute value, as stored in index keys and domains
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Date(NaiveDate),
    Integer(i64),
    Time(NaiveTime),
}

impl AttributeValue {
    /// Kind of this value
    pub fn kind(&self) -> AttributeKind {
        self.as_ref().kind()
    }

    /// Borrowed view of this value
    pub fn as_ref(&self) -> AttributeRef<'_> {
        match self {
            AttributeValue::Text(s) => AttributeRef::Text(s),
            AttributeValue::Date(d) => AttributeRef::Date(*d),
            AttributeValue::Integer(i) => AttributeRef::Integer(*i),
            AttributeValue::Time(t) => AttributeRef::Time(*t),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_ref(), f)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<NaiveDate> for AttributeValue {
    fn from(value: NaiveDate) -> Self {
        AttributeValue::Date(value)
    }
}

impl From<NaiveTime> for AttributeValue {
    fn from(value: NaiveTime) -> Self {
        AttributeValue::Time(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

/// A borrowed attribute value read straight off a record.
///
/// Used on hot paths (sorting, index probes) to avoid cloning strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttributeRef<'a> {
    Text(&'a str),
    Date(NaiveDate),
    Integer(i64),
    Time(NaiveTime),
}

impl<'a> AttributeRef<'a> {
    /// Kind of this value
    pub fn kind(&self) -> AttributeKind {
        match self {
            AttributeRef::Text(_) => AttributeKind::Text,
            AttributeRef::Date(_) => AttributeKind::Date,
            AttributeRef::Integer(_) => AttributeKind::Integer,
            AttributeRef::Time(_) => AttributeKind::Time,
        }
    }

    /// Copies into an owned value
    pub fn to_value(&self) -> AttributeValue {
        match *self {
            AttributeRef::Text(s) => AttributeValue::Text(s.to_string()),
            AttributeRef::Date(d) => AttributeValue::Date(d),
            AttributeRef::Integer(i) => AttributeValue::Integer(i),
            AttributeRef::Time(t) => AttributeValue::Time(t),
        }
    }

    /// String form fed to the bucket hash.
    ///
    /// Dates render as `2024-01-02`, times as `09:00:00`.
    pub fn hash_text(&self) -> Cow<'a, str> {
        match *self {
            AttributeRef::Text(s) => Cow::Borrowed(s),
            other => Cow::Owned(other.to_string()),
        }
    }
}

impl fmt::Display for AttributeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeRef::Text(s) => f.write_str(s),
            AttributeRef::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            AttributeRef::Integer(i) => write!(f, "{}", i),
            AttributeRef::Time(t) => write!(f, "{}", t.format("%H:%M:%S")),
        }
    }
}
