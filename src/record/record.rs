//! The immutable scheduled-session record

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use super::attribute::{Attribute, AttributeRef, AttributeValue};

/// Shared handle to a record.
///
/// Records have no single owner: the pristine backup, every index bucket and
/// every working result point at the same allocation.
pub type RecordRef = Arc<Record>;

/// Already-parsed field values handed over by the ingestion collaborator.
///
/// `scheduledDay` is absent on purpose: it is always derived from
/// `activityDate` when the record is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFields {
    pub module: String,
    pub module_code: String,
    pub cohort: String,
    pub course: String,
    pub full_part: String,
    pub session: String,
    pub activity_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration: String,
    pub location: String,
    pub size: i64,
    pub lecturer: String,
    pub zone: String,
}

/// One scheduled class session.
///
/// Equality and hashing are by attribute values. Two records with identical
/// attributes are indistinguishable and may both be present in a batch.
/// `startTime <= endTime` is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RecordFields")]
pub struct Record {
    module: String,
    module_code: String,
    cohort: String,
    course: String,
    full_part: String,
    session: String,
    activity_date: NaiveDate,
    scheduled_day: i64,
    start_time: NaiveTime,
    end_time: NaiveTime,
    duration: String,
    location: String,
    size: i64,
    lecturer: String,
    zone: String,
}

impl Record {
    /// Builds a record, deriving `scheduledDay` as the ISO weekday (1-7)
    /// of `activityDate`.
    pub fn new(fields: RecordFields) -> Self {
        let scheduled_day = i64::from(fields.activity_date.weekday().number_from_monday());
        Self {
            module: fields.module,
            module_code: fields.module_code,
            cohort: fields.cohort,
            course: fields.course,
            full_part: fields.full_part,
            session: fields.session,
            activity_date: fields.activity_date,
            scheduled_day,
            start_time: fields.start_time,
            end_time: fields.end_time,
            duration: fields.duration,
            location: fields.location,
            size: fields.size,
            lecturer: fields.lecturer,
            zone: fields.zone,
        }
    }

    /// Wraps the record in a shared handle
    pub fn into_ref(self) -> RecordRef {
        Arc::new(self)
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn module_code(&self) -> &str {
        &self.module_code
    }

    pub fn cohort(&self) -> &str {
        &self.cohort
    }

    pub fn course(&self) -> &str {
        &self.course
    }

    pub fn full_part(&self) -> &str {
        &self.full_part
    }

    pub fn session(&self) -> &str {
        &self.session
    }

    pub fn activity_date(&self) -> NaiveDate {
        self.activity_date
    }

    /// ISO weekday number, Monday = 1
    pub fn scheduled_day(&self) -> i64 {
        self.scheduled_day
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    pub fn duration(&self) -> &str {
        &self.duration
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    pub fn lecturer(&self) -> &str {
        &self.lecturer
    }

    pub fn zone(&self) -> &str {
        &self.zone
    }

    /// English name of the scheduled weekday, for display
    pub fn day_name(&self) -> &'static str {
        match self.activity_date.weekday() {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }

    /// Borrowed value of one attribute
    pub fn get(&self, attribute: Attribute) -> AttributeRef<'_> {
        match attribute {
            Attribute::Module => AttributeRef::Text(&self.module),
            Attribute::ModuleCode => AttributeRef::Text(&self.module_code),
            Attribute::Cohort => AttributeRef::Text(&self.cohort),
            Attribute::Course => AttributeRef::Text(&self.course),
            Attribute::FullPart => AttributeRef::Text(&self.full_part),
            Attribute::Session => AttributeRef::Text(&self.session),
            Attribute::ActivityDate => AttributeRef::Date(self.activity_date),
            Attribute::ScheduledDay => AttributeRef::Integer(self.scheduled_day),
            Attribute::StartTime => AttributeRef::Time(self.start_time),
            Attribute::EndTime => AttributeRef::Time(self.end_time),
            Attribute::Duration => AttributeRef::Text(&self.duration),
            Attribute::Location => AttributeRef::Text(&self.location),
            Attribute::Size => AttributeRef::Integer(self.size),
            Attribute::Lecturer => AttributeRef::Text(&self.lecturer),
            Attribute::Zone => AttributeRef::Text(&self.zone),
        }
    }

    /// Owned value of one attribute
    pub fn value(&self, attribute: Attribute) -> AttributeValue {
        self.get(attribute).to_value()
    }

    /// Natural ordering of two records on a single attribute
    pub fn compare_by(&self, other: &Record, attribute: Attribute) -> Ordering {
        self.get(attribute).cmp(&other.get(attribute))
    }
}

impl From<RecordFields> for Record {
    fn from(fields: RecordFields) -> Self {
        Record::new(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(code: &str, date: NaiveDate) -> RecordFields {
        RecordFields {
            module: "Internet Programming".to_string(),
            module_code: code.to_string(),
            cohort: "FT_2023".to_string(),
            course: "BSc".to_string(),
            full_part: "FT".to_string(),
            session: "LEC".to_string(),
            activity_date: date,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            duration: "2:00".to_string(),
            location: "B101".to_string(),
            size: 40,
            lecturer: "Dr Smith".to_string(),
            zone: "A".to_string(),
        }
    }

    #[test]
    fn test_scheduled_day_derived_from_date() {
        // 2024-01-01 is a Monday
        let monday = Record::new(fields("IP", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
        assert_eq!(monday.scheduled_day(), 1);
        assert_eq!(monday.day_name(), "Monday");

        let sunday = Record::new(fields("IP", NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()));
        assert_eq!(sunday.scheduled_day(), 7);
        assert_eq!(sunday.day_name(), "Sunday");
    }

    #[test]
    fn test_get_returns_typed_values() {
        let record = Record::new(fields("DCNG", NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()));
        assert_eq!(record.get(Attribute::ModuleCode), AttributeRef::Text("DCNG"));
        assert_eq!(record.get(Attribute::Size), AttributeRef::Integer(40));
        assert_eq!(record.get(Attribute::ScheduledDay), AttributeRef::Integer(3));
        assert_eq!(
            record.value(Attribute::StartTime),
            AttributeValue::Time(NaiveTime::from_hms_opt(9, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_identical_records_are_equal() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        assert_eq!(Record::new(fields("IP", date)), Record::new(fields("IP", date)));
        assert_ne!(Record::new(fields("IP", date)), Record::new(fields("OS", date)));
    }

    #[test]
    fn test_compare_by() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let a = Record::new(fields("AI", date));
        let b = Record::new(fields("BD", date));
        assert_eq!(a.compare_by(&b, Attribute::ModuleCode), Ordering::Less);
        assert_eq!(a.compare_by(&b, Attribute::Lecturer), Ordering::Equal);
    }

    #[test]
    fn test_deserialize_recomputes_scheduled_day() {
        let json = r#"{
            "module": "Networks", "moduleCode": "DCNG", "cohort": "FT_2023",
            "course": "BSc", "fullPart": "FT", "session": "LAB",
            "activityDate": "2024-01-05", "scheduledDay": 1,
            "startTime": "13:00:00", "endTime": "15:00:00", "duration": "2:00",
            "location": "C2", "size": 24, "lecturer": "Dr Lee", "zone": "B"
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.scheduled_day(), 5);
        assert_eq!(record.module_code(), "DCNG");

        let out = serde_json::to_value(&record).unwrap();
        assert_eq!(out["scheduledDay"], 5);
        assert_eq!(out["activityDate"], "2024-01-05");
    }
}
