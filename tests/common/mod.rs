//! Shared record builders for integration tests

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};
use timetable::record::{Record, RecordFields};

pub fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

/// Baseline fields; tests override what they care about
pub fn fields() -> RecordFields {
    RecordFields {
        module: "Intro Programming".to_string(),
        module_code: "IP".to_string(),
        cohort: "FT_2023".to_string(),
        course: "BSc Computing".to_string(),
        full_part: "FT".to_string(),
        session: "LEC".to_string(),
        activity_date: date(1),
        start_time: time(9, 0),
        end_time: time(10, 0),
        duration: "1:00".to_string(),
        location: "B101".to_string(),
        size: 30,
        lecturer: "Dr Smith".to_string(),
        zone: "A".to_string(),
    }
}

pub fn with_code(code: &str, location: &str) -> Record {
    Record::new(RecordFields {
        module_code: code.to_string(),
        location: location.to_string(),
        ..fields()
    })
}

pub fn on_day(day: u32, location: &str) -> Record {
    Record::new(RecordFields {
        activity_date: date(day),
        location: location.to_string(),
        ..fields()
    })
}

pub fn taught_by(lecturer: &str, location: &str) -> Record {
    Record::new(RecordFields {
        lecturer: lecturer.to_string(),
        location: location.to_string(),
        ..fields()
    })
}

pub fn mode_zone(full_part: &str, zone: &str, location: &str) -> Record {
    Record::new(RecordFields {
        full_part: full_part.to_string(),
        zone: zone.to_string(),
        location: location.to_string(),
        ..fields()
    })
}

pub fn session(start: NaiveTime, end: NaiveTime, location: &str) -> Record {
    Record::new(RecordFields {
        start_time: start,
        end_time: end,
        location: location.to_string(),
        ..fields()
    })
}

/// A varied batch: several duplicates on every attribute
pub fn mixed_batch() -> Vec<Record> {
    let codes = ["IP", "DCNG", "OS", "IP", "DB", "OS", "IP", "DCNG"];
    let lecturers = ["Dr Smith", "Dr Jones", "Dr Smith", "Prof Lee"];
    let zones = ["A", "B", "A", "C"];
    let modes = ["FT", "PT"];

    (0..24u32)
        .map(|i| {
            Record::new(RecordFields {
                module_code: codes[i as usize % codes.len()].to_string(),
                lecturer: lecturers[i as usize % lecturers.len()].to_string(),
                zone: zones[(i as usize / 2) % zones.len()].to_string(),
                full_part: modes[(i as usize / 3) % modes.len()].to_string(),
                activity_date: date(1 + (i * 7) % 20),
                start_time: time(8 + i % 5, 0),
                end_time: time(9 + i % 5 + i % 2, 0),
                location: format!("R{}", i),
                size: i64::from(10 + i % 4),
                ..fields()
            })
        })
        .collect()
}

/// Location labels of a working result, in order
pub fn locations<'a>(records: impl IntoIterator<Item = &'a timetable::record::RecordRef>) -> Vec<String> {
    records
        .into_iter()
        .map(|record| record.location().to_string())
        .collect()
}
