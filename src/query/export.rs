//! Export collaborator interface
//!
//! The engine hands over a fully ordered sequence; formatting, grouping and
//! layout belong to the sink.

use std::io::Write;

use crate::record::{Record, RecordSequence};

use super::errors::{QueryError, QueryResult};

/// Receives the chronologically ordered export sequence
pub trait ExportSink {
    /// Consume `records` in the order given
    fn export(&mut self, records: &RecordSequence) -> QueryResult<()>;
}

/// Writes the export sequence as a pretty-printed JSON array
pub struct JsonExporter<W: Write> {
    writer: W,
}

impl<W: Write> JsonExporter<W> {
    /// Creates an exporter writing to `writer`
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ExportSink for JsonExporter<W> {
    fn export(&mut self, records: &RecordSequence) -> QueryResult<()> {
        let rows: Vec<&Record> = records.iter().map(|record| &**record).collect();

        serde_json::to_writer_pretty(&mut self.writer, &rows)
            .map_err(|e| QueryError::export_failed(format!("Failed to write export: {}", e)))?;
        self.writer
            .write_all(b"\n")
            .and_then(|_| self.writer.flush())
            .map_err(|e| QueryError::export_failed(format!("Failed to flush export: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{RecordFields, RecordRef};
    use chrono::{NaiveDate, NaiveTime};

    fn make_record(code: &str) -> RecordRef {
        Record::new(RecordFields {
            module: "Module".to_string(),
            module_code: code.to_string(),
            cohort: "FT_2023".to_string(),
            course: "BSc".to_string(),
            full_part: "FT".to_string(),
            session: "LEC".to_string(),
            activity_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            duration: "1:00".to_string(),
            location: "B101".to_string(),
            size: 30,
            lecturer: "Dr Smith".to_string(),
            zone: "A".to_string(),
        })
        .into_ref()
    }

    #[test]
    fn test_json_export_keeps_order() {
        let records: RecordSequence = vec![make_record("OS"), make_record("AI")]
            .into_iter()
            .collect();

        let mut exporter = JsonExporter::new(Vec::new());
        exporter.export(&records).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&exporter.into_inner()).unwrap();
        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["moduleCode"], "OS");
        assert_eq!(rows[1]["moduleCode"], "AI");
        assert_eq!(rows[0]["activityDate"], "2024-01-02");
        assert_eq!(rows[0]["scheduledDay"], 2);
    }

    #[test]
    fn test_json_export_empty() {
        let mut exporter = JsonExporter::new(Vec::new());
        exporter.export(&RecordSequence::new()).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&exporter.into_inner()).unwrap();
        assert_eq!(parsed, serde_json::json!([]));
    }
}
