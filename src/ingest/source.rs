//! Record sources

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::query::RecordBatch;
use crate::record::Record;

use super::errors::{IngestError, IngestResult};

/// Produces already-parsed records in ingestion order
pub trait RecordSource {
    /// Reads every record the source holds
    fn read_records(&mut self) -> IngestResult<Vec<Record>>;

    /// Reads a batch, counting distinct values for index size hints
    fn read_batch(&mut self) -> IngestResult<RecordBatch> {
        Ok(RecordBatch::new(self.read_records()?))
    }
}

/// Reads a JSON array of camelCase records.
///
/// Any `scheduledDay` in the input is ignored and recomputed.
pub struct JsonRecordSource<R: Read> {
    reader: R,
    origin: String,
}

impl<R: Read> JsonRecordSource<R> {
    /// Wraps any reader; `origin` names it in error messages
    pub fn new(reader: R, origin: impl Into<String>) -> Self {
        Self {
            reader,
            origin: origin.into(),
        }
    }
}

impl JsonRecordSource<BufReader<File>> {
    /// Opens a JSON records file
    pub fn open(path: &Path) -> IngestResult<Self> {
        let file = File::open(path).map_err(|source| IngestError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file), path.display().to_string()))
    }
}

impl<R: Read> RecordSource for JsonRecordSource<R> {
    fn read_records(&mut self) -> IngestResult<Vec<Record>> {
        serde_json::from_reader(&mut self.reader).map_err(|source| IngestError::Malformed {
            origin: self.origin.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Attribute;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const RECORDS: &str = r#"[
        {
            "module": "Internet Programming", "moduleCode": "IP", "cohort": "FT_2023",
            "course": "BSc Computing", "fullPart": "FT", "session": "LEC",
            "activityDate": "2024-01-03", "startTime": "09:00:00", "endTime": "11:00:00",
            "duration": "2:00", "location": "B101", "size": 40,
            "lecturer": "Dr Smith", "zone": "A"
        },
        {
            "module": "Networks", "moduleCode": "DCNG", "cohort": "PT_2023",
            "course": "BSc Computing", "fullPart": "PT", "session": "LAB",
            "activityDate": "2024-01-05", "scheduledDay": 1, "startTime": "13:00:00",
            "endTime": "15:00:00", "duration": "2:00", "location": "C204", "size": 20,
            "lecturer": "Dr Jones", "zone": "B"
        }
    ]"#;

    #[test]
    fn test_read_records_from_reader() {
        let mut source = JsonRecordSource::new(RECORDS.as_bytes(), "inline");
        let records = source.read_records().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].module_code(), "IP");
        // Wednesday
        assert_eq!(records[0].scheduled_day(), 3);
        // Incoming scheduledDay is ignored; 2024-01-05 is a Friday
        assert_eq!(records[1].scheduled_day(), 5);
    }

    #[test]
    fn test_read_batch() {
        let batch = JsonRecordSource::new(RECORDS.as_bytes(), "inline")
            .read_batch()
            .unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.hints().get(Attribute::Zone), 2);
        assert_eq!(batch.hints().get(Attribute::Course), 1);
    }

    #[test]
    fn test_open_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(RECORDS.as_bytes()).unwrap();

        let records = JsonRecordSource::open(file.path())
            .unwrap()
            .read_records()
            .unwrap();
        assert_eq!(records[1].lecturer(), "Dr Jones");
    }

    #[test]
    fn test_missing_file() {
        let err = JsonRecordSource::open(Path::new("/nonexistent/records.json"))
            .err()
            .unwrap();
        assert_eq!(err.code(), "TT_INGEST_OPEN_FAILED");
    }

    #[test]
    fn test_malformed_date() {
        let input = RECORDS.replace("2024-01-03", "3rd January");
        let err = JsonRecordSource::new(input.as_bytes(), "inline")
            .read_records()
            .unwrap_err();
        assert_eq!(err.code(), "TT_INGEST_MALFORMED");
        assert!(err.to_string().contains("inline"));
    }
}
