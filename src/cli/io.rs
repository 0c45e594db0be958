//! JSON I/O handling for CLI
//!
//! - Input: one JSON array of operations via stdin (empty input = no operations)
//! - Output: single JSON object via stdout
//! - UTF-8 only

use std::io::{self, Read, Write};

use serde_json::Value;

use crate::query::{Operation, QueryError};

use super::errors::CliResult;

/// Read operations from `reader`.
///
/// Input that is not a valid operation list is a bad request
/// (TT_INVALID_REQUEST); only failing reads are I/O errors.
pub fn read_operations<R: Read>(mut reader: R) -> CliResult<Vec<Operation>> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;

    if input.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&input).map_err(|e| {
        QueryError::invalid_request(format!("Malformed operations: {}", e)).into()
    })
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });
    write_value(&response)
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });
    write_value(&response)
}

fn write_value(value: &Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}
