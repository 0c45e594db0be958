//! CLI command implementations
//!
//! Every command loads its records files into a fresh engine, so each
//! invocation is an independent session.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use crate::config::EngineConfig;
use crate::ingest::{JsonRecordSource, RecordSource};
use crate::query::{JsonExporter, Operation, QueryEngine, RecordBatch};
use crate::record::{Attribute, Record};

use super::args::Command;
use super::errors::CliResult;
use super::io::{read_operations, write_response};

/// Main entry point for CLI
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Query { records, config } => query(&records, config.as_deref()),
        Command::Domains { records, config } => domains(&records, config.as_deref()),
        Command::Export {
            records,
            out,
            config,
        } => export(&records, &out, config.as_deref()),
    }
}

/// Apply stdin operations and print the working result
pub fn query(records_paths: &[PathBuf], config_path: Option<&Path>) -> CliResult<()> {
    let mut engine = load_engine(records_paths, config_path)?;
    let operations = read_operations(io::stdin().lock())?;
    Operation::apply_all(&operations, &mut engine)?;

    write_response(query_summary(&engine)?)
}

/// Print per-attribute domains of the full batch
pub fn domains(records_paths: &[PathBuf], config_path: Option<&Path>) -> CliResult<()> {
    let engine = load_engine(records_paths, config_path)?;
    let domains = engine.domains()?;

    let selectable: Vec<&str> = Attribute::ALL
        .iter()
        .filter(|attribute| domains.is_selectable(**attribute))
        .map(|attribute| attribute.name())
        .collect();

    write_response(json!({
        "batch_id": engine.batch_id()?.to_string(),
        "domains": serde_json::to_value(domains)?,
        "selectable": selectable,
    }))
}

/// Apply stdin operations and write the chronological export to `out_path`
pub fn export(
    records_paths: &[PathBuf],
    out_path: &Path,
    config_path: Option<&Path>,
) -> CliResult<()> {
    let mut engine = load_engine(records_paths, config_path)?;
    let operations = read_operations(io::stdin().lock())?;
    Operation::apply_all(&operations, &mut engine)?;

    let file = File::create(out_path)?;
    let mut exporter = JsonExporter::new(BufWriter::new(file));
    engine.export_to(&mut exporter)?;

    write_response(json!({
        "out": out_path.display().to_string(),
        "count": engine.working()?.len(),
    }))
}

/// Reads config and every records file, then loads them into a new engine
/// as one batch, files concatenated in the order given
fn load_engine(records_paths: &[PathBuf], config_path: Option<&Path>) -> CliResult<QueryEngine> {
    let config = match config_path {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    let mut records = Vec::new();
    for path in records_paths {
        records.extend(JsonRecordSource::open(path)?.read_records()?);
    }

    let mut engine = QueryEngine::new(config);
    engine.load(RecordBatch::new(records));
    Ok(engine)
}

fn query_summary(engine: &QueryEngine) -> CliResult<Value> {
    let working = engine.working()?;
    let records: Vec<&Record> = working.iter().map(|record| &**record).collect();

    Ok(json!({
        "records": serde_json::to_value(records)?,
        "count": working.len(),
        "state": engine.state().as_str(),
        "metrics": serde_json::to_value(engine.metrics().snapshot())?,
    }))
}
