use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{debug, info};

use super::{LaunchRecord, LaunchTable};
use crate::LaunchDashError;

pub const DEFAULT_INPUT_FILE: &str = "spacex_launch_dash.csv";

/// Columns every launch records CSV must carry. Other columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    "Launch Site",
    "Payload Mass (kg)",
    "class",
    "Booster Version Category",
];

pub fn load_launch_csv(source_file: &Path) -> Result<LaunchTable, LaunchDashError> {
    let file = File::open(source_file).map_err(|e| LaunchDashError::InputFileError {
        path: format!("{:?}", source_file),
        source: e,
    })?;
    let table = read_launch_records(file)?;
    info!(
        "Loaded {:?}, found {} launches across {} sites",
        source_file,
        table.len(),
        table.sites().len()
    );
    Ok(table)
}

pub fn read_launch_records<R: Read>(source: R) -> Result<LaunchTable, LaunchDashError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| LaunchDashError::CsvReadError { source: e })?
        .clone();
    debug!("Launch records columns: {:?}", headers);
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LaunchDashError::MissingColumn {
                column: column.to_string(),
            });
        }
    }

    let mut rows = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| LaunchDashError::CsvReadError { source: e })?;
        // quoted fields may span lines, so take the line from the reader
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let record: LaunchRecord = row
            .deserialize(Some(&headers))
            .map_err(|e| LaunchDashError::InvalidRecord {
                line,
                reason: e.to_string(),
            })?;
        rows.push((line, record));
    }

    LaunchTable::from_lines(rows)
}
