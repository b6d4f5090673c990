// Error types for launchdash

use snafu::Snafu;
use std::io;

#[derive(Debug, Snafu)]
pub enum LaunchDashError {
    // Errors while loading the launch records
    #[snafu(display("Unable to open launch records file: {path}"))]
    InputFileError { path: String, source: io::Error },
    #[snafu(display("Error reading launch records CSV"))]
    CsvReadError { source: csv::Error },
    #[snafu(display("Launch records CSV is missing required column '{column}'"))]
    MissingColumn { column: String },
    #[snafu(display("Invalid launch record on line {line}: {reason}"))]
    InvalidRecord { line: u64, reason: String },

    // Config management errors
    #[snafu(display("Could not find application data directory to save config file"))]
    NoConfigDir,
    #[snafu(display("Error reading or writing config file"))]
    ConfigIOError { source: io::Error },
    #[snafu(display("Error serializing config file"))]
    ConfigSerializeError { source: serde_json::Error },

    // Report output errors
    #[snafu(display("Error writing dashboard report"))]
    ReportWriteError { source: serde_json::Error },

    // UI errors
    #[snafu(display("Dashboard window error: {description}"))]
    GuiError { description: String },
}
