use std::path::PathBuf;
use thiserror::Error;

/// The main error type for trackconv operations.
#[derive(Debug, Error)]
pub enum TrackconvError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input file does not exist: {0}")]
    MissingInput(PathBuf),

    #[error("Input file points to a directory: {0}")]
    InputIsDirectory(PathBuf),

    #[error("Unknown format: '{0}' (supported: csv, gpx, kml, tcx, tcx-legacy)")]
    UnknownFormat(String),

    #[error("Format '{format}' does not support {op}")]
    Unsupported {
        format: &'static str,
        op: &'static str,
    },

    #[error("Invalid options for format '{format}': {message}")]
    OptionParse {
        format: &'static str,
        message: String,
    },

    #[error("Failed to parse CSV from {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write CSV to {path}: {source}")]
    CsvWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid CSV in {path}: {message}")]
    CsvInvalid { path: PathBuf, message: String },

    #[error("Failed to parse XML from {path}: {message}")]
    XmlParse { path: PathBuf, message: String },

    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
