//! CSV format reader and writer.
//!
//! Headerless delimited text, one trackpoint per row, columns in the fixed
//! order track, time, latitude, longitude, elevation. Standard double-quote
//! quoting. This is the only format that interprets option strings: the
//! `delimiter` key swaps the column separator.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write as _};
use std::path::Path;

use super::model::{TrackData, TrackPoint, DEFAULT_ELEVATION};
use super::options::FormatOptions;
use crate::error::TrackconvError;

/// Resolved CSV configuration.
#[derive(Clone, Copy, Debug)]
pub struct CsvConfig {
    /// Column separator; a single ASCII byte.
    pub delimiter: u8,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvConfig {
    /// Validates and applies recognized option keys.
    ///
    /// Unrecognized keys and multi-character delimiters fail; the lenient
    /// token splitting has already happened in [`FormatOptions::parse`].
    pub fn from_options(options: &FormatOptions) -> Result<Self, TrackconvError> {
        let mut config = Self::default();
        for (key, value) in options.iter() {
            match key {
                "delimiter" => {
                    if value.len() != 1 || !value.is_ascii() {
                        return Err(TrackconvError::OptionParse {
                            format: "csv",
                            message: format!("delimiter must be a single character, got '{value}'"),
                        });
                    }
                    config.delimiter = value.as_bytes()[0];
                }
                other => {
                    return Err(TrackconvError::OptionParse {
                        format: "csv",
                        message: format!("unrecognized option '{other}'"),
                    });
                }
            }
        }
        Ok(config)
    }
}

/// Reads a track dataset from a CSV file.
///
/// Rows with only four fields default elevation to `"0"`; fewer than four
/// fields is a parse failure, extra trailing fields are ignored.
pub fn read_csv(path: &Path, config: &CsvConfig) -> Result<TrackData, TrackconvError> {
    let file = File::open(path).map_err(TrackconvError::Io)?;
    rows_to_data(
        csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(config.delimiter)
            .from_reader(BufReader::new(file)),
        path,
    )
}

/// Reads a track dataset from a CSV string.
///
/// Useful for testing without file I/O.
pub fn from_csv_str(csv_str: &str, config: &CsvConfig) -> Result<TrackData, TrackconvError> {
    rows_to_data(
        csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(config.delimiter)
            .from_reader(csv_str.as_bytes()),
        Path::new("<memory>"),
    )
}

fn rows_to_data<R: std::io::Read>(
    mut reader: csv::Reader<R>,
    path: &Path,
) -> Result<TrackData, TrackconvError> {
    let mut data = TrackData::new();

    for result in reader.records() {
        let record = result.map_err(|source| TrackconvError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;

        if record.len() < 4 {
            let line = record
                .position()
                .map(|p| p.line().to_string())
                .unwrap_or_else(|| "?".to_string());
            return Err(TrackconvError::CsvInvalid {
                path: path.to_path_buf(),
                message: format!(
                    "expected at least 4 fields, got {} (line {})",
                    record.len(),
                    line
                ),
            });
        }

        let elevation = record
            .get(4)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_ELEVATION);

        data.push(TrackPoint::new(
            &record[0], &record[1], &record[2], &record[3], elevation,
        ));
    }

    Ok(data)
}

/// Writes a track dataset to a CSV file, overwriting it.
pub fn write_csv(path: &Path, data: &TrackData, config: &CsvConfig) -> Result<(), TrackconvError> {
    let file = File::create(path).map_err(|source| TrackconvError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })?;

    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(config.delimiter)
        .from_writer(BufWriter::new(file));

    for point in &data.points {
        csv_writer
            .serialize(point)
            .map_err(|source| TrackconvError::CsvWrite {
                path: path.to_path_buf(),
                source,
            })?;
    }

    csv_writer
        .into_inner()
        .map_err(|e| TrackconvError::Io(e.into_error()))?
        .flush()
        .map_err(TrackconvError::Io)?;

    Ok(())
}

/// Writes a track dataset to a CSV string.
///
/// Useful for testing without file I/O.
pub fn to_csv_string(data: &TrackData, config: &CsvConfig) -> Result<String, TrackconvError> {
    let dummy_path = Path::new("<string>");

    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(config.delimiter)
        .from_writer(Vec::new());

    for point in &data.points {
        csv_writer
            .serialize(point)
            .map_err(|source| TrackconvError::CsvWrite {
                path: dummy_path.to_path_buf(),
                source,
            })?;
    }

    let bytes = csv_writer
        .into_inner()
        .map_err(|e| TrackconvError::Io(e.into_error()))?;

    String::from_utf8(bytes).map_err(|e| TrackconvError::CsvInvalid {
        path: dummy_path.to_path_buf(),
        message: format!("Invalid UTF-8 in output: {}", e),
    })
}
