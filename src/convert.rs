//! Format registry and the conversion driver.
//!
//! [`Format`] is the closed set of format implementations with their
//! capability flags; [`convert`] runs one read-then-write conversion as a
//! sequence of fail-fast checkpoints. Nothing is retried: the first failing
//! checkpoint aborts the whole conversion.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::TrackconvError;
use crate::track::io_csv::{self, CsvConfig};
use crate::track::{io_gpx, io_kml, io_tcx, FormatOptions, TrackData};

/// A registered format implementation.
///
/// A closed set: formats are selected by name through [`Format::from_name`]
/// and carry static capability flags instead of open-ended subclassing.
/// `TcxLegacy` is the older TCX implementation kept for reading archives;
/// it predates write support.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Csv,
    Gpx,
    Kml,
    Tcx,
    TcxLegacy,
}

impl Format {
    /// All registered formats, in the order shown to users.
    pub const ALL: [Format; 5] = [
        Format::Csv,
        Format::Gpx,
        Format::Kml,
        Format::Tcx,
        Format::TcxLegacy,
    ];

    /// Registry lookup by name (case-insensitive).
    pub fn from_name(name: &str) -> Result<Self, TrackconvError> {
        match name.to_ascii_lowercase().as_str() {
            "csv" => Ok(Format::Csv),
            "gpx" => Ok(Format::Gpx),
            "kml" => Ok(Format::Kml),
            "tcx" => Ok(Format::Tcx),
            "tcx-legacy" => Ok(Format::TcxLegacy),
            other => Err(TrackconvError::UnknownFormat(other.to_string())),
        }
    }

    /// Registered name of the format.
    pub fn name(self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Gpx => "gpx",
            Format::Kml => "kml",
            Format::Tcx => "tcx",
            Format::TcxLegacy => "tcx-legacy",
        }
    }

    /// Whether this format supports reading.
    pub fn can_read(self) -> bool {
        match self {
            Format::Csv | Format::Gpx | Format::Kml | Format::Tcx | Format::TcxLegacy => true,
        }
    }

    /// Whether this format supports writing.
    pub fn can_write(self) -> bool {
        match self {
            Format::Csv | Format::Gpx | Format::Kml | Format::Tcx => true,
            Format::TcxLegacy => false,
        }
    }

    /// Validates an option string against this format's own grammar.
    ///
    /// Only CSV interprets options; the other formats ignore option input.
    pub fn validate_options(self, options: &FormatOptions) -> Result<(), TrackconvError> {
        match self {
            Format::Csv => CsvConfig::from_options(options).map(|_| ()),
            _ => Ok(()),
        }
    }

    /// Parses the file at `path` into the tabular model.
    pub fn read(self, path: &Path, options: &FormatOptions) -> Result<TrackData, TrackconvError> {
        if !self.can_read() {
            return Err(TrackconvError::Unsupported {
                format: self.name(),
                op: "reading",
            });
        }

        match self {
            Format::Csv => io_csv::read_csv(path, &CsvConfig::from_options(options)?),
            Format::Gpx => io_gpx::read_gpx(path),
            Format::Kml => io_kml::read_kml(path),
            Format::Tcx | Format::TcxLegacy => io_tcx::read_tcx(path),
        }
    }

    /// Serializes `data` to `path`, overwriting it.
    pub fn write(
        self,
        data: &TrackData,
        path: &Path,
        options: &FormatOptions,
    ) -> Result<(), TrackconvError> {
        if !self.can_write() {
            return Err(TrackconvError::Unsupported {
                format: self.name(),
                op: "writing",
            });
        }

        match self {
            Format::Csv => io_csv::write_csv(path, data, &CsvConfig::from_options(options)?),
            Format::Gpx => io_gpx::write_gpx(path, data),
            Format::Kml => io_kml::write_kml(path, data),
            Format::Tcx => io_tcx::write_tcx(path, data),
            Format::TcxLegacy => unreachable!("rejected by can_write"),
        }
    }
}

/// One conversion request: where to read, where to write, with what.
#[derive(Clone, Debug)]
pub struct Conversion {
    pub input: PathBuf,
    pub input_format: Format,
    pub input_options: FormatOptions,
    pub output: PathBuf,
    pub output_format: Format,
    pub output_options: FormatOptions,
}

/// Runs one conversion.
///
/// Checkpoints, each failing fast: input file checks, capability checks,
/// option validation, read, write. Fresh state per call; nothing is cached
/// across conversions.
pub fn convert(request: &Conversion) -> Result<(), TrackconvError> {
    if !request.input.exists() {
        return Err(TrackconvError::MissingInput(request.input.clone()));
    }
    if request.input.is_dir() {
        return Err(TrackconvError::InputIsDirectory(request.input.clone()));
    }

    info!(format = request.input_format.name(), "input format");
    info!(format = request.output_format.name(), "output format");

    if !request.input_format.can_read() {
        return Err(TrackconvError::Unsupported {
            format: request.input_format.name(),
            op: "reading",
        });
    }
    if !request.output_format.can_write() {
        return Err(TrackconvError::Unsupported {
            format: request.output_format.name(),
            op: "writing",
        });
    }

    request
        .input_format
        .validate_options(&request.input_options)?;
    request
        .output_format
        .validate_options(&request.output_options)?;

    let data = request
        .input_format
        .read(&request.input, &request.input_options)?;
    info!(points = data.len(), "read input");

    request
        .output_format
        .write(&data, &request.output, &request.output_options)?;
    info!(output = %request.output.display(), "successfully converted");

    Ok(())
}
