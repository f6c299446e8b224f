//! Trackconv: converts GPS track data between interchange formats.
//!
//! Trackconv converts tracks between CSV, GPX, KML and TCX. Every format
//! pivots through an in-memory tabular representation (track, time,
//! latitude, longitude, elevation), so any input format converts to any
//! output format without per-pair conversion code.
//!
//! # Modules
//!
//! - [`track`]: the tabular pivot model and per-format readers/writers
//! - [`convert`]: format registry and the conversion driver
//! - [`error`]: error types for trackconv operations

pub mod convert;
pub mod error;
pub mod track;

use std::path::PathBuf;

use clap::Parser;

use convert::{Conversion, Format};
use track::FormatOptions;

pub use error::TrackconvError;

/// The trackconv CLI application.
#[derive(Parser)]
#[command(name = "trackconv")]
#[command(version, author, about = "Converts GPS track data between CSV, GPX, KML and TCX.")]
struct Cli {
    /// The input file to convert.
    #[arg(long, value_name = "FILE")]
    in_file: PathBuf,

    /// The input format (csv, gpx, kml, tcx, tcx-legacy).
    #[arg(long, value_name = "FORMAT")]
    in_format: String,

    /// Options for the input format, if supported. Blank-separated list of
    /// key=value pairs.
    #[arg(long, value_name = "OPTIONS", default_value = "")]
    in_options: String,

    /// The output file to generate.
    #[arg(long, value_name = "FILE")]
    out_file: PathBuf,

    /// The output format (csv, gpx, kml, tcx, tcx-legacy).
    #[arg(long, value_name = "FORMAT")]
    out_format: String,

    /// Options for the output format, if supported. Blank-separated list of
    /// key=value pairs.
    #[arg(long, value_name = "OPTIONS", default_value = "")]
    out_options: String,
}

/// Run the trackconv CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), TrackconvError> {
    let cli = Cli::parse();

    let request = Conversion {
        input: cli.in_file,
        input_format: Format::from_name(&cli.in_format)?,
        input_options: FormatOptions::parse(&cli.in_options),
        output: cli.out_file,
        output_format: Format::from_name(&cli.out_format)?,
        output_options: FormatOptions::parse(&cli.out_options),
    };

    convert::convert(&request)
}
