//! Tabular track model and per-format readers/writers.
//!
//! This module defines the canonical, format-agnostic representation of
//! GPS track data. It is the "hub" every conversion passes through: each
//! format reads into [`TrackData`] and writes from it, so N formats need
//! 2N converters instead of N×N.

pub mod io_csv;
pub mod io_gpx;
pub mod io_kml;
pub mod io_tcx;
mod model;
mod options;
pub(crate) mod xml;

// Re-export core types for convenient access
pub use model::{TrackData, TrackPoint, COLUMNS, DEFAULT_ELEVATION};
pub use options::FormatOptions;
