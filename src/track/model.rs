//! Core tabular model for the trackconv pivot representation.
//!
//! This module defines the canonical format-agnostic representation of
//! GPS track data. All format-specific readers convert to this model,
//! and all writers convert from it.

use serde::{Deserialize, Serialize};

/// Column names of the tabular model, in canonical order.
pub const COLUMNS: [&str; 5] = ["track", "time", "latitude", "longitude", "elevation"];

/// Elevation value used when a source format carries no elevation.
pub const DEFAULT_ELEVATION: &str = "0";

/// One GPS trackpoint in the tabular pivot model.
///
/// All fields are strings at the model boundary; each format parses and
/// formats them by its own rules. Malformed numeric strings pass through
/// and only fail downstream if a target format cannot serialize them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackPoint {
    /// Group/segment identifier (string form of an integer or a name).
    pub track: String,

    /// ISO-8601-like timestamp; precision is format-specific.
    pub time: String,

    /// Latitude in decimal degrees.
    pub latitude: String,

    /// Longitude in decimal degrees.
    pub longitude: String,

    /// Elevation in decimal meters; `"0"` when the source had none.
    pub elevation: String,
}

impl TrackPoint {
    /// Creates a new trackpoint from the five column values.
    pub fn new(
        track: impl Into<String>,
        time: impl Into<String>,
        latitude: impl Into<String>,
        longitude: impl Into<String>,
        elevation: impl Into<String>,
    ) -> Self {
        Self {
            track: track.into(),
            time: time.into(),
            latitude: latitude.into(),
            longitude: longitude.into(),
            elevation: elevation.into(),
        }
    }

    /// Looks up a field by column name.
    ///
    /// Returns `None` for names outside [`COLUMNS`].
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "track" => Some(&self.track),
            "time" => Some(&self.time),
            "latitude" => Some(&self.latitude),
            "longitude" => Some(&self.longitude),
            "elevation" => Some(&self.elevation),
            _ => None,
        }
    }
}

/// An ordered sequence of trackpoints.
///
/// Record order is significant: it defines the trajectory. Grouping into
/// tracks is implicit; consecutive points sharing the same `track` value
/// belong to one logical track, and a change in value starts a new one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackData {
    /// All trackpoints, in source order.
    pub points: Vec<TrackPoint>,
}

impl TrackData {
    /// Creates an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of trackpoints.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the dataset holds no trackpoints.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Appends a trackpoint.
    pub fn push(&mut self, point: TrackPoint) {
        self.points.push(point);
    }

    /// Iterates over maximal runs of consecutive points sharing one `track`
    /// value.
    ///
    /// Every grouping writer (GPX, KML, TCX) emits one track element per run.
    pub fn track_runs(&self) -> impl Iterator<Item = &[TrackPoint]> {
        self.points.chunk_by(|a, b| a.track == b.track)
    }
}

impl FromIterator<TrackPoint> for TrackData {
    fn from_iter<I: IntoIterator<Item = TrackPoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}
