//! KML format reader and writer.
//!
//! Reads `Placemark` coordinate lists; timestamps are synthesized from one
//! document-global counter since KML carries none. Writes one `Placemark`
//! per run of consecutive equal track values.
//!
//! Coordinate order is asymmetric on purpose: reading follows the KML
//! standard `lon,lat,alt` token order, while writing emits `lat,lon,elevation`
//! triples for compatibility with existing consumers of this tool's output.

use std::fs;
use std::path::Path;

use chrono::{Duration, NaiveDate, NaiveDateTime};

use super::model::{TrackData, TrackPoint};
use super::xml::{self, XmlElement};
use crate::error::TrackconvError;

const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

fn epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .expect("valid date")
        .and_hms_opt(0, 0, 0)
        .expect("valid time")
}

fn counter_timestamp(seconds: i64) -> String {
    (epoch() + Duration::seconds(seconds))
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string()
}

/// Reads a track dataset from a KML file.
pub fn read_kml(path: &Path) -> Result<TrackData, TrackconvError> {
    let xml = fs::read_to_string(path).map_err(TrackconvError::Io)?;
    parse_kml(&xml, path)
}

/// Reads a track dataset from a KML string.
///
/// Useful for testing without file I/O.
pub fn from_kml_str(xml_str: &str) -> Result<TrackData, TrackconvError> {
    parse_kml(xml_str, Path::new("<memory>"))
}

fn parse_kml(xml_str: &str, path: &Path) -> Result<TrackData, TrackconvError> {
    let document = xml::parse(xml_str, path)?;
    let mut data = TrackData::new();

    // One counter across the whole document, not reset per placemark.
    let mut tick: i64 = 0;

    for (placemark_index, placemark) in
        xml::elements_named(document.root_element(), "Placemark").enumerate()
    {
        let track = xml::optional_child_text(placemark, "name")
            .unwrap_or_else(|| placemark_index.to_string());

        for coordinates in xml::elements_named(placemark, "coordinates") {
            let text = coordinates.text().unwrap_or("");
            for token in text.split_whitespace() {
                // KML order is lon,lat,alt; tokens without exactly 3 parts
                // are skipped silently.
                let parts: Vec<&str> = token.split(',').collect();
                if parts.len() != 3 {
                    continue;
                }

                tick += 1;
                data.push(TrackPoint::new(
                    track.clone(),
                    counter_timestamp(tick),
                    parts[1],
                    parts[0],
                    parts[2],
                ));
            }
        }
    }

    Ok(data)
}

/// Writes a track dataset to a KML file, overwriting it.
pub fn write_kml(path: &Path, data: &TrackData) -> Result<(), TrackconvError> {
    build_kml(data).write_file(path)
}

/// Renders a track dataset as a KML document string.
///
/// Useful for testing without file I/O.
pub fn to_kml_string(data: &TrackData) -> String {
    build_kml(data).render()
}

fn build_kml(data: &TrackData) -> XmlElement {
    let mut document = XmlElement::new("Document");

    for run in data.track_runs() {
        let coords: Vec<String> = run
            .iter()
            .map(|p| format!("{},{},{}", p.latitude, p.longitude, p.elevation))
            .collect();

        document.push(
            XmlElement::new("Placemark")
                .child(XmlElement::new("name").text(run[0].track.clone()))
                .child(XmlElement::new("extrude").text("1"))
                .child(XmlElement::new("tessellate").text("1"))
                .child(XmlElement::new("altitudeMode").text("absolute"))
                .child(XmlElement::new("coordinates").text(coords.join(" "))),
        );
    }

    XmlElement::new("kml")
        .attr("xmlns", KML_NAMESPACE)
        .child(document)
}
