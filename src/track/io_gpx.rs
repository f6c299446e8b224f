//! GPX format reader and writer.
//!
//! Reads `trkseg`/`trkpt` structures from GPX 1.1 documents; every segment
//! in document order becomes one track index. Writes one `trk` per run of
//! consecutive equal track values.

use std::fs;
use std::path::Path;

use chrono::{Duration, NaiveDate, NaiveDateTime};

use super::model::{TrackData, TrackPoint, DEFAULT_ELEVATION};
use super::xml::{self, XmlElement};
use crate::error::TrackconvError;

const GPX_NAMESPACE: &str = "http://www.topografix.com/GPX/1/1";
const GPX_SCHEMA_LOCATION: &str = "http://www.topografix.com/GPX/1/1 http://www.topografix.com/GPX/1/1/gpx.xsd http://www.garmin.com/xmlschemas/GpxExtensions/v3 http://www.garmin.com/xmlschemas/GpxExtensionsv3.xsd http://www.garmin.com/xmlschemas/TrackPointExtension/v1 http://www.garmin.com/xmlschemas/TrackPointExtensionv1.xsd";

fn epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .expect("valid date")
        .and_hms_opt(0, 0, 0)
        .expect("valid time")
}

/// Timestamp for a trackpoint without a `time` child: the fixed epoch plus
/// the point's index within its segment, in seconds.
fn dummy_timestamp(index: usize) -> String {
    (epoch() + Duration::seconds(index as i64))
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string()
}

/// Reads a track dataset from a GPX file.
pub fn read_gpx(path: &Path) -> Result<TrackData, TrackconvError> {
    let xml = fs::read_to_string(path).map_err(TrackconvError::Io)?;
    parse_gpx(&xml, path)
}

/// Reads a track dataset from a GPX string.
///
/// Useful for testing without file I/O.
pub fn from_gpx_str(xml_str: &str) -> Result<TrackData, TrackconvError> {
    parse_gpx(xml_str, Path::new("<memory>"))
}

fn parse_gpx(xml_str: &str, path: &Path) -> Result<TrackData, TrackconvError> {
    let document = xml::parse(xml_str, path)?;
    let mut data = TrackData::new();

    for (segment_index, segment) in
        xml::elements_named(document.root_element(), "trkseg").enumerate()
    {
        for (point_index, point) in xml::elements_named(segment, "trkpt").enumerate() {
            let time = xml::optional_child_text(point, "time")
                .unwrap_or_else(|| dummy_timestamp(point_index));
            let latitude = point.attribute("lat").unwrap_or("").trim().to_string();
            let longitude = point.attribute("lon").unwrap_or("").trim().to_string();
            let elevation = xml::optional_child_text(point, "ele")
                .unwrap_or_else(|| DEFAULT_ELEVATION.to_string());

            data.push(TrackPoint::new(
                segment_index.to_string(),
                time,
                latitude,
                longitude,
                elevation,
            ));
        }
    }

    Ok(data)
}

/// Writes a track dataset to a GPX file, overwriting it.
pub fn write_gpx(path: &Path, data: &TrackData) -> Result<(), TrackconvError> {
    build_gpx(data).write_file(path)
}

/// Renders a track dataset as a GPX document string.
///
/// Useful for testing without file I/O.
pub fn to_gpx_string(data: &TrackData) -> String {
    build_gpx(data).render()
}

fn build_gpx(data: &TrackData) -> XmlElement {
    let mut gpx = XmlElement::new("gpx")
        .attr("xmlns", GPX_NAMESPACE)
        .attr("xmlns:gpxx", "http://www.garmin.com/xmlschemas/GpxExtensions/v3")
        .attr(
            "xmlns:gpxtpx",
            "http://www.garmin.com/xmlschemas/TrackPointExtension/v1",
        )
        .attr("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance")
        .attr("xsi:schemaLocation", GPX_SCHEMA_LOCATION)
        .attr("creator", "trackconv");

    for run in data.track_runs() {
        let mut segment = XmlElement::new("trkseg");
        for point in run {
            segment.push(
                XmlElement::new("trkpt")
                    .attr("lat", point.latitude.clone())
                    .attr("lon", point.longitude.clone())
                    .child(XmlElement::new("ele").text(point.elevation.clone()))
                    .child(XmlElement::new("time").text(point.time.clone())),
            );
        }

        gpx.push(
            XmlElement::new("trk")
                .child(XmlElement::new("name").text(run[0].track.clone()))
                .child(segment),
        );
    }

    gpx
}
