//! TCX format reader and writer (Garmin Training Center database).
//!
//! Reading is strict: every `Trackpoint` must carry `Time`,
//! `LatitudeDegrees`, `LongitudeDegrees` and `AltitudeMeters`; nothing is
//! defaulted. Writing emits one `Activity` per run of consecutive equal
//! track values.

use std::fs;
use std::path::Path;

use super::model::{TrackData, TrackPoint};
use super::xml::{self, XmlElement};
use crate::error::TrackconvError;

const TCX_NAMESPACE: &str = "http://www.garmin.com/xmlschemas/TrainingCenterDatabase/v2";
const TCX_SCHEMA_LOCATION: &str = "http://www.garmin.com/xmlschemas/TrainingCenterDatabase/v2 http://www.garmin.com/xmlschemas/TrainingCenterDatabasev2.xsd";

/// Reads a track dataset from a TCX file.
pub fn read_tcx(path: &Path) -> Result<TrackData, TrackconvError> {
    let xml = fs::read_to_string(path).map_err(TrackconvError::Io)?;
    parse_tcx(&xml, path)
}

/// Reads a track dataset from a TCX string.
///
/// Useful for testing without file I/O.
pub fn from_tcx_str(xml_str: &str) -> Result<TrackData, TrackconvError> {
    parse_tcx(xml_str, Path::new("<memory>"))
}

fn parse_tcx(xml_str: &str, path: &Path) -> Result<TrackData, TrackconvError> {
    let document = xml::parse(xml_str, path)?;
    let mut data = TrackData::new();

    for (track_index, track) in xml::elements_named(document.root_element(), "Track").enumerate() {
        for point in xml::elements_named(track, "Trackpoint") {
            let time = xml::required_descendant_text(point, "Time", path, "<Trackpoint>")?;
            let latitude =
                xml::required_descendant_text(point, "LatitudeDegrees", path, "<Trackpoint>")?;
            let longitude =
                xml::required_descendant_text(point, "LongitudeDegrees", path, "<Trackpoint>")?;
            let elevation =
                xml::required_descendant_text(point, "AltitudeMeters", path, "<Trackpoint>")?;

            data.push(TrackPoint::new(
                track_index.to_string(),
                time,
                latitude,
                longitude,
                elevation,
            ));
        }
    }

    Ok(data)
}

/// Writes a track dataset to a TCX file, overwriting it.
pub fn write_tcx(path: &Path, data: &TrackData) -> Result<(), TrackconvError> {
    build_tcx(data).write_file(path)
}

/// Renders a track dataset as a TCX document string.
///
/// Useful for testing without file I/O.
pub fn to_tcx_string(data: &TrackData) -> String {
    build_tcx(data).render()
}

fn build_tcx(data: &TrackData) -> XmlElement {
    let mut activities = XmlElement::new("Activities");

    for run in data.track_runs() {
        let mut track = XmlElement::new("Track");
        for point in run {
            track.push(
                XmlElement::new("Trackpoint")
                    .child(XmlElement::new("Time").text(point.time.clone()))
                    .child(
                        XmlElement::new("Position")
                            .child(
                                XmlElement::new("LatitudeDegrees").text(point.latitude.clone()),
                            )
                            .child(
                                XmlElement::new("LongitudeDegrees").text(point.longitude.clone()),
                            ),
                    )
                    .child(XmlElement::new("AltitudeMeters").text(point.elevation.clone()))
                    .child(XmlElement::new("DistanceMeters").text("0.0")),
            );
        }

        activities.push(
            XmlElement::new("Activity")
                .attr("Sport", "Other")
                .child(XmlElement::new("Id").text(run[0].track.clone()))
                .child(
                    XmlElement::new("Lap")
                        .attr("StartTime", run[0].time.clone())
                        .child(XmlElement::new("TotalTimeSeconds").text("0"))
                        .child(XmlElement::new("DistanceMeters").text("0"))
                        .child(XmlElement::new("Calories").text("0"))
                        .child(track),
                ),
        );
    }

    XmlElement::new("TrainingCenterDatabase")
        .attr("xmlns", TCX_NAMESPACE)
        .attr("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance")
        .attr("xsi:schemaLocation", TCX_SCHEMA_LOCATION)
        .child(activities)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tcx() -> &'static str {
        r#"<?xml version="1.0" encoding="UTF-8"?>
<TrainingCenterDatabase xmlns="http://www.garmin.com/xmlschemas/TrainingCenterDatabase/v2">
  <Activities>
    <Activity Sport="Other">
      <Id>0</Id>
      <Lap StartTime="2020-01-01T00:00:00">
        <TotalTimeSeconds>0</TotalTimeSeconds>
        <DistanceMeters>0</DistanceMeters>
        <Calories>0</Calories>
        <Track>
          <Trackpoint>
            <Time>2020-01-01T00:00:00</Time>
            <Position>
              <LatitudeDegrees>10.0</LatitudeDegrees>
              <LongitudeDegrees>20.0</LongitudeDegrees>
            </Position>
            <AltitudeMeters>5</AltitudeMeters>
            <DistanceMeters>0.0</DistanceMeters>
          </Trackpoint>
          <Trackpoint>
            <Time>2020-01-01T00:00:01</Time>
            <Position>
              <LatitudeDegrees>10.1</LatitudeDegrees>
              <LongitudeDegrees>20.1</LongitudeDegrees>
            </Position>
            <AltitudeMeters>6</AltitudeMeters>
            <DistanceMeters>0.0</DistanceMeters>
          </Trackpoint>
        </Track>
      </Lap>
    </Activity>
  </Activities>
</TrainingCenterDatabase>"#
    }

    #[test]
    fn read_extracts_nested_position_fields() {
        let data = from_tcx_str(sample_tcx()).expect("parse failed");

        assert_eq!(data.len(), 2);
        assert_eq!(data.points[0].track, "0");
        assert_eq!(data.points[0].time, "2020-01-01T00:00:00");
        assert_eq!(data.points[0].latitude, "10.0");
        assert_eq!(data.points[0].longitude, "20.0");
        assert_eq!(data.points[1].elevation, "6");
    }

    #[test]
    fn missing_required_element_is_an_error() {
        let xml = r#"<TrainingCenterDatabase><Activities><Activity><Lap><Track>
            <Trackpoint>
              <Time>2020-01-01T00:00:00</Time>
              <AltitudeMeters>5</AltitudeMeters>
            </Trackpoint>
        </Track></Lap></Activity></Activities></TrainingCenterDatabase>"#;

        let err = from_tcx_str(xml).expect_err("should fail");
        assert!(err.to_string().contains("missing <LatitudeDegrees>"));
    }

    #[test]
    fn write_builds_one_activity_per_run() {
        let mut data = TrackData::new();
        data.push(TrackPoint::new("0", "2020-01-01T00:00:00", "10.0", "20.0", "5"));
        data.push(TrackPoint::new("0", "2020-01-01T00:00:01", "10.1", "20.1", "6"));
        data.push(TrackPoint::new("1", "2020-01-01T00:00:02", "11.0", "21.0", "7"));

        let rendered = to_tcx_string(&data);
        let doc = roxmltree::Document::parse(&rendered).expect("rendered tcx parses");
        let root = doc.root_element();

        let activities: Vec<_> = xml::elements_named(root, "Activity").collect();
        assert_eq!(activities.len(), 2);
        assert_eq!(activities[0].attribute("Sport"), Some("Other"));
        assert_eq!(xml::optional_child_text(activities[1], "Id").as_deref(), Some("1"));

        let laps: Vec<_> = xml::elements_named(activities[0], "Lap").collect();
        assert_eq!(laps.len(), 1);
        assert_eq!(laps[0].attribute("StartTime"), Some("2020-01-01T00:00:00"));
        assert_eq!(
            xml::optional_child_text(laps[0], "Calories").as_deref(),
            Some("0")
        );

        let points: Vec<_> = xml::elements_named(activities[0], "Trackpoint").collect();
        assert_eq!(points.len(), 2);
        assert_eq!(
            xml::optional_descendant_text(points[0], "LatitudeDegrees").as_deref(),
            Some("10.0")
        );
        assert_eq!(
            xml::optional_child_text(points[0], "DistanceMeters").as_deref(),
            Some("0.0")
        );
    }

    #[test]
    fn write_then_read_roundtrips_all_fields() {
        let mut data = TrackData::new();
        data.push(TrackPoint::new("0", "2020-01-01T00:00:00", "10.0", "20.0", "5"));
        data.push(TrackPoint::new("0", "2020-01-01T00:00:01", "10.1", "20.1", "6"));
        data.push(TrackPoint::new("1", "2020-01-01T00:00:02", "11.0", "21.0", "7"));

        let restored = from_tcx_str(&to_tcx_string(&data)).expect("reparse failed");
        assert_eq!(data, restored);
    }
}
