//! CSV loaders for road segments and query points.
//!
//! # Segments
//!
//! ```csv
//! from_lat,from_lon,to_lat,to_lon,length_m,speed_kmh,oneway
//! 8.4840,-13.2340,8.4790,-13.2270,950,40,
//! 8.4790,-13.2270,8.4700,-13.2200,,,yes
//! ```
//!
//! | Column      | Empty / absent means                                  |
//! |-------------|-------------------------------------------------------|
//! | `length_m`  | great-circle distance between the endpoints           |
//! | `speed_kmh` | configured default speed                              |
//! | `oneway`    | two-way; accepts `yes/no`, `true/false`, `1/0`, `-1`  |
//!
//! `oneway = -1` is the OSM convention for a road drawn against its
//! direction of travel; the endpoints are swapped.
//!
//! # Points
//!
//! ```csv
//! id,lat,lon
//! station-1,8.4840,-13.2340
//! ```

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use rte_core::{GeoPoint, Point, RoadSegment};

use crate::{IoError, IoResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct SegmentRecord {
    from_lat:  f64,
    from_lon:  f64,
    to_lat:    f64,
    to_lon:    f64,
    #[serde(default)]
    length_m:  Option<f64>,
    #[serde(default)]
    speed_kmh: Option<f64>,
    #[serde(default)]
    oneway:    Option<String>,
}

#[derive(Deserialize)]
struct PointRecord {
    id:  String,
    lat: f64,
    lon: f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load road segments from a CSV file.
pub fn load_segments_csv(path: &Path) -> IoResult<Vec<RoadSegment>> {
    let file = std::fs::File::open(path)?;
    load_segments_reader(file)
}

/// Like [`load_segments_csv`] but accepts any `Read` source.
pub fn load_segments_reader<R: Read>(reader: R) -> IoResult<Vec<RoadSegment>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut segments = Vec::new();

    for (i, result) in csv_reader.deserialize::<SegmentRecord>().enumerate() {
        let row = result?;
        let (mut from, mut to) = (
            GeoPoint::new(row.from_lat, row.from_lon),
            GeoPoint::new(row.to_lat, row.to_lon),
        );
        let oneway = match row.oneway.as_deref().map(parse_oneway).transpose() {
            Ok(o) => o.unwrap_or(OneWay::No),
            Err(msg) => return Err(IoError::Parse(format!("segment row {}: {msg}", i + 1))),
        };
        if oneway == OneWay::Reverse {
            std::mem::swap(&mut from, &mut to);
        }

        let mut seg = match row.length_m {
            Some(len) => RoadSegment::new(from, to, len),
            None      => RoadSegment::between(from, to),
        };
        seg.speed_kmh = row.speed_kmh;
        seg.oneway = oneway != OneWay::No;
        segments.push(seg);
    }

    debug!(segments = segments.len(), "segments loaded from CSV");
    Ok(segments)
}

/// Load query points (stations or incidents) from a CSV file.
pub fn load_points_csv(path: &Path) -> IoResult<Vec<Point>> {
    let file = std::fs::File::open(path)?;
    load_points_reader(file)
}

/// Like [`load_points_csv`] but accepts any `Read` source.
///
/// Rows with coordinates outside the WGS-84 range are rejected.
pub fn load_points_reader<R: Read>(reader: R) -> IoResult<Vec<Point>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut points = Vec::new();

    for result in csv_reader.deserialize::<PointRecord>() {
        let row = result?;
        let pos = GeoPoint::new(row.lat, row.lon);
        if !pos.is_valid() {
            return Err(IoError::Parse(format!("point {:?}: invalid coordinate {pos}", row.id)));
        }
        points.push(Point::new(row.id, pos));
    }

    debug!(points = points.len(), "points loaded from CSV");
    Ok(points)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum OneWay {
    No,
    Forward,
    Reverse,
}

pub(crate) fn parse_oneway(s: &str) -> Result<OneWay, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "" | "no" | "false" | "0"  => Ok(OneWay::No),
        "yes" | "true" | "1"       => Ok(OneWay::Forward),
        "-1" | "reverse"           => Ok(OneWay::Reverse),
        other => Err(format!(
            "invalid oneway value {other:?}: expected yes/no, true/false, 1/0, or -1"
        )),
    }
}
