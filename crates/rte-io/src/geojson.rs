//! GeoJSON loaders for road lines and query points.
//!
//! Coordinates are `[lon, lat]` as in RFC 7946.  Both loaders accept a
//! `FeatureCollection` or a single `Feature`.
//!
//! # Roads
//!
//! Each `LineString` becomes one [`RoadSegment`] from its first to its last
//! position, with the polyline length as `length_m`.  Each part of a
//! `MultiLineString` becomes its own segment.
//!
//! | Property                   | Meaning                                      |
//! |----------------------------|----------------------------------------------|
//! | `speed_kmph` / `speed_kmh` | speed; absent, null or 0 → default speed     |
//! | `length_m`                 | overrides the geometric length; split across |
//! |                            | `MultiLineString` parts by geometric share   |
//! | `oneway`                   | bool, number, or `yes`/`no`/`-1` string      |
//!
//! Features with other geometry types are skipped with a warning.
//!
//! # Points
//!
//! The point id is the feature `id`, else the `id` property, else the
//! feature's index in the collection.

use std::io::Read;
use std::path::Path;

use geojson::{Feature, GeoJson, Value};
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use rte_core::{polyline_length_m, GeoPoint, Point, RoadSegment};

use crate::loader::{parse_oneway, OneWay};
use crate::{IoError, IoResult};

// ── Public API ────────────────────────────────────────────────────────────────

/// Load road segments from a GeoJSON file.
pub fn load_roads_geojson(path: &Path) -> IoResult<Vec<RoadSegment>> {
    let file = std::fs::File::open(path)?;
    load_roads_geojson_reader(file)
}

/// Like [`load_roads_geojson`] but accepts any `Read` source.
pub fn load_roads_geojson_reader<R: Read>(reader: R) -> IoResult<Vec<RoadSegment>> {
    let features = read_features(reader)?;
    let mut segments = Vec::with_capacity(features.len());

    for (i, feature) in features.iter().enumerate() {
        let parts: Vec<&Vec<Vec<f64>>> = match feature.geometry.as_ref().map(|g| &g.value) {
            Some(Value::LineString(line))       => vec![line],
            Some(Value::MultiLineString(lines)) => lines.iter().collect(),
            _ => {
                warn!(feature = i, "skipping road feature without line geometry");
                continue;
            }
        };

        let speed_kmh = number_property(feature, "speed_kmph")
            .or_else(|| number_property(feature, "speed_kmh"));
        let length_m = number_property(feature, "length_m");
        let oneway = match feature.property("oneway") {
            None | Some(JsonValue::Null) => OneWay::No,
            Some(JsonValue::Bool(b))     => if *b { OneWay::Forward } else { OneWay::No },
            Some(JsonValue::Number(n))   => parse_oneway(&n.to_string()).map_err(|m| feature_err(i, m))?,
            Some(JsonValue::String(s))   => parse_oneway(s).map_err(|m| feature_err(i, m))?,
            Some(other) => return Err(feature_err(i, format!("invalid oneway value {other}"))),
        };

        let mut polylines = Vec::with_capacity(parts.len());
        for part in parts {
            let line = positions(part).map_err(|m| feature_err(i, m))?;
            if line.len() < 2 {
                warn!(feature = i, "skipping line with fewer than two positions");
                continue;
            }
            polylines.push(line);
        }
        if polylines.is_empty() {
            warn!(feature = i, "skipping road feature with no usable line part");
            continue;
        }

        let geometric: Vec<f64> = polylines.iter().map(|l| polyline_length_m(l)).collect();
        let total: f64 = geometric.iter().sum();

        for (line, geo_len) in polylines.iter().zip(&geometric) {
            let (first, last) = (line[0], line[line.len() - 1]);
            let len = match length_m {
                Some(len) if total > 0.0 => len * geo_len / total,
                Some(len)                => len / polylines.len() as f64,
                None                     => *geo_len,
            };
            let (from, to) = if oneway == OneWay::Reverse { (last, first) } else { (first, last) };
            segments.push(RoadSegment {
                from,
                to,
                length_m: len,
                speed_kmh,
                oneway: oneway != OneWay::No,
            });
        }
    }

    debug!(segments = segments.len(), "segments loaded from GeoJSON");
    Ok(segments)
}

/// Load query points from a GeoJSON file of `Point` features.
pub fn load_points_geojson(path: &Path) -> IoResult<Vec<Point>> {
    let file = std::fs::File::open(path)?;
    load_points_geojson_reader(file)
}

/// Like [`load_points_geojson`] but accepts any `Read` source.
pub fn load_points_geojson_reader<R: Read>(reader: R) -> IoResult<Vec<Point>> {
    let features = read_features(reader)?;
    let mut points = Vec::with_capacity(features.len());

    for (i, feature) in features.iter().enumerate() {
        let Some(Value::Point(coords)) = feature.geometry.as_ref().map(|g| &g.value) else {
            warn!(feature = i, "skipping point feature without Point geometry");
            continue;
        };
        let pos = position(coords).map_err(|m| feature_err(i, m))?;
        points.push(Point::new(point_id(feature, i), pos));
    }

    debug!(points = points.len(), "points loaded from GeoJSON");
    Ok(points)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn read_features<R: Read>(mut reader: R) -> IoResult<Vec<Feature>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    match text.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(fc) => Ok(fc.features),
        GeoJson::Feature(f)            => Ok(vec![f]),
        GeoJson::Geometry(_) => Err(IoError::Parse(
            "expected a FeatureCollection or Feature, found a bare Geometry".to_owned(),
        )),
    }
}

fn feature_err(index: usize, msg: impl std::fmt::Display) -> IoError {
    IoError::Parse(format!("feature {index}: {msg}"))
}

fn position(coords: &[f64]) -> Result<GeoPoint, String> {
    let [lon, lat, ..] = coords else {
        return Err(format!("position needs at least two numbers, got {}", coords.len()));
    };
    let pos = GeoPoint::new(*lat, *lon);
    if !pos.is_valid() {
        return Err(format!("invalid coordinate {pos}"));
    }
    Ok(pos)
}

fn positions(line: &[Vec<f64>]) -> Result<Vec<GeoPoint>, String> {
    line.iter().map(|c| position(c)).collect()
}

/// Numeric property value; numeric strings are accepted, null is absent.
fn number_property(feature: &Feature, key: &str) -> Option<f64> {
    match feature.property(key)? {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn point_id(feature: &Feature, index: usize) -> String {
    if let Some(id) = &feature.id {
        return match id {
            geojson::feature::Id::String(s) => s.clone(),
            geojson::feature::Id::Number(n) => n.to_string(),
        };
    }
    match feature.property("id") {
        Some(JsonValue::String(s)) => s.clone(),
        Some(JsonValue::Number(n)) => n.to_string(),
        _ => index.to_string(),
    }
}
