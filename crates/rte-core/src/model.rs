//! Input records: query points and road segments.

use crate::geo::{polyline_length_m, GeoPoint};
use crate::units::{is_usable_speed, travel_secs};

// ── Point ─────────────────────────────────────────────────────────────────────

/// A response station or incident location.
///
/// `id` is opaque to the estimator and only echoed back in results.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub id:  String,
    pub pos: GeoPoint,
}

impl Point {
    pub fn new(id: impl Into<String>, pos: GeoPoint) -> Self {
        Self { id: id.into(), pos }
    }
}

// ── RoadSegment ───────────────────────────────────────────────────────────────

/// One road segment between two endpoints.
///
/// `length_m` is the physical length along the road, which may exceed the
/// straight-line distance between `from` and `to` when the source geometry is
/// a polyline.  Validation (non-negative, finite) happens in the graph
/// builder so a whole batch of records can be loaded before any is rejected.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoadSegment {
    pub from:      GeoPoint,
    pub to:        GeoPoint,
    pub length_m:  f64,
    /// Posted or average speed.  `None`, non-positive, non-finite and
    /// vanishingly small values fall back to the configured default speed.
    pub speed_kmh: Option<f64>,
    /// Traversable only from `from` to `to`.
    pub oneway:    bool,
}

impl RoadSegment {
    pub fn new(from: GeoPoint, to: GeoPoint, length_m: f64) -> Self {
        Self { from, to, length_m, speed_kmh: None, oneway: false }
    }

    /// Segment whose length is the great-circle distance between its
    /// endpoints.
    pub fn between(from: GeoPoint, to: GeoPoint) -> Self {
        Self::new(from, to, from.distance_m(to))
    }

    /// Segment spanning a whole polyline: endpoints are the first and last
    /// vertices, length is the sum of its parts.
    ///
    /// Returns `None` for fewer than two points.
    pub fn from_polyline(points: &[GeoPoint]) -> Option<Self> {
        let (first, last) = (points.first()?, points.last()?);
        if points.len() < 2 {
            return None;
        }
        Some(Self::new(*first, *last, polyline_length_m(points)))
    }

    pub fn with_speed(mut self, speed_kmh: f64) -> Self {
        self.speed_kmh = Some(speed_kmh);
        self
    }

    pub fn one_way(mut self) -> Self {
        self.oneway = true;
        self
    }

    /// The speed used for the time weight.
    ///
    /// A speed so close to zero that the traversal time overflows counts
    /// as missing.
    #[inline]
    pub fn effective_speed_kmh(&self, default_speed_kmh: f64) -> f64 {
        match self.speed_kmh {
            Some(s) if is_usable_speed(s) && travel_secs(self.length_m, s).is_finite() => s,
            _ => default_speed_kmh,
        }
    }

    /// Traversal time in seconds at the effective speed.
    #[inline]
    pub fn travel_secs(&self, default_speed_kmh: f64) -> f64 {
        travel_secs(self.length_m, self.effective_speed_kmh(default_speed_kmh))
    }
}
