//! Estimator configuration.
//!
//! Typically loaded from a JSON file by the application crate (with the
//! `serde` feature enabled) and passed to the graph builder and estimator.
//! Every field has a default, so a config file only needs to name what it
//! changes.

use crate::units::{is_usable_speed, DistanceUnit, TimeUnit};
use crate::{CoreError, CoreResult};

// ── TieInMode ─────────────────────────────────────────────────────────────────

/// How a query point is attached to the road graph.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TieInMode {
    /// Use the nearest existing graph vertex.
    #[default]
    Vertex,
    /// Use the nearest point on the nearest edge, splitting that edge with a
    /// virtual vertex for the duration of the query.
    Edge,
}

impl TieInMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TieInMode::Vertex => "vertex",
            TieInMode::Edge   => "edge",
        }
    }
}

impl std::str::FromStr for TieInMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vertex" | "node" => Ok(TieInMode::Vertex),
            "edge"            => Ok(TieInMode::Edge),
            other => Err(CoreError::Parse(format!(
                "unknown tie-in mode {other:?}: expected \"vertex\" or \"edge\""
            ))),
        }
    }
}

// ── TieInConfig ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TieInConfig {
    pub mode: TieInMode,

    /// Maximum geodesic distance between a query point and its tie point.
    /// `None` accepts any distance.
    pub max_distance_m: Option<f64>,
}

impl TieInConfig {
    /// Points further than this from every road fail to tie in.
    pub const DEFAULT_MAX_DISTANCE_M: f64 = 5_000.0;
}

impl Default for TieInConfig {
    fn default() -> Self {
        Self {
            mode:           TieInMode::Vertex,
            max_distance_m: Some(Self::DEFAULT_MAX_DISTANCE_M),
        }
    }
}

// ── EstimatorConfig ───────────────────────────────────────────────────────────

/// Top-level estimator configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EstimatorConfig {
    /// Speed applied to segments without a usable speed attribute.
    pub default_speed_kmh: f64,

    /// Unit for reported distances.
    pub distance_unit: DistanceUnit,

    /// Unit for reported times.
    pub time_unit: TimeUnit,

    /// Segment endpoints closer than this are merged into one vertex.
    pub merge_tolerance_m: f64,

    pub tie_in: TieInConfig,
}

impl EstimatorConfig {
    pub const DEFAULT_SPEED_KMH: f64 = 50.0;
    pub const DEFAULT_MERGE_TOLERANCE_M: f64 = 0.5;

    /// Reject values the graph builder or router cannot work with.
    pub fn validate(&self) -> CoreResult<()> {
        if !is_usable_speed(self.default_speed_kmh) {
            return Err(CoreError::Config(format!(
                "default_speed_kmh must be positive and finite, got {}",
                self.default_speed_kmh
            )));
        }
        if !self.merge_tolerance_m.is_finite() || self.merge_tolerance_m < 0.0 {
            return Err(CoreError::Config(format!(
                "merge_tolerance_m must be non-negative, got {}",
                self.merge_tolerance_m
            )));
        }
        if let Some(max) = self.tie_in.max_distance_m {
            if max.is_nan() || max < 0.0 {
                return Err(CoreError::Config(format!(
                    "tie_in.max_distance_m must be non-negative, got {max}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            default_speed_kmh: Self::DEFAULT_SPEED_KMH,
            distance_unit:     DistanceUnit::default(),
            time_unit:         TimeUnit::default(),
            merge_tolerance_m: Self::DEFAULT_MERGE_TOLERANCE_M,
            tie_in:            TieInConfig::default(),
        }
    }
}
