//! Distance/time units and speed conversions.
//!
//! Graph weights are always metres and seconds.  Units only apply when a
//! result is presented to a caller, so no search ever mixes scales.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Unit used to report distances.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DistanceUnit {
    #[cfg_attr(feature = "serde", serde(rename = "m"))]
    Meters,
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "km"))]
    Kilometers,
    #[cfg_attr(feature = "serde", serde(rename = "mi"))]
    Miles,
}

impl DistanceUnit {
    /// Convert a distance in metres into this unit.
    #[inline]
    pub fn from_meters(self, meters: f64) -> f64 {
        match self {
            DistanceUnit::Meters     => meters,
            DistanceUnit::Kilometers => meters / 1_000.0,
            DistanceUnit::Miles      => meters / 1_609.344,
        }
    }

    /// Short label, used as a CSV column suffix.
    pub fn as_str(self) -> &'static str {
        match self {
            DistanceUnit::Meters     => "m",
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Miles      => "mi",
        }
    }
}

impl FromStr for DistanceUnit {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "meters" | "metres"         => Ok(DistanceUnit::Meters),
            "km" | "kilometers" | "kilometres" => Ok(DistanceUnit::Kilometers),
            "mi" | "miles"                    => Ok(DistanceUnit::Miles),
            other => Err(CoreError::Parse(format!(
                "unknown distance unit {other:?}: expected m, km, or mi"
            ))),
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit used to report travel times.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeUnit {
    #[cfg_attr(feature = "serde", serde(rename = "s"))]
    Seconds,
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "min"))]
    Minutes,
    #[cfg_attr(feature = "serde", serde(rename = "h"))]
    Hours,
}

impl TimeUnit {
    /// Convert a duration in seconds into this unit.
    #[inline]
    pub fn from_seconds(self, secs: f64) -> f64 {
        match self {
            TimeUnit::Seconds => secs,
            TimeUnit::Minutes => secs / 60.0,
            TimeUnit::Hours   => secs / 3_600.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Seconds => "s",
            TimeUnit::Minutes => "min",
            TimeUnit::Hours   => "h",
        }
    }
}

impl FromStr for TimeUnit {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "sec" | "seconds"   => Ok(TimeUnit::Seconds),
            "min" | "minutes"         => Ok(TimeUnit::Minutes),
            "h" | "hr" | "hours"      => Ok(TimeUnit::Hours),
            other => Err(CoreError::Parse(format!(
                "unknown time unit {other:?}: expected s, min, or h"
            ))),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Seconds needed to cover `length_m` metres at `speed_kmh`.
///
/// `speed_kmh` must be positive; callers resolve the effective speed first.
#[inline]
pub fn travel_secs(length_m: f64, speed_kmh: f64) -> f64 {
    length_m * 3.6 / speed_kmh
}

/// `true` if `speed_kmh` can be used as a divisor for travel time.
#[inline]
pub fn is_usable_speed(speed_kmh: f64) -> bool {
    speed_kmh.is_finite() && speed_kmh > 0.0
}
