//! Per-pair output records.

use thiserror::Error;

use rte_network::TieInFailure;

/// Both optima for one routable pair, in the configured display units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteCosts {
    /// Length of the shortest-distance path.
    pub shortest_distance:     f64,
    /// Duration of the fastest-time path.
    pub fastest_time:          f64,
    /// Duration of the shortest-distance path.
    pub shortest_path_time:    f64,
    /// Length of the fastest-time path.
    pub fastest_path_distance: f64,
    /// Metres between the origin and its tie point.
    pub origin_offset_m:       f64,
    /// Metres between the destination and its tie point.
    pub destination_offset_m:  f64,
}

/// Why a pair has no costs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteFailure {
    #[error("origin tie-in failed: {0}")]
    OriginTieIn(TieInFailure),

    #[error("destination tie-in failed: {0}")]
    DestinationTieIn(TieInFailure),

    #[error("destination unreachable from origin")]
    Unreachable,

    #[error("routing error: {0}")]
    Routing(String),
}

impl RouteFailure {
    /// Stable machine-readable label, used as a CSV column value.
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteFailure::OriginTieIn(_)      => "origin_tie_in",
            RouteFailure::DestinationTieIn(_) => "destination_tie_in",
            RouteFailure::Unreachable         => "unreachable",
            RouteFailure::Routing(_)          => "routing_error",
        }
    }

    pub fn is_tie_in(&self) -> bool {
        matches!(self, RouteFailure::OriginTieIn(_) | RouteFailure::DestinationTieIn(_))
    }
}

/// Outcome of one (origin, destination) query.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    pub origin:      String,
    pub destination: String,
    pub outcome:     Result<RouteCosts, RouteFailure>,
}

impl RouteResult {
    pub fn routable(&self) -> bool {
        self.outcome.is_ok()
    }

    /// `None` when the pair is unroutable, never zero or negative.
    pub fn shortest_distance(&self) -> Option<f64> {
        self.outcome.as_ref().ok().map(|c| c.shortest_distance)
    }

    pub fn fastest_time(&self) -> Option<f64> {
        self.outcome.as_ref().ok().map(|c| c.fastest_time)
    }

    pub fn costs(&self) -> Option<&RouteCosts> {
        self.outcome.as_ref().ok()
    }

    pub fn failure(&self) -> Option<&RouteFailure> {
        self.outcome.as_ref().err()
    }
}
