//! Flat result rows shared by every output backend.

use rte_core::{DistanceUnit, EstimatorConfig, TimeUnit};
use rte_estimate::RouteResult;

/// Display units of the numeric columns; they name the column headers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Units {
    pub distance: DistanceUnit,
    pub time:     TimeUnit,
}

impl Units {
    pub fn new(distance: DistanceUnit, time: TimeUnit) -> Self {
        Self { distance, time }
    }

    pub fn from_config(config: &EstimatorConfig) -> Self {
        Self::new(config.distance_unit, config.time_unit)
    }

    /// Column names, e.g. `shortest_distance_km`, `fastest_time_min`.
    pub fn headers(self) -> [String; 8] {
        let (d, t) = (self.distance.as_str(), self.time.as_str());
        [
            "origin_id".to_owned(),
            "destination_id".to_owned(),
            "routable".to_owned(),
            format!("shortest_distance_{d}"),
            format!("fastest_time_{t}"),
            format!("shortest_path_time_{t}"),
            format!("fastest_path_distance_{d}"),
            "failure".to_owned(),
        ]
    }
}

/// One output record.  Numeric columns are `None` for unroutable pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub origin_id:             String,
    pub destination_id:        String,
    pub routable:              bool,
    pub shortest_distance:     Option<f64>,
    pub fastest_time:          Option<f64>,
    pub shortest_path_time:    Option<f64>,
    pub fastest_path_distance: Option<f64>,
    /// Machine-readable failure label, `None` when routable.
    pub failure:               Option<&'static str>,
}

impl From<&RouteResult> for ResultRow {
    fn from(r: &RouteResult) -> Self {
        let costs = r.costs();
        Self {
            origin_id:             r.origin.clone(),
            destination_id:        r.destination.clone(),
            routable:              r.routable(),
            shortest_distance:     costs.map(|c| c.shortest_distance),
            fastest_time:          costs.map(|c| c.fastest_time),
            shortest_path_time:    costs.map(|c| c.shortest_path_time),
            fastest_path_distance: costs.map(|c| c.fastest_path_distance),
            failure:               r.failure().map(|f| f.as_str()),
        }
    }
}
