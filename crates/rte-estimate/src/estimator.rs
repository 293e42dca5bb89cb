//! The [`Estimator`]: one road graph, many (origin, destination) queries.

use tracing::{debug, info, warn};

use rte_core::{EstimatorConfig, Point, RoadSegment};
use rte_network::{
    tie_in, DijkstraRouter, NetworkError, QueryGraph, RoadGraph, Router, TieInFailure, TiedPoint,
    Weight,
};

use crate::{BatchSummary, EstimateResult, ResultSink, RouteCosts, RouteFailure, RouteResult};

type Tie = Result<TiedPoint, TieInFailure>;

/// Owns a read-only [`RoadGraph`], the configuration, and a [`Router`].
///
/// Queries take `&self` and allocate their own search state, so one
/// estimator can be shared by reference across threads.
pub struct Estimator<R: Router = DijkstraRouter> {
    graph:  RoadGraph,
    config: EstimatorConfig,
    router: R,
}

impl Estimator<DijkstraRouter> {
    /// Build the graph from `segments` and use the default Dijkstra router.
    ///
    /// Fails if the config is invalid or the segment list is empty or holds
    /// an invalid segment; nothing can be estimated in those cases.
    pub fn new(segments: &[RoadSegment], config: EstimatorConfig) -> EstimateResult<Self> {
        config.validate()?;
        let graph = RoadGraph::from_segments(segments, &config)?;
        Ok(Self { graph, config, router: DijkstraRouter })
    }
}

impl<R: Router> Estimator<R> {
    /// Wrap an already-built graph with a custom router.
    pub fn with_router(graph: RoadGraph, config: EstimatorConfig, router: R) -> EstimateResult<Self> {
        config.validate()?;
        Ok(Self { graph, config, router })
    }

    pub fn graph(&self) -> &RoadGraph {
        &self.graph
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    // ── Single pair ───────────────────────────────────────────────────────

    /// Evaluate one pair.
    pub fn estimate(&self, origin: &Point, destination: &Point) -> RouteResult {
        let from = self.tie(origin);
        let to = self.tie(destination);
        self.evaluate(origin, &from, destination, &to)
    }

    // ── Batches ───────────────────────────────────────────────────────────

    /// Evaluate the cross product `origins × destinations`, origin-major, in
    /// input order.
    pub fn run_batch(&self, origins: &[Point], destinations: &[Point]) -> Vec<RouteResult> {
        let mut out = Vec::with_capacity(origins.len() * destinations.len());
        self.run_batch_into(origins, destinations, &mut out);
        out
    }

    /// Like [`run_batch`](Self::run_batch) but streams each result into
    /// `sink` as soon as it is computed.
    pub fn run_batch_into<S: ResultSink>(
        &self,
        origins:      &[Point],
        destinations: &[Point],
        sink:         &mut S,
    ) -> BatchSummary {
        let origin_ties = self.tie_all(origins);
        let dest_ties = self.tie_all(destinations);

        let mut summary = BatchSummary::default();
        for (origin, from) in origins.iter().zip(&origin_ties) {
            for (destination, to) in destinations.iter().zip(&dest_ties) {
                let result = self.evaluate(origin, from, destination, to);
                summary.record(&result);
                sink.on_result(result);
            }
        }

        log_summary(&summary);
        sink.on_batch_end(&summary);
        summary
    }

    /// Same results, in the same order, as [`run_batch`](Self::run_batch),
    /// with pairs evaluated on Rayon's thread pool.
    #[cfg(feature = "parallel")]
    pub fn run_batch_parallel(&self, origins: &[Point], destinations: &[Point]) -> Vec<RouteResult> {
        use rayon::prelude::*;

        let origin_ties = self.tie_all(origins);
        let dest_ties = self.tie_all(destinations);
        let cols = destinations.len();

        let results: Vec<RouteResult> = (0..origins.len() * cols)
            .into_par_iter()
            .map(|k| {
                let (i, j) = (k / cols, k % cols);
                self.evaluate(&origins[i], &origin_ties[i], &destinations[j], &dest_ties[j])
            })
            .collect();

        let mut summary = BatchSummary::default();
        results.iter().for_each(|r| summary.record(r));
        log_summary(&summary);
        results
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn tie(&self, point: &Point) -> Tie {
        tie_in(&self.graph, point.pos, &self.config.tie_in)
    }

    fn tie_all(&self, points: &[Point]) -> Vec<Tie> {
        points.iter().map(|p| self.tie(p)).collect()
    }

    fn evaluate(&self, origin: &Point, from: &Tie, destination: &Point, to: &Tie) -> RouteResult {
        let outcome = self.route_pair(from, to);
        match &outcome {
            Ok(c) => debug!(
                origin = %origin.id,
                destination = %destination.id,
                distance = c.shortest_distance,
                time = c.fastest_time,
                "pair routed"
            ),
            Err(e) => warn!(
                origin = %origin.id,
                destination = %destination.id,
                "pair not routable: {e}"
            ),
        }
        RouteResult {
            origin:      origin.id.clone(),
            destination: destination.id.clone(),
            outcome,
        }
    }

    fn route_pair(&self, from: &Tie, to: &Tie) -> Result<RouteCosts, RouteFailure> {
        let from = from.as_ref().map_err(|e| RouteFailure::OriginTieIn(e.clone()))?;
        let to = to.as_ref().map_err(|e| RouteFailure::DestinationTieIn(e.clone()))?;

        let mut query = QueryGraph::new(&self.graph);
        let source = query.place(from);
        let target = query.place(to);

        let shortest = self
            .router
            .route(&query, source, target, Weight::Distance)
            .map_err(route_failure)?;
        let fastest = self
            .router
            .route(&query, source, target, Weight::Time)
            .map_err(route_failure)?;

        let du = self.config.distance_unit;
        let tu = self.config.time_unit;
        Ok(RouteCosts {
            shortest_distance:     du.from_meters(shortest.distance_m),
            fastest_time:          tu.from_seconds(fastest.time_s),
            shortest_path_time:    tu.from_seconds(shortest.time_s),
            fastest_path_distance: du.from_meters(fastest.distance_m),
            origin_offset_m:       from.offset_m,
            destination_offset_m:  to.offset_m,
        })
    }
}

fn route_failure(err: NetworkError) -> RouteFailure {
    match err {
        NetworkError::NoRoute { .. } => RouteFailure::Unreachable,
        other => RouteFailure::Routing(other.to_string()),
    }
}

fn log_summary(summary: &BatchSummary) {
    info!(
        pairs = summary.pairs,
        routed = summary.routed,
        unreachable = summary.unreachable,
        tie_in_failures = summary.tie_in_failures,
        "batch complete"
    );
}
