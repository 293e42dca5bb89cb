//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! The estimator calls routing via the [`Router`] trait, so applications can
//! swap in another implementation (A*, bidirectional search) without
//! touching the batch runner.  The default [`DijkstraRouter`] is sufficient
//! for station × incident batches.
//!
//! # Cost units
//!
//! Costs are `f64` metres ([`Weight::Distance`]) or seconds
//! ([`Weight::Time`]).  Every arc weight is finite and non-negative, so
//! the accumulated cost of a simple path is bounded by the sum of all edge
//! weights and never overflows.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use rte_core::NodeId;

use crate::query::{ArcView, QueryGraph};
use crate::{NetworkError, NetworkResult};

// ── Weight ────────────────────────────────────────────────────────────────────

/// Which edge weight a search minimises.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Weight {
    Distance,
    Time,
}

impl Weight {
    #[inline]
    fn of(self, arc: &ArcView) -> f64 {
        match self {
            Weight::Distance => arc.length_m,
            Weight::Time     => arc.time_s,
        }
    }
}

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: the vertex sequence and both totals along
/// it, whichever weight was minimised.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Vertices from source to destination, inclusive.
    pub nodes:      Vec<NodeId>,
    /// Total length in metres.
    pub distance_m: f64,
    /// Total traversal time in seconds.
    pub time_s:     f64,
}

impl Route {
    /// `true` if the source and destination are the same vertex.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() <= 1
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one router can serve the
/// parallel batch runner.
pub trait Router: Send + Sync {
    /// Compute the route from `from` to `to` minimising `weight`.
    ///
    /// `from == to` yields a trivial route with zero totals.  Returns
    /// [`NetworkError::NoRoute`] if `to` is unreachable.
    fn route(
        &self,
        graph:  &QueryGraph<'_>,
        from:   NodeId,
        to:     NodeId,
        weight: Weight,
    ) -> NetworkResult<Route>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Standard Dijkstra's algorithm over a [`QueryGraph`].
///
/// Ties between equal-cost heap entries are broken by `NodeId`, and arcs are
/// relaxed in CSR order, so repeated queries return identical routes.
#[derive(Copy, Clone, Debug, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(
        &self,
        graph:  &QueryGraph<'_>,
        from:   NodeId,
        to:     NodeId,
        weight: Weight,
    ) -> NetworkResult<Route> {
        dijkstra(graph, from, to, weight)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// `f64` cost with a total order, for use as a heap key.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Cost(f64);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

fn dijkstra(graph: &QueryGraph<'_>, from: NodeId, to: NodeId, weight: Weight) -> NetworkResult<Route> {
    let n = graph.node_count();
    for node in [from, to] {
        if node.index() >= n {
            return Err(NetworkError::NodeNotFound(node));
        }
    }
    if from == to {
        return Ok(Route { nodes: vec![from], distance_m: 0.0, time_s: 0.0 });
    }

    // dist[v] = best known cost to reach v.
    let mut dist = vec![f64::INFINITY; n];
    // prev[v] = (predecessor, arc used) for reached vertices.
    let mut prev: Vec<Option<(NodeId, ArcView)>> = vec![None; n];

    dist[from.index()] = 0.0;

    // Min-heap: Reverse makes BinaryHeap (max) behave as min-heap.
    let mut heap: BinaryHeap<Reverse<(Cost, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((Cost(0.0), from)));

    while let Some(Reverse((Cost(cost), node))) = heap.pop() {
        if node == to {
            return Ok(reconstruct(&prev, from, to));
        }

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        for arc in graph.arcs(node) {
            let new_cost = cost + weight.of(&arc);
            if new_cost < dist[arc.to.index()] {
                dist[arc.to.index()] = new_cost;
                prev[arc.to.index()] = Some((node, arc));
                heap.push(Reverse((Cost(new_cost), arc.to)));
            }
        }
    }

    Err(NetworkError::NoRoute { from, to })
}

/// Walk `prev` back from `to`, then sum both weights source-first so the
/// minimised total matches the search cost exactly.
fn reconstruct(prev: &[Option<(NodeId, ArcView)>], from: NodeId, to: NodeId) -> Route {
    let mut arcs = Vec::new();
    let mut nodes = vec![to];
    let mut cur = to;
    while cur != from {
        let Some((p, arc)) = prev[cur.index()] else {
            break;
        };
        arcs.push(arc);
        nodes.push(p);
        cur = p;
    }
    arcs.reverse();
    nodes.reverse();

    let (mut distance_m, mut time_s) = (0.0, 0.0);
    for arc in &arcs {
        distance_m += arc.length_m;
        time_s += arc.time_s;
    }
    Route { nodes, distance_m, time_s }
}
