//! Attach arbitrary query points to the road graph.
//!
//! A query point rarely sits exactly on a vertex.  [`tie_in`] resolves it to
//! an [`Anchor`]: either an existing vertex, or a position along an edge
//! that a [`QueryGraph`](crate::QueryGraph) later turns into a virtual
//! vertex.  Which one depends on [`TieInMode`].

use thiserror::Error;

use rte_core::{EdgeId, GeoPoint, NodeId, TieInConfig, TieInMode};

use crate::RoadGraph;

/// Where a query point attaches to the graph.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Anchor {
    /// An existing vertex.
    Node(NodeId),
    /// Strictly inside `edge`, at `fraction` of the way from the edge's
    /// `from` vertex to its `to` vertex.
    OnEdge { edge: EdgeId, fraction: f64 },
}

/// A query point resolved onto the graph.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TiedPoint {
    pub anchor:   Anchor,
    /// Coordinate of the tie point on the network.
    pub pos:      GeoPoint,
    /// Geodesic distance from the query point to `pos`, metres.
    pub offset_m: f64,
}

/// Why a query point could not be tied in.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum TieInFailure {
    #[error("query point {0} is not a valid coordinate")]
    InvalidPoint(GeoPoint),

    #[error("road network has no vertices")]
    NoNetwork,

    #[error("nearest road is {distance_m:.1} m away (limit {max_m:.1} m)")]
    TooFar { distance_m: f64, max_m: f64 },
}

/// Resolve `pos` onto `graph` according to `config`.
pub fn tie_in(graph: &RoadGraph, pos: GeoPoint, config: &TieInConfig) -> Result<TiedPoint, TieInFailure> {
    if !pos.is_valid() {
        return Err(TieInFailure::InvalidPoint(pos));
    }

    let tied = match config.mode {
        TieInMode::Vertex => tie_to_vertex(graph, pos)?,
        TieInMode::Edge   => tie_to_edge(graph, pos)?,
    };

    if let Some(max_m) = config.max_distance_m {
        if tied.offset_m > max_m {
            return Err(TieInFailure::TooFar { distance_m: tied.offset_m, max_m });
        }
    }
    Ok(tied)
}

fn tie_to_vertex(graph: &RoadGraph, pos: GeoPoint) -> Result<TiedPoint, TieInFailure> {
    let node = graph.nearest_node(pos).ok_or(TieInFailure::NoNetwork)?;
    let at = graph.node_pos[node.index()];
    Ok(TiedPoint { anchor: Anchor::Node(node), pos: at, offset_m: pos.distance_m(at) })
}

fn tie_to_edge(graph: &RoadGraph, pos: GeoPoint) -> Result<TiedPoint, TieInFailure> {
    let edge = graph.nearest_edge(pos).ok_or(TieInFailure::NoNetwork)?;
    let (from, to) = graph.edge_nodes[edge.index()];
    let (fraction, at) = pos.project_onto(graph.node_pos[from.index()], graph.node_pos[to.index()]);

    // Projections onto an endpoint reuse the vertex instead of splitting.
    let anchor = if fraction <= 0.0 {
        Anchor::Node(from)
    } else if fraction >= 1.0 {
        Anchor::Node(to)
    } else {
        Anchor::OnEdge { edge, fraction }
    };
    Ok(TiedPoint { anchor, pos: at, offset_m: pos.distance_m(at) })
}
