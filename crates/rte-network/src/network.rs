//! Road graph representation and builder.
//!
//! # Data layout
//!
//! Every input segment becomes one undirected **edge** (`EdgeId`, input
//! order) carrying two weights: length in metres and traversal time in
//! seconds.  For traversal the edges are expanded into directed **arcs**
//! stored in **Compressed Sparse Row (CSR)** form.  Given a `NodeId n`, its
//! outgoing arcs occupy:
//!
//! ```text
//! arc_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! A two-way edge owns two arcs, a one-way edge owns one.  Arc weights are
//! read through `arc_edge`, so the two directions always agree.
//!
//! # Spatial indices
//!
//! Two R-trees (via `rstar`) are built over a planar frame where longitude
//! is scaled by `cos(mean latitude)`: one over vertices for vertex tie-in,
//! one over edge lines for edge tie-in.

use rstar::primitives::{GeomWithData, Line};
use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;
use tracing::debug;

use rte_core::{ArcId, EdgeId, EstimatorConfig, GeoPoint, NodeId, RoadSegment};

use crate::{NetworkError, NetworkResult};

/// Squared planar distances within this relative margin of the nearest one
/// are treated as ties, absorbing coordinate rounding.
const TIE_REL_EPS: f64 = 1e-9;

/// Lower bound on metres per degree of latitude; keeps grid cells at least
/// one tolerance wide.
const M_PER_DEG_MIN: f64 = 110_000.0;

/// Smallest dedup cell, in degrees (about a tenth of a millimetre).
const MIN_CELL_DEG: f64 = 1e-9;

// ── R-tree entries ────────────────────────────────────────────────────────────

/// Vertex entry: planar `[lat, lon * lon_scale]` and its `NodeId`.
#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2],
    id:    NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dy = self.point[0] - point[0];
        let dx = self.point[1] - point[1];
        dy * dy + dx * dx
    }
}

type EdgeEntry = GeomWithData<Line<[f64; 2]>, EdgeId>;

// ── RoadGraph ─────────────────────────────────────────────────────────────────

/// Read-only road graph: CSR arcs, per-edge weights, and spatial indices.
///
/// All arrays are `pub` for direct indexed access on hot paths.  Do not
/// construct directly; use [`RoadGraphBuilder`] or
/// [`RoadGraph::from_segments`].
pub struct RoadGraph {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Geographic position of each vertex.  Indexed by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    // ── CSR arc adjacency ─────────────────────────────────────────────────
    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Source vertex of each arc.
    pub arc_from: Vec<NodeId>,

    /// Destination vertex of each arc.
    pub arc_to: Vec<NodeId>,

    /// Edge that owns each arc.
    pub arc_edge: Vec<EdgeId>,

    // ── Edge data (indexed by EdgeId = input segment order) ───────────────
    /// `(from, to)` vertices in the segment's own orientation.
    pub edge_nodes: Vec<(NodeId, NodeId)>,

    /// Physical length in metres.
    pub edge_length_m: Vec<f64>,

    /// Traversal time in seconds at the effective speed.
    pub edge_time_s: Vec<f64>,

    /// Traversable only in the `from → to` direction.
    pub edge_oneway: Vec<bool>,

    // ── Spatial indices ───────────────────────────────────────────────────
    lon_scale: f64,
    node_idx:  RTree<NodeEntry>,
    edge_idx:  RTree<EdgeEntry>,
}

impl RoadGraph {
    /// Validate `config` and build a graph from `segments` in order.
    pub fn from_segments(segments: &[RoadSegment], config: &EstimatorConfig) -> NetworkResult<Self> {
        config.validate()?;
        let mut b = RoadGraphBuilder::with_capacity(config, segments.len());
        for seg in segments {
            b.add_segment(seg)?;
        }
        b.build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    /// Number of undirected edges, always equal to the number of segments.
    pub fn edge_count(&self) -> usize {
        self.edge_nodes.len()
    }

    /// Number of directed arcs in the CSR.
    pub fn arc_count(&self) -> usize {
        self.arc_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    /// Sum of all edge lengths; an upper bound for any simple path cost.
    pub fn total_length_m(&self) -> f64 {
        self.edge_length_m.iter().sum()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `ArcId`s of all outgoing arcs from `node`.
    #[inline]
    pub fn out_arcs(&self, node: NodeId) -> impl Iterator<Item = ArcId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| ArcId(i as u32))
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    #[inline]
    fn planar(&self, pos: GeoPoint) -> [f64; 2] {
        [pos.lat, pos.lon * self.lon_scale]
    }

    /// Nearest vertex to `pos`; among equidistant vertices the lowest
    /// `NodeId` wins.
    ///
    /// Returns `None` if the graph has no vertices or `pos` is not a valid
    /// coordinate.
    pub fn nearest_node(&self, pos: GeoPoint) -> Option<NodeId> {
        if !pos.is_valid() {
            return None;
        }
        let q = self.planar(pos);
        let mut iter = self.node_idx.nearest_neighbor_iter_with_distance_2(&q);
        let (first, d0) = iter.next()?;
        let mut best = first.id;
        for (entry, d) in iter {
            if d > d0 * (1.0 + TIE_REL_EPS) + f64::MIN_POSITIVE {
                break;
            }
            best = best.min(entry.id);
        }
        Some(best)
    }

    /// Nearest edge to `pos`; among equidistant edges the lowest `EdgeId`
    /// wins.
    pub fn nearest_edge(&self, pos: GeoPoint) -> Option<EdgeId> {
        if !pos.is_valid() {
            return None;
        }
        let q = self.planar(pos);
        let mut iter = self.edge_idx.nearest_neighbor_iter_with_distance_2(&q);
        let (first, d0) = iter.next()?;
        let mut best = first.data;
        for (entry, d) in iter {
            if d > d0 * (1.0 + TIE_REL_EPS) + f64::MIN_POSITIVE {
                break;
            }
            best = best.min(entry.data);
        }
        Some(best)
    }

    // ── Connectivity ──────────────────────────────────────────────────────

    /// Label connected components, ignoring edge direction.
    pub fn components(&self) -> Components {
        let mut dsu = Dsu::new(self.node_count());
        for &(a, b) in &self.edge_nodes {
            dsu.union(a.index(), b.index());
        }

        // Relabel roots densely in NodeId order so labels are stable.
        let mut root_label: FxHashMap<usize, u32> = FxHashMap::default();
        let mut labels = Vec::with_capacity(self.node_count());
        for n in 0..self.node_count() {
            let root = dsu.find(n);
            let next = root_label.len() as u32;
            labels.push(*root_label.entry(root).or_insert(next));
        }

        Components { count: root_label.len(), labels }
    }
}

// ── Components ────────────────────────────────────────────────────────────────

/// Connected-component labelling of a [`RoadGraph`].
#[derive(Debug, Clone)]
pub struct Components {
    /// Component label per vertex, dense from 0 in first-seen order.
    pub labels: Vec<u32>,
    pub count:  usize,
}

impl Components {
    pub fn same(&self, a: NodeId, b: NodeId) -> bool {
        self.labels[a.index()] == self.labels[b.index()]
    }

    /// Vertex count of each component, indexed by label.
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.count];
        for &l in &self.labels {
            sizes[l as usize] += 1;
        }
        sizes
    }
}

// Disjoint set union
struct Dsu {
    parent: Vec<usize>,
}

impl Dsu {
    fn new(n: usize) -> Self {
        Self { parent: (0..n).collect() }
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    fn union(&mut self, i: usize, j: usize) {
        let (ri, rj) = (self.find(i), self.find(j));
        if ri != rj {
            // Lower root wins so labels follow registration order.
            let (lo, hi) = if ri < rj { (ri, rj) } else { (rj, ri) };
            self.parent[hi] = lo;
        }
    }
}

// ── RoadGraphBuilder ──────────────────────────────────────────────────────────

/// Construct a [`RoadGraph`] segment by segment, then call
/// [`build`](Self::build).
///
/// Endpoints within `merge_tolerance_m` of an existing vertex are merged
/// into it (the earliest registered vertex wins), so roads that meet at a
/// junction share one vertex even when their coordinates differ slightly.
///
/// # Example
///
/// ```
/// use rte_core::{EstimatorConfig, GeoPoint, RoadSegment};
/// use rte_network::RoadGraphBuilder;
///
/// let config = EstimatorConfig::default();
/// let mut b = RoadGraphBuilder::new(&config);
/// let a = GeoPoint::new(8.48, -13.23);
/// let c = GeoPoint::new(8.49, -13.22);
/// b.add_segment(&RoadSegment::new(a, c, 1_600.0).with_speed(40.0)).unwrap();
/// let graph = b.build().unwrap();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// assert_eq!(graph.arc_count(), 2); // two-way
/// ```
pub struct RoadGraphBuilder {
    default_speed_kmh: f64,
    merge_tolerance_m: f64,
    nodes:             Vec<GeoPoint>,
    /// Grid cells (degrees) → vertices, for tolerance merging.
    cells:             FxHashMap<(i64, i64), Vec<NodeId>>,
    /// Exact-coordinate lookup, used when the tolerance is zero.
    exact:             FxHashMap<(u64, u64), NodeId>,
    raw_edges:         Vec<RawEdge>,
}

struct RawEdge {
    from:     NodeId,
    to:       NodeId,
    length_m: f64,
    time_s:   f64,
    oneway:   bool,
}

impl RoadGraphBuilder {
    /// Create a builder using `config`'s default speed and merge tolerance.
    ///
    /// The config is not validated here; [`RoadGraph::from_segments`] does
    /// that before building.
    pub fn new(config: &EstimatorConfig) -> Self {
        Self::with_capacity(config, 0)
    }

    /// Pre-allocate for the expected number of segments.
    pub fn with_capacity(config: &EstimatorConfig, segments: usize) -> Self {
        Self {
            default_speed_kmh: config.default_speed_kmh,
            merge_tolerance_m: config.merge_tolerance_m,
            nodes:             Vec::with_capacity(segments * 2),
            cells:             FxHashMap::default(),
            exact:             FxHashMap::default(),
            raw_edges:         Vec::with_capacity(segments),
        }
    }

    /// Validate `seg`, register its endpoints, and add one edge.
    pub fn add_segment(&mut self, seg: &RoadSegment) -> NetworkResult<EdgeId> {
        let index = self.raw_edges.len();
        if !seg.length_m.is_finite() || seg.length_m < 0.0 {
            return Err(NetworkError::InvalidLength { index, length_m: seg.length_m });
        }
        for pos in [seg.from, seg.to] {
            if !pos.is_valid() {
                return Err(NetworkError::InvalidCoordinate { index, pos });
            }
        }

        let time_s = seg.travel_secs(self.default_speed_kmh);
        if !time_s.is_finite() {
            return Err(NetworkError::InvalidTravelTime { index });
        }

        let edge = EdgeId::try_from(index).map_err(|_| NetworkError::CapacityExceeded)?;
        let from = self.intern_node(seg.from)?;
        let to   = self.intern_node(seg.to)?;

        self.raw_edges.push(RawEdge {
            from,
            to,
            length_m: seg.length_m,
            time_s,
            oneway:   seg.oneway,
        });
        Ok(edge)
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Return the vertex for `pos`, merging with an existing one within the
    /// tolerance or registering a new one.
    fn intern_node(&mut self, pos: GeoPoint) -> NetworkResult<NodeId> {
        if self.merge_tolerance_m <= 0.0 {
            // +0.0 normalises negative zero so both compare equal bitwise.
            let key = ((pos.lat + 0.0).to_bits(), (pos.lon + 0.0).to_bits());
            if let Some(&id) = self.exact.get(&key) {
                return Ok(id);
            }
            let id = self.push_node(pos)?;
            self.exact.insert(key, id);
            return Ok(id);
        }

        // Floored so cell indices stay well inside i64.
        let cell_deg = (self.merge_tolerance_m / M_PER_DEG_MIN).max(MIN_CELL_DEG);
        let (ci, cj) = cell_of(pos, cell_deg);
        // Longitude cells shrink with cos(lat); widen the search to match.
        let lon_reach = (1.0 / pos.lat.to_radians().cos().max(0.01)).ceil() as i64;

        let mut found: Option<NodeId> = None;
        for di in -1..=1 {
            for dj in -lon_reach..=lon_reach {
                let Some(ids) = self.cells.get(&(ci + di, cj + dj)) else {
                    continue;
                };
                for &id in ids {
                    if self.nodes[id.index()].distance_m(pos) <= self.merge_tolerance_m
                        && found.is_none_or(|f| id < f)
                    {
                        found = Some(id);
                    }
                }
            }
        }
        if let Some(id) = found {
            return Ok(id);
        }

        let id = self.push_node(pos)?;
        self.cells.entry((ci, cj)).or_default().push(id);
        Ok(id)
    }

    fn push_node(&mut self, pos: GeoPoint) -> NetworkResult<NodeId> {
        let id = NodeId::try_from(self.nodes.len()).map_err(|_| NetworkError::CapacityExceeded)?;
        self.nodes.push(pos);
        Ok(id)
    }

    /// Consume the builder and produce a [`RoadGraph`].
    ///
    /// Fails with [`NetworkError::EmptyNetwork`] if no segment was added.
    /// Time complexity: O(E log E) for the arc sort + O(N log N) for the
    /// R-tree bulk loads.
    pub fn build(self) -> NetworkResult<RoadGraph> {
        if self.raw_edges.is_empty() {
            return Err(NetworkError::EmptyNetwork);
        }
        let node_count = self.nodes.len();

        // Expand edges into directed arcs, then sort by source for CSR.
        // Stable sort keeps input order among arcs of the same vertex.
        let mut arcs: Vec<(NodeId, NodeId, EdgeId)> = Vec::with_capacity(self.raw_edges.len() * 2);
        for (i, e) in self.raw_edges.iter().enumerate() {
            let edge = EdgeId(i as u32);
            arcs.push((e.from, e.to, edge));
            if !e.oneway {
                arcs.push((e.to, e.from, edge));
            }
        }
        if u32::try_from(arcs.len()).is_err() {
            return Err(NetworkError::CapacityExceeded);
        }
        arcs.sort_by_key(|&(from, _, _)| from.0);

        let arc_from: Vec<NodeId> = arcs.iter().map(|a| a.0).collect();
        let arc_to:   Vec<NodeId> = arcs.iter().map(|a| a.1).collect();
        let arc_edge: Vec<EdgeId> = arcs.iter().map(|a| a.2).collect();

        // Build CSR row pointer (node_out_start).
        let mut node_out_start = vec![0u32; node_count + 1];
        for a in &arcs {
            node_out_start[a.0.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, arcs.len());

        let mean_lat = self.nodes.iter().map(|p| p.lat).sum::<f64>() / node_count as f64;
        let lon_scale = mean_lat.to_radians().cos().max(0.01);
        let planar = |p: GeoPoint| [p.lat, p.lon * lon_scale];

        let node_entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, &pos)| NodeEntry { point: planar(pos), id: NodeId(i as u32) })
            .collect();
        let edge_entries: Vec<EdgeEntry> = self
            .raw_edges
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let line = Line::new(planar(self.nodes[e.from.index()]), planar(self.nodes[e.to.index()]));
                GeomWithData::new(line, EdgeId(i as u32))
            })
            .collect();

        debug!(
            nodes = node_count,
            edges = self.raw_edges.len(),
            arcs = arcs.len(),
            "road graph built"
        );

        Ok(RoadGraph {
            node_pos: self.nodes,
            node_out_start,
            arc_from,
            arc_to,
            arc_edge,
            edge_nodes:    self.raw_edges.iter().map(|e| (e.from, e.to)).collect(),
            edge_length_m: self.raw_edges.iter().map(|e| e.length_m).collect(),
            edge_time_s:   self.raw_edges.iter().map(|e| e.time_s).collect(),
            edge_oneway:   self.raw_edges.iter().map(|e| e.oneway).collect(),
            lon_scale,
            node_idx: RTree::bulk_load(node_entries),
            edge_idx: RTree::bulk_load(edge_entries),
        })
    }
}

fn cell_of(pos: GeoPoint, cell_deg: f64) -> (i64, i64) {
    ((pos.lat / cell_deg).floor() as i64, (pos.lon / cell_deg).floor() as i64)
}
