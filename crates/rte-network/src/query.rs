//! Per-query overlay over a read-only [`RoadGraph`].
//!
//! Edge tie-in places query points strictly inside an edge.  Rather than
//! mutate the shared graph, a [`QueryGraph`] appends virtual vertices after
//! the base vertices and adds virtual arcs that split the edge into pieces,
//! each carrying its share of the edge's length and time.  The base arcs of
//! a split edge stay in place; they are never cheaper than the pieces.
//!
//! A `QueryGraph` is cheap to create and is dropped after the query, so the
//! base graph can be shared across threads untouched.

use rustc_hash::FxHashMap;

use rte_core::{EdgeId, NodeId};

use crate::tie_in::{Anchor, TiedPoint};
use crate::RoadGraph;

/// One outgoing arc as seen by the router.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ArcView {
    pub to:       NodeId,
    pub length_m: f64,
    pub time_s:   f64,
}

/// A base graph plus the virtual vertices of one query.
pub struct QueryGraph<'a> {
    base:          &'a RoadGraph,
    virtual_nodes: usize,
    /// Split points per edge, sorted by fraction.  A `Vec` keeps the arc
    /// order independent of hashing.
    splits:        Vec<(EdgeId, Vec<(f64, NodeId)>)>,
    virtual_arcs:  Vec<ArcView>,
    /// Virtual arcs leaving each vertex (base or virtual).
    virtual_out:   FxHashMap<NodeId, Vec<usize>>,
}

impl<'a> QueryGraph<'a> {
    pub fn new(base: &'a RoadGraph) -> Self {
        Self {
            base,
            virtual_nodes: 0,
            splits:        Vec::new(),
            virtual_arcs:  Vec::new(),
            virtual_out:   FxHashMap::default(),
        }
    }

    /// Base vertices plus virtual vertices.
    pub fn node_count(&self) -> usize {
        self.base.node_count() + self.virtual_nodes
    }

    pub fn is_virtual(&self, node: NodeId) -> bool {
        node.index() >= self.base.node_count()
    }

    /// Return the vertex for `tied`, creating a virtual one for edge anchors.
    ///
    /// Placing the same edge position twice returns the same vertex.
    pub fn place(&mut self, tied: &TiedPoint) -> NodeId {
        let (edge, fraction) = match tied.anchor {
            Anchor::Node(n) => return n,
            Anchor::OnEdge { edge, fraction } => (edge, fraction),
        };

        let slot = match self.splits.iter().position(|(e, _)| *e == edge) {
            Some(i) => i,
            None => {
                self.splits.push((edge, Vec::new()));
                self.splits.len() - 1
            }
        };
        if let Some(&(_, existing)) = self.splits[slot].1.iter().find(|(f, _)| *f == fraction) {
            return existing;
        }

        let node = NodeId(self.node_count() as u32);
        self.virtual_nodes += 1;

        let points = &mut self.splits[slot].1;
        let at = points.partition_point(|(f, _)| *f < fraction);
        points.insert(at, (fraction, node));

        self.rebuild_virtual_arcs();
        node
    }

    /// Outgoing arcs of `node`: base CSR arcs followed by virtual arcs.
    pub fn arcs(&self, node: NodeId) -> impl Iterator<Item = ArcView> + '_ {
        let base = (!self.is_virtual(node))
            .then(|| self.base.out_arcs(node))
            .into_iter()
            .flatten()
            .map(|arc| {
                let edge = self.base.arc_edge[arc.index()];
                ArcView {
                    to:       self.base.arc_to[arc.index()],
                    length_m: self.base.edge_length_m[edge.index()],
                    time_s:   self.base.edge_time_s[edge.index()],
                }
            });
        let extra = self
            .virtual_out
            .get(&node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(|&i| self.virtual_arcs[i]);
        base.chain(extra)
    }

    /// Regenerate the chain `from → v1 → … → vk → to` for every split edge.
    fn rebuild_virtual_arcs(&mut self) {
        self.virtual_arcs.clear();
        self.virtual_out.clear();

        for (edge, points) in &self.splits {
            let e = edge.index();
            let (from, to) = self.base.edge_nodes[e];
            let (length_m, time_s) = (self.base.edge_length_m[e], self.base.edge_time_s[e]);
            let oneway = self.base.edge_oneway[e];

            let chain: Vec<(f64, NodeId)> = std::iter::once((0.0, from))
                .chain(points.iter().copied())
                .chain(std::iter::once((1.0, to)))
                .collect();

            for w in chain.windows(2) {
                let ((f0, a), (f1, b)) = (w[0], w[1]);
                let share = f1 - f0;
                let forward = ArcView { to: b, length_m: length_m * share, time_s: time_s * share };
                push_arc(&mut self.virtual_arcs, &mut self.virtual_out, a, forward);
                if !oneway {
                    let backward = ArcView { to: a, ..forward };
                    push_arc(&mut self.virtual_arcs, &mut self.virtual_out, b, backward);
                }
            }
        }
    }
}

fn push_arc(arcs: &mut Vec<ArcView>, out: &mut FxHashMap<NodeId, Vec<usize>>, from: NodeId, arc: ArcView) {
    out.entry(from).or_default().push(arcs.len());
    arcs.push(arc);
}
