//! Unit tests for rte-network.
//!
//! All tests use hand-crafted segment lists so they run without any data
//! files.

#[cfg(test)]
mod helpers {
    use rte_core::{EstimatorConfig, GeoPoint, RoadSegment};

    use crate::RoadGraph;

    pub fn config() -> EstimatorConfig {
        EstimatorConfig::default()
    }

    /// A–B (10 km at 50 km/h) and B–C (20 km at 40 km/h).
    ///
    /// Positions are a few hundred metres apart; only the declared lengths
    /// matter for routing.
    pub fn abc() -> (RoadGraph, [GeoPoint; 3]) {
        let a = GeoPoint::new(8.480, -13.230);
        let b = GeoPoint::new(8.480, -13.220);
        let c = GeoPoint::new(8.480, -13.210);
        let segments = [
            RoadSegment::new(a, b, 10_000.0).with_speed(50.0),
            RoadSegment::new(b, c, 20_000.0).with_speed(40.0),
        ];
        (RoadGraph::from_segments(&segments, &config()).unwrap(), [a, b, c])
    }

    /// Square with a slow short route and a fast long detour:
    ///
    /// ```text
    ///   S ── 1 km @ 10 km/h ── T
    ///   │                      │
    ///  2 km @ 100          2 km @ 100
    ///   │                      │
    ///   X ── 2 km @ 100 ────── Y
    /// ```
    ///
    /// Shortest: S→T = 1 km, 6 min.  Fastest: S→X→Y→T = 6 km, 3.6 min.
    pub fn detour() -> (RoadGraph, [GeoPoint; 4]) {
        let s = GeoPoint::new(0.000, 0.000);
        let t = GeoPoint::new(0.000, 0.010);
        let x = GeoPoint::new(-0.010, 0.000);
        let y = GeoPoint::new(-0.010, 0.010);
        let segments = [
            RoadSegment::new(s, t, 1_000.0).with_speed(10.0),
            RoadSegment::new(s, x, 2_000.0).with_speed(100.0),
            RoadSegment::new(x, y, 2_000.0).with_speed(100.0),
            RoadSegment::new(y, t, 2_000.0).with_speed(100.0),
        ];
        (RoadGraph::from_segments(&segments, &config()).unwrap(), [s, t, x, y])
    }
}

// ── Builder & graph structure ─────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use rte_core::{EstimatorConfig, GeoPoint, NodeId, RoadSegment};

    use crate::{NetworkError, RoadGraph, RoadGraphBuilder};

    #[test]
    fn empty_build_fails() {
        let config = EstimatorConfig::default();
        let result = RoadGraphBuilder::new(&config).build();
        assert!(matches!(result, Err(NetworkError::EmptyNetwork)));
        assert!(matches!(
            RoadGraph::from_segments(&[], &config),
            Err(NetworkError::EmptyNetwork)
        ));
    }

    #[test]
    fn negative_length_rejected() {
        let seg = RoadSegment::new(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.01), -1.0);
        let err = RoadGraph::from_segments(&[seg], &EstimatorConfig::default()).err().unwrap();
        assert!(matches!(err, NetworkError::InvalidLength { index: 0, .. }));
        assert!(err.is_invalid_input());
    }

    #[test]
    fn nan_length_and_bad_coordinate_rejected() {
        let ok = RoadSegment::new(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.01), 5.0);
        let nan = RoadSegment::new(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.01), f64::NAN);
        let config = EstimatorConfig::default();
        assert!(matches!(
            RoadGraph::from_segments(&[ok.clone(), nan], &config),
            Err(NetworkError::InvalidLength { index: 1, .. })
        ));

        let off_globe = RoadSegment::new(GeoPoint::new(95.0, 0.0), GeoPoint::new(0.0, 0.01), 5.0);
        assert!(matches!(
            RoadGraph::from_segments(&[ok, off_globe], &config),
            Err(NetworkError::InvalidCoordinate { index: 1, .. })
        ));
    }

    #[test]
    fn invalid_config_rejected() {
        let seg = RoadSegment::new(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.01), 5.0);
        let mut config = EstimatorConfig::default();
        config.default_speed_kmh = 0.0;
        assert!(matches!(
            RoadGraph::from_segments(&[seg], &config),
            Err(NetworkError::Config(_))
        ));
    }

    #[test]
    fn overflowing_travel_time_rejected() {
        let seg = RoadSegment::new(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.01), 1_000.0);
        let config = EstimatorConfig { default_speed_kmh: 1e-310, ..EstimatorConfig::default() };
        assert!(config.validate().is_ok());
        let err = RoadGraph::from_segments(&[seg], &config).err().unwrap();
        assert!(matches!(err, NetworkError::InvalidTravelTime { index: 0 }));
        assert!(err.is_invalid_input());
    }

    #[test]
    fn shared_endpoints_merge() {
        let (g, _) = super::helpers::abc();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.arc_count(), 4); // two-way
    }

    #[test]
    fn tiny_merge_tolerance_builds() {
        let a = GeoPoint::new(8.480, -13.230);
        let b = GeoPoint::new(8.480, -13.220);
        let c = GeoPoint::new(8.480, -13.210);
        let config = EstimatorConfig { merge_tolerance_m: 1e-14, ..EstimatorConfig::default() };
        assert!(config.validate().is_ok());

        let segs = [RoadSegment::between(a, b), RoadSegment::between(b, c)];
        let g = RoadGraph::from_segments(&segs, &config).unwrap();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn near_coincident_endpoints_merge_within_tolerance() {
        let a = GeoPoint::new(8.48, -13.23);
        let b = GeoPoint::new(8.49, -13.23);
        // ~0.1 m east of b
        let b_jitter = GeoPoint::new(8.49, -13.229_999);
        let c = GeoPoint::new(8.50, -13.23);
        let segs = [RoadSegment::between(a, b), RoadSegment::between(b_jitter, c)];

        let g = RoadGraph::from_segments(&segs, &EstimatorConfig::default()).unwrap();
        assert_eq!(g.node_count(), 3);
        // Merged vertex keeps the first registered coordinate.
        assert_eq!(g.node_pos[1], b);

        let mut exact = EstimatorConfig::default();
        exact.merge_tolerance_m = 0.0;
        let g = RoadGraph::from_segments(&segs, &exact).unwrap();
        assert_eq!(g.node_count(), 4);
    }

    #[test]
    fn vertex_and_edge_bounds() {
        // Mixture of shared and isolated segments.
        let p = |i: u32| GeoPoint::new(0.0, i as f64 * 0.01);
        let segs: Vec<RoadSegment> = [(0, 1), (1, 2), (5, 6), (2, 0), (9, 9)]
            .iter()
            .map(|&(a, b)| RoadSegment::between(p(a), p(b)))
            .collect();
        let g = RoadGraph::from_segments(&segs, &EstimatorConfig::default()).unwrap();
        assert_eq!(g.edge_count(), segs.len());
        assert!(g.node_count() <= 2 * segs.len());
        assert_eq!(g.node_count(), 6); // 0,1,2,5,6,9
    }

    #[test]
    fn one_way_owns_single_arc() {
        let a = GeoPoint::new(0.0, 0.0);
        let c = GeoPoint::new(0.0, 0.01);
        let g = RoadGraph::from_segments(
            &[RoadSegment::between(a, c).one_way()],
            &EstimatorConfig::default(),
        )
        .unwrap();
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.arc_count(), 1);
        assert_eq!(g.out_degree(NodeId(0)), 1);
        assert_eq!(g.out_degree(NodeId(1)), 0); // no return arc
    }

    #[test]
    fn csr_arcs_belong_to_source() {
        let (g, _) = super::helpers::detour();
        for n in 0..g.node_count() {
            let node = NodeId(n as u32);
            assert_eq!(g.out_degree(node), 2);
            for arc in g.out_arcs(node) {
                assert_eq!(g.arc_from[arc.index()], node);
            }
        }
    }

    #[test]
    fn time_weights_use_effective_speed() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 0.1);
        let c = GeoPoint::new(0.0, 0.2);
        let segs = [
            RoadSegment::new(a, b, 10_000.0).with_speed(0.0),
            RoadSegment::new(b, c, 10_000.0),
            RoadSegment::new(a, c, 10_000.0).with_speed(100.0),
        ];
        let g = RoadGraph::from_segments(&segs, &EstimatorConfig::default()).unwrap();
        assert_eq!(g.edge_time_s, vec![720.0, 720.0, 360.0]);
        assert!(g.edge_time_s.iter().all(|t| t.is_finite()));
    }

    #[test]
    fn components_split_disjoint_roads() {
        let segs = [
            RoadSegment::new(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.01), 1_000.0),
            RoadSegment::new(GeoPoint::new(1.0, 0.0), GeoPoint::new(1.0, 0.01), 1_000.0),
            RoadSegment::new(GeoPoint::new(0.0, 0.01), GeoPoint::new(0.0, 0.02), 1_000.0),
        ];
        let g = RoadGraph::from_segments(&segs, &EstimatorConfig::default()).unwrap();
        let comps = g.components();
        assert_eq!(comps.count, 2);
        assert_eq!(comps.labels, vec![0, 0, 1, 1, 0]);
        assert!(comps.same(NodeId(0), NodeId(4)));
        assert!(!comps.same(NodeId(0), NodeId(2)));
        assert_eq!(comps.sizes(), vec![3, 2]);
    }
}

// ── Tie-in ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tie_in {
    use rte_core::{EdgeId, GeoPoint, NodeId, TieInConfig, TieInMode};

    use crate::{tie_in, Anchor, TieInFailure};

    fn vertex_mode() -> TieInConfig {
        TieInConfig { mode: TieInMode::Vertex, max_distance_m: None }
    }

    fn edge_mode() -> TieInConfig {
        TieInConfig { mode: TieInMode::Edge, max_distance_m: None }
    }

    #[test]
    fn exact_vertex() {
        let (g, [a, ..]) = super::helpers::abc();
        let t = tie_in(&g, a, &vertex_mode()).unwrap();
        assert_eq!(t.anchor, Anchor::Node(NodeId(0)));
        assert!(t.offset_m < 1e-6);
    }

    #[test]
    fn nearest_vertex() {
        let (g, _) = super::helpers::abc();
        // Between A (-13.23) and B (-13.22), closer to B.
        let t = tie_in(&g, GeoPoint::new(8.481, -13.222), &vertex_mode()).unwrap();
        assert_eq!(t.anchor, Anchor::Node(NodeId(1)));
        assert!(t.offset_m > 0.0);
    }

    #[test]
    fn equidistant_vertices_pick_lowest_id() {
        let (g, _) = super::helpers::abc();
        // Exactly halfway between A and B.
        let t = tie_in(&g, GeoPoint::new(8.480, -13.225), &vertex_mode()).unwrap();
        assert_eq!(t.anchor, Anchor::Node(NodeId(0)));
    }

    #[test]
    fn too_far_fails() {
        let (g, [a, ..]) = super::helpers::abc();
        let limited = TieInConfig { mode: TieInMode::Vertex, max_distance_m: Some(100.0) };
        let far = GeoPoint::new(a.lat + 0.01, a.lon); // ~1.1 km north
        match tie_in(&g, far, &limited) {
            Err(TieInFailure::TooFar { distance_m, max_m }) => {
                assert!(distance_m > 1_000.0);
                assert_eq!(max_m, 100.0);
            }
            other => panic!("expected TooFar, got {other:?}"),
        }
        assert!(tie_in(&g, a, &limited).is_ok());
    }

    #[test]
    fn non_finite_point_fails_in_both_modes() {
        let (g, _) = super::helpers::abc();
        let nan = GeoPoint::new(f64::NAN, -13.22);
        assert!(matches!(tie_in(&g, nan, &vertex_mode()), Err(TieInFailure::InvalidPoint(_))));
        let inf = GeoPoint::new(8.48, f64::INFINITY);
        assert!(matches!(tie_in(&g, inf, &edge_mode()), Err(TieInFailure::InvalidPoint(_))));
        assert_eq!(g.nearest_node(nan), None);
        assert_eq!(g.nearest_edge(inf), None);
    }

    #[test]
    fn edge_mode_splits_interior() {
        let (g, [a, b, _]) = super::helpers::abc();
        let mid = GeoPoint::new(a.lat + 0.001, (a.lon + b.lon) / 2.0);
        let t = tie_in(&g, mid, &edge_mode()).unwrap();
        match t.anchor {
            Anchor::OnEdge { edge, fraction } => {
                assert_eq!(edge, EdgeId(0));
                assert!((fraction - 0.5).abs() < 1e-6, "fraction {fraction}");
            }
            other => panic!("expected OnEdge, got {other:?}"),
        }
        // Offset is the perpendicular distance, ~111 m.
        assert!((t.offset_m - 111.2).abs() < 1.0, "offset {}", t.offset_m);
    }

    #[test]
    fn edge_mode_endpoint_reuses_vertex() {
        let (g, [a, ..]) = super::helpers::abc();
        let before_a = GeoPoint::new(a.lat, a.lon - 0.005);
        let t = tie_in(&g, before_a, &edge_mode()).unwrap();
        assert_eq!(t.anchor, Anchor::Node(NodeId(0)));
    }
}

// ── Dijkstra routing ──────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use rte_core::{EstimatorConfig, GeoPoint, NodeId, RoadSegment, TieInConfig, TieInMode};

    use crate::{tie_in, DijkstraRouter, NetworkError, QueryGraph, RoadGraph, Router, Weight};

    #[test]
    fn trivial_same_node() {
        let (g, _) = super::helpers::abc();
        let q = QueryGraph::new(&g);
        let r = DijkstraRouter.route(&q, NodeId(0), NodeId(0), Weight::Time).unwrap();
        assert!(r.is_trivial());
        assert_eq!(r.distance_m, 0.0);
        assert_eq!(r.time_s, 0.0);
    }

    #[test]
    fn abc_distance_and_time() {
        let (g, _) = super::helpers::abc();
        let q = QueryGraph::new(&g);
        let by_dist = DijkstraRouter.route(&q, NodeId(0), NodeId(2), Weight::Distance).unwrap();
        let by_time = DijkstraRouter.route(&q, NodeId(0), NodeId(2), Weight::Time).unwrap();
        assert_eq!(by_dist.distance_m, 30_000.0);
        assert_eq!(by_time.time_s, 2_520.0); // 0.7 h
        assert_eq!(by_dist.nodes, vec![NodeId(0), NodeId(1), NodeId(2)]);
    }

    #[test]
    fn fastest_diverges_from_shortest() {
        let (g, _) = super::helpers::detour();
        let q = QueryGraph::new(&g);
        let (s, t) = (NodeId(0), NodeId(1));
        let short = DijkstraRouter.route(&q, s, t, Weight::Distance).unwrap();
        let fast  = DijkstraRouter.route(&q, s, t, Weight::Time).unwrap();

        assert_eq!(short.distance_m, 1_000.0);
        assert_eq!(short.time_s, 360.0);
        assert_eq!(fast.distance_m, 6_000.0);
        assert!((fast.time_s - 216.0).abs() < 1e-9);
        assert!(fast.time_s < short.time_s);
        assert_eq!(fast.nodes.len(), 4);
    }

    #[test]
    fn uniform_speed_paths_coincide() {
        let mut segs = Vec::new();
        let p = |i: u32, j: u32| GeoPoint::new(i as f64 * 0.01, j as f64 * 0.01);
        for i in 0..3 {
            for j in 0..3 {
                if j < 2 {
                    segs.push(RoadSegment::between(p(i, j), p(i, j + 1)));
                }
                if i < 2 {
                    segs.push(RoadSegment::between(p(i, j), p(i + 1, j)));
                }
            }
        }
        let g = RoadGraph::from_segments(&segs, &EstimatorConfig::default()).unwrap();
        let q = QueryGraph::new(&g);
        let from = g.nearest_node(p(0, 0)).unwrap();
        let to   = g.nearest_node(p(2, 2)).unwrap();
        let short = DijkstraRouter.route(&q, from, to, Weight::Distance).unwrap();
        let fast  = DijkstraRouter.route(&q, from, to, Weight::Time).unwrap();
        assert_eq!(short.nodes, fast.nodes);
        assert!(fast.time_s <= short.time_s);
    }

    #[test]
    fn no_route_disconnected() {
        let segs = [
            RoadSegment::new(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.01), 1_000.0),
            RoadSegment::new(GeoPoint::new(1.0, 0.0), GeoPoint::new(1.0, 0.01), 1_000.0),
        ];
        let g = RoadGraph::from_segments(&segs, &EstimatorConfig::default()).unwrap();
        let q = QueryGraph::new(&g);
        for weight in [Weight::Distance, Weight::Time] {
            let result = DijkstraRouter.route(&q, NodeId(0), NodeId(2), weight);
            assert!(matches!(result, Err(NetworkError::NoRoute { .. })));
        }
    }

    #[test]
    fn unknown_node_rejected() {
        let (g, _) = super::helpers::abc();
        let q = QueryGraph::new(&g);
        let result = DijkstraRouter.route(&q, NodeId(0), NodeId(99), Weight::Distance);
        assert!(matches!(result, Err(NetworkError::NodeNotFound(NodeId(99)))));
    }

    #[test]
    fn one_way_blocks_return() {
        let a = GeoPoint::new(0.0, 0.0);
        let c = GeoPoint::new(0.0, 0.01);
        let g = RoadGraph::from_segments(
            &[RoadSegment::between(a, c).one_way()],
            &EstimatorConfig::default(),
        )
        .unwrap();
        let q = QueryGraph::new(&g);
        assert!(DijkstraRouter.route(&q, NodeId(0), NodeId(1), Weight::Time).is_ok());
        assert!(DijkstraRouter.route(&q, NodeId(1), NodeId(0), Weight::Time).is_err());
    }

    #[test]
    fn repeated_queries_identical() {
        let (g, _) = super::helpers::detour();
        let q = QueryGraph::new(&g);
        let first  = DijkstraRouter.route(&q, NodeId(2), NodeId(1), Weight::Time).unwrap();
        let second = DijkstraRouter.route(&q, NodeId(2), NodeId(1), Weight::Time).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn virtual_nodes_split_edge_weights() {
        let (g, [a, b, c]) = super::helpers::abc();
        let edge = TieInConfig { mode: TieInMode::Edge, max_distance_m: None };
        // A quarter of the way along A–B, and halfway along B–C.
        let p1 = GeoPoint::new(a.lat, a.lon + (b.lon - a.lon) * 0.25);
        let p2 = GeoPoint::new(b.lat, b.lon + (c.lon - b.lon) * 0.5);

        let mut q = QueryGraph::new(&g);
        let t1 = tie_in(&g, p1, &edge).unwrap();
        let t2 = tie_in(&g, p2, &edge).unwrap();
        let v1 = q.place(&t1);
        let v2 = q.place(&t2);
        assert!(q.is_virtual(v1) && q.is_virtual(v2));
        assert_eq!(q.node_count(), g.node_count() + 2);
        assert_eq!(q.place(&t1), v1);

        let r = DijkstraRouter.route(&q, v1, v2, Weight::Distance).unwrap();
        // 0.75 × 10 km + 0.5 × 20 km
        assert!((r.distance_m - 17_500.0).abs() < 1e-6, "got {}", r.distance_m);
        // 0.75 × 720 s + 0.5 × 1800 s
        assert!((r.time_s - 1_440.0).abs() < 1e-6, "got {}", r.time_s);
    }

    #[test]
    fn two_virtual_nodes_on_one_edge() {
        let (g, [a, b, _]) = super::helpers::abc();
        let edge = TieInConfig { mode: TieInMode::Edge, max_distance_m: None };
        let at = |f: f64| GeoPoint::new(a.lat, a.lon + (b.lon - a.lon) * f);

        let mut q = QueryGraph::new(&g);
        let far  = q.place(&tie_in(&g, at(0.8), &edge).unwrap());
        let near = q.place(&tie_in(&g, at(0.2), &edge).unwrap());

        let r = DijkstraRouter.route(&q, near, far, Weight::Distance).unwrap();
        assert!((r.distance_m - 6_000.0).abs() < 1e-6, "got {}", r.distance_m);
        assert_eq!(r.nodes, vec![near, far]);
    }
}
