//! Unit tests for rte-io.

#[cfg(test)]
mod csv_loader {
    use std::io::Cursor;

    use rte_core::GeoPoint;

    use crate::{load_points_reader, load_segments_reader, IoError};

    #[test]
    fn segments_full_columns() {
        let data = "\
from_lat,from_lon,to_lat,to_lon,length_m,speed_kmh,oneway
8.48,-13.23,8.48,-13.22,10000,50,no
8.48,-13.22,8.48,-13.21,20000,40,yes
";
        let segs = load_segments_reader(Cursor::new(data)).unwrap();
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].from, GeoPoint::new(8.48, -13.23));
        assert_eq!(segs[0].length_m, 10_000.0);
        assert_eq!(segs[0].speed_kmh, Some(50.0));
        assert!(!segs[0].oneway);
        assert!(segs[1].oneway);
    }

    #[test]
    fn empty_optional_cells() {
        let data = "\
from_lat,from_lon,to_lat,to_lon,length_m,speed_kmh,oneway
0.0,0.0,0.0,0.01,,,
";
        let segs = load_segments_reader(Cursor::new(data)).unwrap();
        let expected = GeoPoint::new(0.0, 0.0).distance_m(GeoPoint::new(0.0, 0.01));
        assert!((segs[0].length_m - expected).abs() < 1e-9);
        assert_eq!(segs[0].speed_kmh, None);
        assert!(!segs[0].oneway);
    }

    #[test]
    fn optional_columns_may_be_absent() {
        let data = "from_lat,from_lon,to_lat,to_lon\n0.0,0.0,0.0,0.01\n";
        let segs = load_segments_reader(Cursor::new(data)).unwrap();
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].speed_kmh, None);
    }

    #[test]
    fn reverse_oneway_swaps_endpoints() {
        let data = "\
from_lat,from_lon,to_lat,to_lon,length_m,speed_kmh,oneway
1.0,2.0,3.0,4.0,500,30,-1
";
        let segs = load_segments_reader(Cursor::new(data)).unwrap();
        assert_eq!(segs[0].from, GeoPoint::new(3.0, 4.0));
        assert_eq!(segs[0].to, GeoPoint::new(1.0, 2.0));
        assert!(segs[0].oneway);
    }

    #[test]
    fn bad_oneway_is_parse_error() {
        let data = "\
from_lat,from_lon,to_lat,to_lon,length_m,speed_kmh,oneway
1.0,2.0,3.0,4.0,500,30,sometimes
";
        let err = load_segments_reader(Cursor::new(data)).unwrap_err();
        assert!(matches!(err, IoError::Parse(msg) if msg.contains("row 1")));
    }

    #[test]
    fn non_numeric_coordinate_is_csv_error() {
        let data = "from_lat,from_lon,to_lat,to_lon\nabc,0.0,0.0,0.01\n";
        assert!(matches!(load_segments_reader(Cursor::new(data)), Err(IoError::Csv(_))));
    }

    #[test]
    fn points_load_in_order() {
        let data = "id,lat,lon\nstation-1,8.484,-13.234\n7,8.470,-13.220\n";
        let pts = load_points_reader(Cursor::new(data)).unwrap();
        assert_eq!(pts.len(), 2);
        assert_eq!(pts[0].id, "station-1");
        assert_eq!(pts[1].id, "7");
        assert_eq!(pts[1].pos, GeoPoint::new(8.470, -13.220));
    }

    #[test]
    fn out_of_range_point_rejected() {
        let data = "id,lat,lon\nbad,95.0,0.0\n";
        assert!(matches!(load_points_reader(Cursor::new(data)), Err(IoError::Parse(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = crate::load_points_csv(std::path::Path::new("/nonexistent/points.csv")).unwrap_err();
        assert!(matches!(err, IoError::Io(_)));
    }
}

// ── GeoJSON ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod geojson_loader {
    use std::io::Cursor;

    use rte_core::{polyline_length_m, GeoPoint};

    use crate::{load_points_geojson_reader, load_roads_geojson_reader, IoError};

    const ROADS: &str = r#"{
      "type": "FeatureCollection",
      "features": [
        { "type": "Feature",
          "properties": { "speed_kmph": 40, "oneway": "yes" },
          "geometry": { "type": "LineString",
                        "coordinates": [[-13.23, 8.48], [-13.225, 8.481], [-13.22, 8.48]] } },
        { "type": "Feature",
          "properties": { "speed_kmh": "30", "length_m": 900 },
          "geometry": { "type": "MultiLineString",
                        "coordinates": [[[0.0, 0.0], [0.01, 0.0]],
                                        [[0.02, 0.0], [0.04, 0.0]]] } },
        { "type": "Feature",
          "properties": { "speed_kmph": null },
          "geometry": { "type": "LineString", "coordinates": [[1.0, 1.0], [1.0, 1.01]] } },
        { "type": "Feature",
          "properties": {},
          "geometry": { "type": "Point", "coordinates": [0.0, 0.0] } }
      ]
    }"#;

    #[test]
    fn line_features_become_segments() {
        let segs = load_roads_geojson_reader(Cursor::new(ROADS)).unwrap();
        // 1 LineString + 2 MultiLineString parts + 1 LineString; the Point is skipped.
        assert_eq!(segs.len(), 4);

        let first = &segs[0];
        assert_eq!(first.from, GeoPoint::new(8.48, -13.23));
        assert_eq!(first.to, GeoPoint::new(8.48, -13.22));
        assert_eq!(first.speed_kmh, Some(40.0));
        assert!(first.oneway);
        let poly = [
            GeoPoint::new(8.48, -13.23),
            GeoPoint::new(8.481, -13.225),
            GeoPoint::new(8.48, -13.22),
        ];
        assert!((first.length_m - polyline_length_m(&poly)).abs() < 1e-9);
        assert!(first.length_m > first.from.distance_m(first.to));
    }

    #[test]
    fn multiline_length_split_by_share() {
        let segs = load_roads_geojson_reader(Cursor::new(ROADS)).unwrap();
        let (a, b) = (&segs[1], &segs[2]);
        assert_eq!(a.speed_kmh, Some(30.0));
        // The second part is twice as long as the first.
        assert!((a.length_m - 300.0).abs() < 1e-6);
        assert!((b.length_m - 600.0).abs() < 1e-6);
        assert!(!a.oneway);
    }

    #[test]
    fn null_speed_is_absent() {
        let segs = load_roads_geojson_reader(Cursor::new(ROADS)).unwrap();
        assert_eq!(segs[3].speed_kmh, None);
    }

    #[test]
    fn degenerate_multiline_is_skipped() {
        let data = r#"{
          "type": "FeatureCollection",
          "features": [
            { "type": "Feature", "properties": {},
              "geometry": { "type": "MultiLineString",
                            "coordinates": [[[0.0, 0.0]], [[0.01, 0.0]]] } },
            { "type": "Feature", "properties": {},
              "geometry": { "type": "LineString", "coordinates": [[1.0, 1.0], [1.0, 1.01]] } }
          ]
        }"#;
        let segs = load_roads_geojson_reader(Cursor::new(data)).unwrap();
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].from, GeoPoint::new(1.0, 1.0));
    }

    #[test]
    fn point_ids_fall_back_in_order() {
        let data = r#"{
          "type": "FeatureCollection",
          "features": [
            { "type": "Feature", "id": "fs-1", "properties": { "id": "ignored" },
              "geometry": { "type": "Point", "coordinates": [-13.23, 8.48] } },
            { "type": "Feature", "id": 42, "properties": null,
              "geometry": { "type": "Point", "coordinates": [-13.22, 8.47] } },
            { "type": "Feature", "properties": { "id": "dp-3" },
              "geometry": { "type": "Point", "coordinates": [-13.21, 8.46] } },
            { "type": "Feature", "properties": {},
              "geometry": { "type": "Point", "coordinates": [-13.20, 8.45] } }
          ]
        }"#;
        let pts = load_points_geojson_reader(Cursor::new(data)).unwrap();
        let ids: Vec<&str> = pts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["fs-1", "42", "dp-3", "3"]);
        assert_eq!(pts[0].pos, GeoPoint::new(8.48, -13.23));
    }

    #[test]
    fn bare_geometry_rejected() {
        let data = r#"{ "type": "Point", "coordinates": [0.0, 0.0] }"#;
        assert!(matches!(load_points_geojson_reader(Cursor::new(data)), Err(IoError::Parse(_))));
    }

    #[test]
    fn malformed_json_is_geojson_error() {
        assert!(matches!(
            load_roads_geojson_reader(Cursor::new("{ not json")),
            Err(IoError::GeoJson(_))
        ));
    }
}

// ── Result writers ────────────────────────────────────────────────────────────

#[cfg(test)]
mod helpers {
    use rte_core::{EstimatorConfig, GeoPoint, Point, RoadSegment};
    use rte_estimate::{Estimator, ResultSink};

    /// A→C routable (30 km, 42 min) and A→island unreachable.
    pub fn run_into<S: ResultSink>(sink: &mut S) {
        let a = GeoPoint::new(8.480, -13.230);
        let b = GeoPoint::new(8.480, -13.220);
        let c = GeoPoint::new(8.480, -13.210);
        let d = GeoPoint::new(8.600, -13.100);
        let e = GeoPoint::new(8.600, -13.090);
        let segments = [
            RoadSegment::new(a, b, 10_000.0).with_speed(50.0),
            RoadSegment::new(b, c, 20_000.0).with_speed(40.0),
            RoadSegment::new(d, e, 1_000.0),
        ];
        let est = Estimator::new(&segments, EstimatorConfig::default()).unwrap();
        est.run_batch_into(
            &[Point::new("fs-1", a)],
            &[Point::new("dp-1", c), Point::new("dp-2", d)],
            sink,
        );
    }
}

#[cfg(test)]
mod csv_writer {
    use tempfile::TempDir;

    use super::helpers::run_into;
    use crate::{CsvResultWriter, ResultWriter, Units, WriterSink};
    use rte_core::{DistanceUnit, TimeUnit};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn headers_carry_units() {
        let dir = tmp();
        let path = dir.path().join("results.csv");
        let mut w = CsvResultWriter::new(&path, Units::new(DistanceUnit::Miles, TimeUnit::Hours)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers,
            [
                "origin_id",
                "destination_id",
                "routable",
                "shortest_distance_mi",
                "fastest_time_h",
                "shortest_path_time_h",
                "fastest_path_distance_mi",
                "failure",
            ]
        );
    }

    #[test]
    fn batch_rows_written_with_empty_unreachable_cells() {
        let dir = tmp();
        let path = dir.path().join("results.csv");
        let writer = CsvResultWriter::new(&path, Units::default()).unwrap();
        let mut sink = WriterSink::new(writer);
        run_into(&mut sink);
        assert!(sink.take_error().is_none());
        assert_eq!(sink.written(), 2);

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);

        assert_eq!(&rows[0][0], "fs-1");
        assert_eq!(&rows[0][1], "dp-1");
        assert_eq!(&rows[0][2], "true");
        assert_eq!(rows[0][3].parse::<f64>().unwrap(), 30.0);
        assert_eq!(rows[0][4].parse::<f64>().unwrap(), 42.0);
        assert_eq!(&rows[0][7], "");

        assert_eq!(&rows[1][1], "dp-2");
        assert_eq!(&rows[1][2], "false");
        for col in 3..7 {
            assert_eq!(&rows[1][col], "", "column {col} should be empty");
        }
        assert_eq!(&rows[1][7], "unreachable");
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let mut w = CsvResultWriter::new(&dir.path().join("r.csv"), Units::default()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

#[cfg(test)]
mod sink {
    use rte_estimate::{BatchSummary, ResultSink};

    use super::helpers::run_into;
    use crate::{IoError, IoResult, ResultRow, ResultWriter, WriterSink};

    #[derive(Default)]
    struct Failing {
        calls:    usize,
        finished: bool,
    }

    impl ResultWriter for Failing {
        fn write_rows(&mut self, _rows: &[ResultRow]) -> IoResult<()> {
            self.calls += 1;
            Err(IoError::Parse(format!("write {}", self.calls)))
        }

        fn finish(&mut self) -> IoResult<()> {
            self.finished = true;
            Ok(())
        }
    }

    #[test]
    fn first_error_is_kept() {
        let mut sink = WriterSink::new(Failing::default());
        run_into(&mut sink);
        sink.on_result(rte_estimate::RouteResult {
            origin:      "x".into(),
            destination: "y".into(),
            outcome:     Err(rte_estimate::RouteFailure::Unreachable),
        });
        sink.on_batch_end(&BatchSummary::default());

        let err = sink.take_error().unwrap();
        assert!(matches!(err, IoError::Parse(m) if m == "write 1"));
        assert!(sink.take_error().is_none());
        // Both flushes failed, so nothing counts as persisted.
        assert_eq!(sink.written(), 0);
        let writer = sink.into_writer();
        assert_eq!(writer.calls, 2);
        assert!(writer.finished);
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_writer {
    use tempfile::TempDir;

    use super::helpers::run_into;
    use crate::{SqliteResultWriter, Units, WriterSink};

    #[test]
    fn route_results_table_matches_csv_columns() {
        let dir: TempDir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("results.db");
        let mut sink = WriterSink::new(SqliteResultWriter::new(&path, Units::default()).unwrap());
        run_into(&mut sink);
        assert!(sink.take_error().is_none());
        drop(sink);

        let conn = rusqlite::Connection::open(&path).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM route_results", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 2);

        let (km, failure): (Option<f64>, Option<String>) = conn
            .query_row(
                "SELECT shortest_distance_km, failure FROM route_results WHERE destination_id = 'dp-1'",
                [],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .unwrap();
        assert_eq!(km, Some(30.0));
        assert_eq!(failure, None);

        let (km, failure): (Option<f64>, Option<String>) = conn
            .query_row(
                "SELECT shortest_distance_km, failure FROM route_results WHERE destination_id = 'dp-2'",
                [],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .unwrap();
        assert_eq!(km, None);
        assert_eq!(failure.as_deref(), Some("unreachable"));
    }
}
