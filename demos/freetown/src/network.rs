//! Synthetic Freetown, Sierra Leone road network.
//!
//! Eleven junctions along the main east–west corridor and the hill roads,
//! plus a short road on Banana Island that is not connected to the
//! mainland.  Lengths are road lengths, not straight-line distances.

use rte_core::{GeoPoint, RoadSegment};

pub const CLINE_TOWN:      GeoPoint = GeoPoint { lat: 8.4900, lon: -13.2130 };
pub const KISSY:           GeoPoint = GeoPoint { lat: 8.4790, lon: -13.1870 };
pub const EASTERN_POLICE:  GeoPoint = GeoPoint { lat: 8.4850, lon: -13.2220 };
pub const PZ:              GeoPoint = GeoPoint { lat: 8.4870, lon: -13.2330 };
pub const COTTON_TREE:     GeoPoint = GeoPoint { lat: 8.4840, lon: -13.2340 };
pub const CONGO_CROSS:     GeoPoint = GeoPoint { lat: 8.4760, lon: -13.2560 };
pub const WILBERFORCE:     GeoPoint = GeoPoint { lat: 8.4700, lon: -13.2500 };
pub const MURRAY_TOWN:     GeoPoint = GeoPoint { lat: 8.4830, lon: -13.2700 };
pub const LUMLEY:          GeoPoint = GeoPoint { lat: 8.4530, lon: -13.2760 };
pub const HILL_STATION:    GeoPoint = GeoPoint { lat: 8.4580, lon: -13.2420 };
pub const REGENT:          GeoPoint = GeoPoint { lat: 8.4380, lon: -13.2170 };

pub const BANANA_NORTH:    GeoPoint = GeoPoint { lat: 8.1230, lon: -13.2130 };
pub const BANANA_SOUTH:    GeoPoint = GeoPoint { lat: 8.1050, lon: -13.2010 };

/// All road segments.  Speeds are typical urban averages; the hill roads
/// are slow, Wilkinson Road and the Lumley bypass are fast.
pub fn segments() -> Vec<RoadSegment> {
    let two_way = |a, b, len: f64, kmh: f64| RoadSegment::new(a, b, len).with_speed(kmh);

    vec![
        // East–west corridor.
        two_way(KISSY,          CLINE_TOWN,      3_400.0, 25.0),
        two_way(CLINE_TOWN,     EASTERN_POLICE,  1_300.0, 20.0),
        two_way(EASTERN_POLICE, PZ,              1_300.0, 15.0),
        two_way(PZ,             COTTON_TREE,       400.0, 15.0),
        two_way(COTTON_TREE,    CONGO_CROSS,     2_700.0, 25.0),
        two_way(CONGO_CROSS,    MURRAY_TOWN,     1_700.0, 30.0),
        // Wilkinson Road and the Lumley bypass.
        two_way(CONGO_CROSS,    WILBERFORCE,       900.0, 30.0),
        two_way(WILBERFORCE,    LUMLEY,          3_300.0, 45.0),
        two_way(MURRAY_TOWN,    LUMLEY,          3_600.0, 40.0),
        // Hill roads: shorter, slower.
        two_way(WILBERFORCE,    HILL_STATION,      900.0, 20.0),
        two_way(HILL_STATION,   REGENT,          3_500.0, 20.0),
        two_way(REGENT,         KISSY,           5_500.0, 25.0),
        // One-way spur down from Hill Station to the centre.
        RoadSegment::new(HILL_STATION, COTTON_TREE, 3_200.0).with_speed(25.0).one_way(),
        // Banana Island, unreachable from the mainland.
        RoadSegment::between(BANANA_NORTH, BANANA_SOUTH),
    ]
}
