//! Static road networks and traces used by tests and benches.
//!
//! Coordinates are `x = longitude`, `y = latitude`. The grid spans four rows
//! and four columns of nodes, `0.001°` apart in both axes, around
//! `(4.890, 52.370)`. Node `r * 10 + c` sits in row `r`, column `c`.
//! Horizontal edges are numbered `1000 + r * 10 + c` and run east from
//! column `c`; vertical edges are numbered `2000 + r * 10 + c` and run north
//! from row `r`. Edge `1010` is one-way (eastbound).
//!
//! Apart from the grid sit a one-way ring, for walks that come back round,
//! and a pair of edges whose first bends through a right angle.

/// One edge of a fixture network, geometry in WKT.
#[derive(Clone, Copy, Debug)]
pub struct FixtureEdge {
    pub id: u64,
    pub source: u64,
    pub target: u64,
    pub oneway: bool,
    pub wkt: &'static str,
}

pub const GRID: &[FixtureEdge] = &[
    FixtureEdge {
        id: 1000,
        source: 0,
        target: 1,
        oneway: false,
        wkt: "LINESTRING(4.890000 52.370000, 4.891000 52.370000)",
    },
    FixtureEdge {
        id: 1001,
        source: 1,
        target: 2,
        oneway: false,
        wkt: "LINESTRING(4.891000 52.370000, 4.892000 52.370000)",
    },
    FixtureEdge {
        id: 1002,
        source: 2,
        target: 3,
        oneway: false,
        wkt: "LINESTRING(4.892000 52.370000, 4.893000 52.370000)",
    },
    FixtureEdge {
        id: 1010,
        source: 10,
        target: 11,
        oneway: true,
        wkt: "LINESTRING(4.890000 52.371000, 4.891000 52.371000)",
    },
    FixtureEdge {
        id: 1011,
        source: 11,
        target: 12,
        oneway: false,
        wkt: "LINESTRING(4.891000 52.371000, 4.892000 52.371000)",
    },
    FixtureEdge {
        id: 1012,
        source: 12,
        target: 13,
        oneway: false,
        wkt: "LINESTRING(4.892000 52.371000, 4.893000 52.371000)",
    },
    FixtureEdge {
        id: 1020,
        source: 20,
        target: 21,
        oneway: false,
        wkt: "LINESTRING(4.890000 52.372000, 4.891000 52.372000)",
    },
    FixtureEdge {
        id: 1021,
        source: 21,
        target: 22,
        oneway: false,
        wkt: "LINESTRING(4.891000 52.372000, 4.892000 52.372000)",
    },
    FixtureEdge {
        id: 1022,
        source: 22,
        target: 23,
        oneway: false,
        wkt: "LINESTRING(4.892000 52.372000, 4.893000 52.372000)",
    },
    FixtureEdge {
        id: 1030,
        source: 30,
        target: 31,
        oneway: false,
        wkt: "LINESTRING(4.890000 52.373000, 4.891000 52.373000)",
    },
    FixtureEdge {
        id: 1031,
        source: 31,
        target: 32,
        oneway: false,
        wkt: "LINESTRING(4.891000 52.373000, 4.892000 52.373000)",
    },
    FixtureEdge {
        id: 1032,
        source: 32,
        target: 33,
        oneway: false,
        wkt: "LINESTRING(4.892000 52.373000, 4.893000 52.373000)",
    },
    FixtureEdge {
        id: 2000,
        source: 0,
        target: 10,
        oneway: false,
        wkt: "LINESTRING(4.890000 52.370000, 4.890000 52.371000)",
    },
    FixtureEdge {
        id: 2001,
        source: 1,
        target: 11,
        oneway: false,
        wkt: "LINESTRING(4.891000 52.370000, 4.891000 52.371000)",
    },
    FixtureEdge {
        id: 2002,
        source: 2,
        target: 12,
        oneway: false,
        wkt: "LINESTRING(4.892000 52.370000, 4.892000 52.371000)",
    },
    FixtureEdge {
        id: 2003,
        source: 3,
        target: 13,
        oneway: false,
        wkt: "LINESTRING(4.893000 52.370000, 4.893000 52.371000)",
    },
    FixtureEdge {
        id: 2010,
        source: 10,
        target: 20,
        oneway: false,
        wkt: "LINESTRING(4.890000 52.371000, 4.890000 52.372000)",
    },
    FixtureEdge {
        id: 2011,
        source: 11,
        target: 21,
        oneway: false,
        wkt: "LINESTRING(4.891000 52.371000, 4.891000 52.372000)",
    },
    FixtureEdge {
        id: 2012,
        source: 12,
        target: 22,
        oneway: false,
        wkt: "LINESTRING(4.892000 52.371000, 4.892000 52.372000)",
    },
    FixtureEdge {
        id: 2013,
        source: 13,
        target: 23,
        oneway: false,
        wkt: "LINESTRING(4.893000 52.371000, 4.893000 52.372000)",
    },
    FixtureEdge {
        id: 2020,
        source: 20,
        target: 30,
        oneway: false,
        wkt: "LINESTRING(4.890000 52.372000, 4.890000 52.373000)",
    },
    FixtureEdge {
        id: 2021,
        source: 21,
        target: 31,
        oneway: false,
        wkt: "LINESTRING(4.891000 52.372000, 4.891000 52.373000)",
    },
    FixtureEdge {
        id: 2022,
        source: 22,
        target: 32,
        oneway: false,
        wkt: "LINESTRING(4.892000 52.372000, 4.892000 52.373000)",
    },
    FixtureEdge {
        id: 2023,
        source: 23,
        target: 33,
        oneway: false,
        wkt: "LINESTRING(4.893000 52.372000, 4.893000 52.373000)",
    },
];

/// A single edge roughly a kilometre north of the grid, unreachable from it.
pub const ISLAND: &[FixtureEdge] = &[FixtureEdge {
    id: 9000,
    source: 90,
    target: 91,
    oneway: false,
    wkt: "LINESTRING(4.890000 52.380000, 4.891000 52.380000)",
}];

/// Four one-way edges circling anticlockwise, east then north then west
/// then south, around a square `0.001°` on a side at `52.390°N`.
pub const RING: &[FixtureEdge] = &[
    FixtureEdge {
        id: 3000,
        source: 100,
        target: 101,
        oneway: true,
        wkt: "LINESTRING(4.890000 52.390000, 4.891000 52.390000)",
    },
    FixtureEdge {
        id: 3001,
        source: 101,
        target: 102,
        oneway: true,
        wkt: "LINESTRING(4.891000 52.390000, 4.891000 52.391000)",
    },
    FixtureEdge {
        id: 3002,
        source: 102,
        target: 103,
        oneway: true,
        wkt: "LINESTRING(4.891000 52.391000, 4.890000 52.391000)",
    },
    FixtureEdge {
        id: 3003,
        source: 103,
        target: 100,
        oneway: true,
        wkt: "LINESTRING(4.890000 52.391000, 4.890000 52.390000)",
    },
];

/// Edge `4000` runs east for `0.001°` then turns north for `0.001°`.
/// Edge `4001` carries on east from the corner's far end.
pub const BEND: &[FixtureEdge] = &[
    FixtureEdge {
        id: 4000,
        source: 200,
        target: 201,
        oneway: false,
        wkt: "LINESTRING(4.900000 52.370000, 4.901000 52.370000, 4.901000 52.371000)",
    },
    FixtureEdge {
        id: 4001,
        source: 201,
        target: 202,
        oneway: false,
        wkt: "LINESTRING(4.901000 52.371000, 4.902000 52.371000)",
    },
];

/// Eastbound along row 0, about five metres north of it, mid-edge to mid-edge.
pub const TRACE_EASTBOUND: &str =
    "LINESTRING(4.890500 52.370050, 4.891500 52.370050, 4.892500 52.370050)";

/// Eastbound along row 0, then north on column 3.
pub const TRACE_CORNER: &str =
    "LINESTRING(4.890500 52.370050, 4.892500 52.370050, 4.892950 52.370500)";

/// From row 0 of the grid to the island edge.
pub const TRACE_TO_ISLAND: &str = "LINESTRING(4.890500 52.370050, 4.890500 52.380050)";

/// Nowhere near any fixture edge.
pub const TRACE_DETACHED: &str = "LINESTRING(4.950000 52.400000, 4.951000 52.400000)";
