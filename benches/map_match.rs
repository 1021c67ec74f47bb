use criterion::criterion_main;
use geo::LineString;
use roadmatch::graph::{Access, Graph, GraphBuilder, ShortestWeighting};
use roadmatch::matcher::{MatchConfig, MatchStatus, Matcher};
use roadmatch_fixtures::{GRID, ISLAND, TRACE_CORNER, TRACE_EASTBOUND};
use wkt::TryFromWkt;

struct MapMatchScenario {
    name: &'static str,
    input_linestring: &'static str,
    expected_links: usize,
}

const MATCH_CASES: [MapMatchScenario; 2] = [
    MapMatchScenario {
        name: "EASTBOUND",
        input_linestring: TRACE_EASTBOUND,
        expected_links: 3,
    },
    MapMatchScenario {
        name: "CORNER",
        input_linestring: TRACE_CORNER,
        expected_links: 4,
    },
];

fn fixture_graph() -> Graph {
    let mut builder = GraphBuilder::default();

    for edge in GRID.iter().chain(ISLAND) {
        let geometry = LineString::<f64>::try_from_wkt_str(edge.wkt)
            .expect("Fixture geometry must parse successfully.");
        let access = match edge.oneway {
            true => Access::FORWARD,
            false => Access::BOTH,
        };

        builder.insert(edge.id, edge.source, edge.target, geometry, access);
    }

    builder.build().expect("Graph must be created")
}

fn target_benchmark(c: &mut criterion::Criterion) {
    let mut group = c.benchmark_group("match");
    group.significance_level(0.1).sample_size(30);

    let graph = fixture_graph();
    let matcher = Matcher::new(&graph, MatchConfig::default()).expect("Config must be valid");

    MATCH_CASES.into_iter().for_each(|sc| {
        let coordinates: LineString<f64> = LineString::try_from_wkt_str(sc.input_linestring)
            .expect("Linestring must parse successfully.");

        group.bench_function(format!("line: {}", sc.name), |b| {
            b.iter(|| {
                let result = matcher
                    .match_line(&coordinates, 25.0, &ShortestWeighting)
                    .expect("Match must complete successfully");

                assert_eq!(result.status, MatchStatus::Match);
                assert_eq!(result.links.len(), sc.expected_links);
            })
        });

        group.bench_function(format!("start-to-end: {}", sc.name), |b| {
            b.iter(|| {
                let result = matcher
                    .match_start_to_end(&coordinates, 25.0, &ShortestWeighting)
                    .expect("Match must complete successfully");

                assert_eq!(result.status, MatchStatus::Match);
            })
        });
    });

    group.finish();
}

criterion::criterion_group!(targeted_benches, target_benchmark);
criterion_main!(targeted_benches);
