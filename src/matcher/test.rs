use crate::error::{MatchError, NetworkError};
use crate::graph::util::{HORIZONTAL, VERTICAL, grid};
use crate::graph::*;
use crate::matcher::*;
use crate::transition::{
    BearingRange, CostingStrategies, DefaultEmissionCost, DefaultTransitionCost, Direction,
};

use approx::assert_relative_eq;
use geo::{LineString, Point, point};
use petgraph::Direction as Adjacency;
use roadmatch_fixtures::{TRACE_CORNER, TRACE_DETACHED, TRACE_EASTBOUND, TRACE_TO_ISLAND};
use wkt::TryFromWkt;

/// Vertical offset, in metres, of the fixture traces from the grid rows.
const OFFSET: f64 = 5.559746;

fn trace(wkt: &str) -> LineString {
    LineString::<f64>::try_from_wkt_str(wkt).expect("fixture trace is valid")
}

fn traversals(result: &Match) -> Vec<Traversal> {
    result
        .links
        .iter()
        .map(|link| link.slice.traversal)
        .collect()
}

fn assert_contiguous(graph: &Graph, result: &Match) {
    for pair in result.links.windows(2) {
        let (before, after) = (pair[0].slice.traversal, pair[1].slice.traversal);
        let exit = graph.resolve(before.edge).expect("edge exists");
        let entry = graph.resolve(after.edge).expect("edge exists");

        assert_eq!(
            exit.destination(before.reversed),
            entry.origin(after.reversed)
        );
    }

    for link in &result.links {
        assert!(0.0 <= link.slice.start_fraction);
        assert!(link.slice.start_fraction <= link.slice.end_fraction);
        assert!(link.slice.end_fraction <= 1.0);
    }
}

/// Routes nothing, as if the routing service were down.
struct Unreachable<'a>(&'a Graph);

impl Scan for Unreachable<'_> {
    fn nearest_edges(&self, point: &Point, distance: f64) -> Result<Vec<&Edge>, NetworkError> {
        self.0.nearest_edges(point, distance)
    }
}

impl Route for Unreachable<'_> {
    fn shortest_path(
        &self,
        _: NodeId,
        _: NodeId,
        _: &dyn Weighting,
    ) -> Result<Option<Path>, NetworkError> {
        Err(NetworkError::Unavailable("routing offline".to_string()))
    }
}

impl Topology for Unreachable<'_> {
    fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.0.edge(id)
    }

    fn traversals(
        &self,
        node: NodeId,
        direction: Adjacency,
    ) -> Result<Vec<Traversal>, NetworkError> {
        self.0.traversals(node, direction)
    }
}

#[test_log::test]
fn matches_trace() -> Result<(), MatchError> {
    let graph = grid();
    let matcher = Matcher::new(&graph, MatchConfig::default())?;

    let result = matcher.match_line(&trace(TRACE_EASTBOUND), 25.0, &ShortestWeighting)?;

    assert_eq!(result.status, MatchStatus::Match);
    assert_eq!(
        traversals(&result),
        vec![
            Traversal::forward(1000),
            Traversal::forward(1001),
            Traversal::forward(1002)
        ]
    );
    assert_contiguous(&graph, &result);

    assert_relative_eq!(result.start_fraction, 0.5, epsilon = 1e-6);
    assert_relative_eq!(result.end_fraction, 0.5, epsilon = 1e-6);
    assert_relative_eq!(result.links[1].slice.start_fraction, 0.0);
    assert_relative_eq!(result.links[1].slice.end_fraction, 1.0);

    // The trace runs parallel to the row, a constant offset away.
    assert_relative_eq!(
        result.reliability,
        100.0 * (1.0 - OFFSET / 25.0),
        epsilon = 0.01
    );

    let start = result.geometry.0.first().expect("geometry is set");
    assert_relative_eq!(start.x, 4.8905, epsilon = 1e-9);
    assert_relative_eq!(start.y, 52.370, epsilon = 1e-9);
    assert_eq!(result.upstream, None);
    assert_eq!(result.downstream, None);

    Ok(())
}

#[test_log::test]
fn matches_corner() -> Result<(), MatchError> {
    let graph = grid();
    let matcher = Matcher::new(&graph, MatchConfig::default())?;

    let result = matcher.match_line(&trace(TRACE_CORNER), 25.0, &ShortestWeighting)?;

    assert_eq!(
        traversals(&result),
        vec![
            Traversal::forward(1000),
            Traversal::forward(1001),
            Traversal::forward(1002),
            Traversal::forward(2003)
        ]
    );
    assert_contiguous(&graph, &result);
    assert_relative_eq!(result.end_fraction, 0.5, epsilon = 1e-6);
    assert!(result.reliability > 0.0 && result.reliability < 100.0);

    Ok(())
}

#[test_log::test]
fn matches_point_sequence() -> Result<(), MatchError> {
    let graph = grid();
    let matcher = Matcher::new(&graph, MatchConfig::default())?;

    let observations = crate::transition::Observation::sequence(trace(TRACE_EASTBOUND).points());
    let result = matcher.match_sequence(&observations, 25.0, &ShortestWeighting)?;

    assert_eq!(result.status, MatchStatus::Match);
    assert_eq!(result.links.len(), 3);

    // Every point sits the same distance from its edge.
    let emission = (-0.5 * (OFFSET / 10.0).powi(2)).exp();
    assert_relative_eq!(result.reliability, 100.0 * emission, epsilon = 0.01);

    let sharper = Matcher::new(&graph, MatchConfig::default())?.with_costing(
        CostingStrategies::new(
            DefaultEmissionCost {
                sigma: 5.0,
                ..DefaultEmissionCost::default()
            },
            DefaultTransitionCost::default(),
        ),
    );
    let strict = sharper.match_sequence(&observations, 25.0, &ShortestWeighting)?;

    assert_eq!(traversals(&strict), traversals(&result));
    assert!(strict.reliability < result.reliability);

    Ok(())
}

#[test_log::test]
fn matches_single_coordinate() -> Result<(), MatchError> {
    let graph = grid();
    let matcher = Matcher::new(&graph, MatchConfig::default())?;
    let line = LineString::from(vec![(4.8905, 52.37005)]);

    let result = matcher.match_line(&line, 25.0, &ShortestWeighting)?;

    assert_eq!(traversals(&result), vec![Traversal::forward(1000)]);
    assert_relative_eq!(result.start_fraction, 0.5, epsilon = 1e-6);
    assert_relative_eq!(result.end_fraction, 0.5, epsilon = 1e-6);
    assert_eq!(result.geometry.0.len(), 2);
    assert_relative_eq!(
        result.reliability,
        100.0 * (1.0 - OFFSET / 25.0),
        epsilon = 0.01
    );

    Ok(())
}

#[test_log::test]
fn reports_no_match() -> Result<(), MatchError> {
    let graph = grid();
    let matcher = Matcher::new(&graph, MatchConfig::default())?;

    for wkt in [TRACE_DETACHED, TRACE_TO_ISLAND] {
        let result = matcher.match_line(&trace(wkt), 25.0, &ShortestWeighting)?;

        assert_eq!(result.status, MatchStatus::NoMatch);
        assert!(result.links.is_empty());
        assert_eq!(result.start_fraction, 0.0);
        assert_eq!(result.end_fraction, 0.0);
        assert_eq!(result.reliability, 0.0);
        assert_eq!(result.error, None);
    }

    let result = matcher.match_start_to_end(&trace(TRACE_DETACHED), 25.0, &ShortestWeighting)?;
    assert_eq!(result.status, MatchStatus::NoMatch);

    let result = matcher.match_start_to_end(&trace(TRACE_TO_ISLAND), 25.0, &ShortestWeighting)?;
    assert_eq!(result.status, MatchStatus::NoMatch);

    Ok(())
}

#[test_log::test]
fn rejects_invalid_input() {
    let graph = grid();
    let matcher = Matcher::new(&graph, MatchConfig::default()).expect("default config is valid");
    let line = trace(TRACE_EASTBOUND);

    assert!(matches!(
        matcher.match_line(&line, -1.0, &ShortestWeighting),
        Err(MatchError::InvalidInput(_))
    ));
    assert!(matches!(
        matcher.match_line(&LineString::new(vec![]), 25.0, &ShortestWeighting),
        Err(MatchError::InvalidInput(_))
    ));
    assert!(matches!(
        matcher.match_sequence(&[], 25.0, &ShortestWeighting),
        Err(MatchError::InvalidInput(_))
    ));
    assert!(matches!(
        matcher.match_start_to_end(&line, f64::NAN, &ShortestWeighting),
        Err(MatchError::InvalidInput(_))
    ));

    let config = MatchConfig::default().with_sigma(0.0);
    assert!(matches!(
        Matcher::new(&graph, config),
        Err(MatchError::InvalidInput(_))
    ));
}

#[test_log::test]
fn matching_is_deterministic() -> Result<(), MatchError> {
    let graph = grid();
    let matcher = Matcher::new(&graph, MatchConfig::default().with_downstream(80.0))?;
    let line = trace(TRACE_CORNER);

    let first = matcher.match_line(&line, 40.0, &ShortestWeighting)?;
    let second = matcher.match_line(&line, 40.0, &ShortestWeighting)?;
    assert_eq!(first, second);

    Ok(())
}

#[test_log::test]
fn matches_start_to_end() -> Result<(), MatchError> {
    let graph = grid();
    let matcher = Matcher::new(&graph, MatchConfig::default())?;
    let line = trace(TRACE_CORNER);

    let result = matcher.match_start_to_end(&line, 25.0, &ShortestWeighting)?;

    assert_eq!(result.status, MatchStatus::Match);
    assert_eq!(
        traversals(&result),
        vec![
            Traversal::forward(1000),
            Traversal::forward(1001),
            Traversal::forward(1002),
            Traversal::forward(2003)
        ]
    );
    assert_contiguous(&graph, &result);
    assert_relative_eq!(result.start_fraction, 0.5, epsilon = 1e-6);
    assert_relative_eq!(result.end_fraction, 0.5, epsilon = 1e-6);
    assert!(result.reliability > 50.0 && result.reliability < 100.0);

    Ok(())
}

#[test_log::test]
fn attaches_isochrones() -> Result<(), MatchError> {
    let graph = grid();
    let config = MatchConfig::default().with_upstream(50.0).with_downstream(50.0);
    let matcher = Matcher::new(&graph, config)?;

    let result = matcher.match_line(&trace(TRACE_EASTBOUND), 25.0, &ShortestWeighting)?;

    let upstream = result.upstream.as_ref().expect("upstream was requested");
    let upstream = upstream
        .iter()
        .map(|found| found.slice.traversal)
        .collect::<Vec<_>>();
    assert_eq!(
        upstream,
        vec![
            Traversal::forward(1000),
            Traversal::backward(1000),
            Traversal::backward(2000)
        ]
    );

    let downstream = result.downstream.as_ref().expect("downstream was requested");
    let onward = downstream
        .iter()
        .map(|found| found.slice.traversal)
        .collect::<Vec<_>>();
    assert_eq!(
        onward,
        vec![
            Traversal::forward(1002),
            Traversal::backward(1002),
            Traversal::forward(2003)
        ]
    );

    let north = &downstream[2];
    assert_relative_eq!(
        north.slice.end_fraction,
        (50.0 - 0.5 * HORIZONTAL) / VERTICAL,
        epsilon = 1e-6
    );
    assert!(downstream.iter().all(|found| found.distance <= 50.0 + 1e-9));

    Ok(())
}

#[test_log::test]
fn expands_accessibility() -> Result<(), MatchError> {
    let graph = grid();
    let matcher = Matcher::new(&graph, MatchConfig::default())?;
    let result = matcher.match_line(&trace(TRACE_EASTBOUND), 25.0, &ShortestWeighting)?;

    let reachable =
        matcher.expand_accessibility(&result, 200.0, Direction::Downstream, &ShortestWeighting)?;
    assert!(reachable.len() > 3);
    assert!(reachable.iter().all(|found| found.distance <= 200.0 + 1e-9));

    // Blocking the way north leaves only the row.
    let restricted = RestrictedWeighting::new(ShortestWeighting, |edge: &Edge, _| edge.id != 2003);
    let blocked = matcher.expand_accessibility(&result, 50.0, Direction::Downstream, &restricted)?;
    assert!(blocked.iter().all(|found| found.slice.traversal.edge != 2003));

    let nothing = matcher.expand_accessibility(
        &Match::no_match(),
        200.0,
        Direction::Upstream,
        &ShortestWeighting,
    )?;
    assert!(nothing.is_empty());

    assert!(matches!(
        matcher.expand_accessibility(&result, -5.0, Direction::Upstream, &ShortestWeighting),
        Err(MatchError::InvalidInput(_))
    ));

    Ok(())
}

#[test_log::test]
fn matches_single_point() -> Result<(), MatchError> {
    let graph = grid();
    let matcher = Matcher::new(&graph, MatchConfig::default())?;
    let point = point! { x: 4.8905, y: 52.37005 };

    let all = matcher.match_point(&PointQuery::new(point, 100.0), &ShortestWeighting)?;
    assert_eq!(all.status, MatchStatus::Match);

    let found = all
        .candidates
        .iter()
        .map(|candidate| candidate.traversal)
        .collect::<Vec<_>>();
    assert_eq!(
        found,
        vec![
            Traversal::forward(1000),
            Traversal::backward(1000),
            Traversal::forward(2001),
            Traversal::backward(2001),
        ]
    );
    assert_relative_eq!(all.candidates[1].fraction, 0.5, epsilon = 1e-6);
    assert_relative_eq!(all.candidates[0].point.y(), 52.370, epsilon = 1e-9);

    let reliable = matcher.match_point(
        &PointQuery::new(point, 100.0)
            .with_sort(MatchSort::HighestReliability)
            .with_filter(MatchFilter::Threshold(50.0)),
        &ShortestWeighting,
    )?;
    assert_eq!(reliable.candidates.len(), 2);
    assert!(reliable.candidates.iter().all(|c| c.reliability >= 50.0));
    assert!(reliable.candidates[0].reliability >= reliable.candidates[1].reliability);

    let first = matcher.match_point(
        &PointQuery::new(point, 100.0).with_filter(MatchFilter::First),
        &ShortestWeighting,
    )?;
    assert_eq!(first.candidates.len(), 1);

    let eastbound = matcher.match_point(
        &PointQuery::new(point, 100.0).with_direction(BearingRange::around(90.0, 20.0)),
        &ShortestWeighting,
    )?;
    // With the vertical edges filtered out, edge 1001 is left closest to node 1.
    let eastward = eastbound
        .candidates
        .iter()
        .map(|candidate| candidate.traversal)
        .collect::<Vec<_>>();
    assert_eq!(
        eastward,
        vec![Traversal::forward(1000), Traversal::forward(1001)]
    );

    let nowhere = matcher.match_point(
        &PointQuery::new(point! { x: 4.95, y: 52.40 }, 100.0),
        &ShortestWeighting,
    )?;
    assert_eq!(nowhere.status, MatchStatus::NoMatch);
    assert!(nowhere.candidates.is_empty());

    assert!(matches!(
        matcher.match_point(
            &PointQuery::new(point, 100.0).with_filter(MatchFilter::Threshold(150.0)),
            &ShortestWeighting,
        ),
        Err(MatchError::InvalidInput(_))
    ));

    Ok(())
}

#[test_log::test]
fn point_candidates_carry_isochrones() -> Result<(), MatchError> {
    let graph = grid();
    let matcher = Matcher::new(&graph, MatchConfig::default().with_downstream(20.0))?;
    let query = PointQuery::new(point! { x: 4.8905, y: 52.37005 }, 10.0);

    let result = matcher.match_point(&query, &ShortestWeighting)?;

    for candidate in &result.candidates {
        let downstream = candidate.downstream.as_ref().expect("downstream was requested");
        assert_eq!(downstream.len(), 1);
        assert_eq!(downstream[0].slice.traversal, candidate.traversal);
        assert_relative_eq!(downstream[0].distance, 20.0);
        assert_eq!(candidate.upstream, None);
    }

    Ok(())
}

#[test_log::test]
fn batches_keep_order_and_survive_failures() -> Result<(), MatchError> {
    let graph = grid();
    let matcher = Matcher::new(&graph, MatchConfig::default().with_progress_interval(1))?;

    let locations = vec![
        LineLocation::new("eastbound", trace(TRACE_EASTBOUND)),
        LineLocation::new("detached", trace(TRACE_DETACHED)),
        LineLocation::new("empty", LineString::new(vec![])),
        LineLocation::new("corner", trace(TRACE_CORNER)),
    ];

    let sequential = matcher
        .match_batch(
            locations.clone(),
            MatchMethod::Trace,
            25.0,
            &ShortestWeighting,
        )?
        .collect::<Vec<_>>();

    let statuses = sequential.iter().map(|m| m.status).collect::<Vec<_>>();
    assert_eq!(
        statuses,
        vec![
            MatchStatus::Match,
            MatchStatus::NoMatch,
            MatchStatus::Exception,
            MatchStatus::Match
        ]
    );

    let ids = sequential
        .iter()
        .map(|m| m.id.as_deref())
        .collect::<Vec<_>>();
    assert_eq!(
        ids,
        vec![
            Some("eastbound"),
            Some("detached"),
            Some("empty"),
            Some("corner")
        ]
    );
    assert!(sequential[2].error.is_some());

    let parallel =
        matcher.match_batch_par(&locations, MatchMethod::Trace, 25.0, &ShortestWeighting)?;
    assert_eq!(parallel, sequential);

    let ends = matcher
        .match_batch(locations, MatchMethod::StartToEnd, 25.0, &ShortestWeighting)?
        .map(|m| m.status)
        .collect::<Vec<_>>();
    assert_eq!(ends[0], MatchStatus::Match);
    assert_eq!(ends[1], MatchStatus::NoMatch);

    assert!(matches!(
        matcher.match_batch(Vec::new(), MatchMethod::Trace, -1.0, &ShortestWeighting),
        Err(MatchError::InvalidInput(_))
    ));

    Ok(())
}

#[test_log::test]
fn network_failures_become_exceptions() -> Result<(), MatchError> {
    let graph = grid();
    let network = Unreachable(&graph);
    let matcher = Matcher::new(&network, MatchConfig::default())?;

    let failed = matcher.match_line(&trace(TRACE_EASTBOUND), 25.0, &ShortestWeighting)?;
    assert_eq!(failed.status, MatchStatus::Exception);
    assert!(failed.links.is_empty());
    assert_eq!(failed.reliability, 0.0);
    assert!(
        failed
            .error
            .as_deref()
            .is_some_and(|error| error.contains("routing offline"))
    );

    // A single observation never needs a route.
    let single = LineString::from(vec![(4.8905, 52.37005)]);
    let still = matcher.match_line(&single, 25.0, &ShortestWeighting)?;
    assert_eq!(still.status, MatchStatus::Match);

    let batch = matcher
        .match_batch(
            vec![
                LineLocation::new("a", trace(TRACE_EASTBOUND)),
                LineLocation::new("b", trace(TRACE_DETACHED)),
            ],
            MatchMethod::Trace,
            25.0,
            &ShortestWeighting,
        )?
        .map(|m| m.status)
        .collect::<Vec<_>>();
    assert_eq!(batch, vec![MatchStatus::Exception, MatchStatus::NoMatch]);

    Ok(())
}

#[test_log::test]
fn configuration_round_trips_through_json() {
    let config = MatchConfig::default().with_beta(25.0).with_upstream(120.0);
    let json = serde_json::to_string(&config).expect("config serialises");
    let restored: MatchConfig = serde_json::from_str(&json).expect("config deserialises");
    assert_eq!(restored, config);

    let partial: MatchConfig =
        serde_json::from_str(r#"{ "sigma": 4.0 }"#).expect("defaults fill in");
    assert_eq!(partial.sigma, 4.0);
    assert_eq!(partial.max_candidates, MatchConfig::default().max_candidates);

    assert!(MatchConfig::default().with_max_candidates(0).validate().is_err());
    assert!(MatchConfig::default().with_upstream(-1.0).validate().is_err());
    assert!(MatchConfig::default().with_beta(f64::INFINITY).validate().is_err());
    assert!(MatchConfig::default().validate().is_ok());
}

#[test_log::test]
fn results_serialise_with_flattened_slices() -> Result<(), MatchError> {
    let graph = grid();
    let matcher = Matcher::new(&graph, MatchConfig::default())?;
    let result = matcher
        .match_line(&trace(TRACE_EASTBOUND), 25.0, &ShortestWeighting)?
        .with_id("trip-1");

    let json = serde_json::to_value(&result).expect("match serialises");
    assert_eq!(json["id"], "trip-1");
    assert_eq!(json["status"], "MATCH");
    assert_eq!(json["links"][0]["traversal"]["edge"], 1000);
    assert_eq!(json["links"][0]["traversal"]["reversed"], false);
    assert!(json["links"][0]["start_fraction"].is_number());

    assert_eq!(MatchStatus::NoMatch.to_string(), "NO_MATCH");
    assert_eq!(MatchStatus::Exception.as_ref(), "EXCEPTION");

    Ok(())
}
