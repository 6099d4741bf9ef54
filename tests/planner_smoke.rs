use std::thread;

use tour_planner::graph::{Edge, Graph, Node, NodeId};
use tour_planner::matrix::{MatrixOptions, build_matrix};
use tour_planner::shortest_path::{PathCost, shortest_path, shortest_path_cost};
use tour_planner::{Completion, InvalidInput, Planner, PlannerConfig, PoiSet, RoutingError};

/// Small town: a two-way main street 1-2-3-4 (60 s per block), a one-way
/// bypass 4 -> 5 -> 1 (45 s per hop), and node 6 with no roads.
fn town() -> Graph {
    let nodes = vec![
        Node::new(1, 36.100, -115.170),
        Node::new(2, 36.100, -115.160),
        Node::new(3, 36.100, -115.150),
        Node::new(4, 36.100, -115.140),
        Node::new(5, 36.110, -115.155),
        Node::new(6, 36.200, -115.300),
    ];
    let mut edges = Vec::new();
    for id in 1..4 {
        edges.push(Edge::new(id, id + 1, 60.0));
        edges.push(Edge::new(id + 1, id, 60.0));
    }
    edges.push(Edge::new(4, 5, 45.0));
    edges.push(Edge::new(5, 1, 45.0));
    Graph::new(nodes, edges).expect("valid graph")
}

fn ids(raw: &[u64]) -> Vec<NodeId> {
    raw.iter().map(|&id| NodeId(id)).collect()
}

#[test]
fn bypass_makes_return_trip_cheaper() {
    let graph = town();
    assert_eq!(shortest_path_cost(&graph, NodeId(1), NodeId(4)), PathCost::Reachable(180.0));
    assert_eq!(shortest_path_cost(&graph, NodeId(4), NodeId(1)), PathCost::Reachable(90.0));
    assert_eq!(shortest_path(&graph, NodeId(4), NodeId(1)), ids(&[4, 5, 1]));
}

#[test]
fn plans_round_trip_over_town() {
    let graph = town();
    let pois = PoiSet::new(ids(&[1, 3, 4, 2])).expect("valid pois");
    let plan = Planner::default().plan_nodes(&graph, pois).expect("plan");

    // Out along the main street, back over the bypass.
    assert_eq!(plan.total_cost(), 270.0);
    assert_eq!(plan.stop_nodes(), ids(&[1, 2, 3, 4, 1]));
    assert_eq!(plan.completion, Completion::Complete);
}

#[test]
fn single_point_is_invalid_input() {
    let graph = town();
    let err = Planner::default()
        .plan_locations(&graph, &[(36.1, -115.17)])
        .unwrap_err();
    assert_eq!(err, RoutingError::from(InvalidInput::TooFewPoints { count: 1 }));
}

#[test]
fn duplicate_point_rejected_before_matrix() {
    let err = PoiSet::new(ids(&[1, 2, 1])).unwrap_err();
    assert_eq!(err, RoutingError::from(InvalidInput::DuplicatePoint { node: NodeId(1) }));
}

#[test]
fn negative_edge_is_invalid_input() {
    let err = Graph::new(
        vec![Node::new(1, 0.0, 0.0), Node::new(2, 0.0, 0.0)],
        vec![Edge::new(1, 2, -5.0)],
    )
    .unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn negative_unreachable_cost_rejected_before_routing() {
    // One-way ring 1 -> 2 -> 3 -> 1 plus an island at 4.
    let graph = Graph::new(
        (1..=4).map(|id| Node::new(id, 36.1, -115.17 + id as f64 * 0.01)).collect(),
        vec![
            Edge::new(1, 2, 100.0),
            Edge::new(2, 3, 100.0),
            Edge::new(3, 1, 100.0),
        ],
    )
    .expect("valid graph");
    let planner = Planner::new(PlannerConfig {
        unreachable_cost: -500.0,
        ..PlannerConfig::default()
    });
    let pois = PoiSet::new(ids(&[1, 2, 3, 4])).expect("valid pois");

    let err = planner.plan_nodes(&graph, pois).unwrap_err();
    assert_eq!(
        err,
        RoutingError::from(InvalidInput::UnreachableCost { cost: -500.0 })
    );
}

#[test]
fn isolated_poi_gets_sentinel_row_and_column() {
    let graph = town();
    let pois = PoiSet::new(ids(&[1, 6, 3])).expect("valid pois");
    let options = MatrixOptions {
        unreachable_cost: 10_000.0,
        ..MatrixOptions::default()
    };
    let build = build_matrix(&graph, &pois, &options).expect("matrix");

    assert_eq!(build.matrix.row(1), &[10_000.0, 0.0, 10_000.0]);
    assert_eq!(build.matrix.get(0, 1), 10_000.0);
    assert_eq!(build.matrix.get(2, 1), 10_000.0);
    assert_eq!(build.unreachable_pairs, 4);
}

#[test]
fn shared_graph_serves_concurrent_requests() {
    let graph = town();
    let planner = Planner::default();
    let requests = [ids(&[1, 3, 4, 2]), ids(&[4, 2]), ids(&[2, 5, 3])];

    let costs: Vec<f64> = thread::scope(|scope| {
        let handles: Vec<_> = requests
            .iter()
            .map(|nodes| {
                let (graph, planner) = (&graph, &planner);
                scope.spawn(move || {
                    let pois = PoiSet::new(nodes.clone()).expect("valid pois");
                    planner.plan_nodes(graph, pois).expect("plan").total_cost()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("thread finished"))
            .collect()
    });

    assert_eq!(costs[0], 270.0);
    // 4 -> 3 -> 2 and back along the main street.
    assert_eq!(costs[1], 240.0);
    assert!(costs[2] > 0.0);
}
