//! Post-operation invariant tests using generated data, with petgraph as
//! the reference for path lengths and cycle presence.
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashMap;

use graphkit_bench::correctness;
use graphkit_bench::{GeneratorConfig, SizeTier, baseline, generate_graph};
use graphkit_core::{Constraints, Graph, NodeId, bellman_ford, bfs, cycles, dfs, dijkstra, kruskal};
use petgraph::algo;
use petgraph::graph::NodeIndex;
use proptest::prelude::*;

fn medium_graph() -> Graph {
    generate_graph(&SizeTier::Medium.config(42))
}

fn sample_nodes(graph: &Graph) -> Vec<NodeId> {
    let nodes: Vec<NodeId> = graph.nodes().collect();
    nodes.iter().step_by(37).copied().collect()
}

#[test]
fn explore_results_are_closed() {
    let graph = medium_graph();
    for start in sample_nodes(&graph) {
        for follow in [true, false] {
            let by_bfs = bfs::explore(&graph, start, follow).expect("member");
            correctness::check_explore_closed(&graph, start, &by_bfs, follow)
                .expect("bfs explore invariants hold");
            let by_dfs = dfs::explore(&graph, start, follow).expect("member");
            assert_eq!(by_bfs, by_dfs);
        }
    }
}

#[test]
fn search_paths_are_walkable() {
    let graph = generate_graph(
        &SizeTier::Medium
            .config(42)
            .with_constraints(Constraints::SIMPLE | Constraints::MIXED),
    );
    let nodes = sample_nodes(&graph);
    for &from in &nodes {
        for &to in &nodes {
            if let Some(path) = bfs::search(&graph, from, to, true).expect("members") {
                correctness::check_path(&graph, from, to, &path, true)
                    .expect("bfs path invariants hold");
            }
            if let Some(path) = dfs::search(&graph, from, to, false).expect("members") {
                correctness::check_path(&graph, from, to, &path, false)
                    .expect("dfs path invariants hold");
            }
        }
    }
}

#[test]
fn dijkstra_matches_petgraph_distances() {
    let graph = medium_graph();
    let reference = baseline::to_directed(&graph);
    for from in sample_nodes(&graph) {
        let start = reference.index_of(from).expect("converted");
        let distances: HashMap<NodeIndex, f64> =
            algo::dijkstra(&reference.graph, start, None, |e| *e.weight());
        for to in graph.nodes() {
            let path = dijkstra::execute(&graph, from, to).expect("non-negative weights");
            let expected = reference.index_of(to).and_then(|idx| distances.get(&idx));
            match (path, expected) {
                (Some(path), Some(&distance)) => {
                    correctness::check_path(&graph, from, to, &path, true)
                        .expect("dijkstra path invariants hold");
                    correctness::check_path_length(&path, distance)
                        .expect("dijkstra length matches petgraph");
                }
                (None, None) => {}
                (path, expected) => {
                    panic!("{from} -> {to}: got {path:?}, petgraph {expected:?}");
                }
            }
        }
    }
}

#[test]
fn bellman_ford_matches_petgraph_with_negative_edges() {
    let graph = generate_graph(&GeneratorConfig {
        negative_fraction: 0.25,
        ..SizeTier::Small.config(42)
    });
    let reference = baseline::to_directed(&graph);
    for from in graph.nodes() {
        let start = reference.index_of(from).expect("converted");
        let paths = algo::bellman_ford(&reference.graph, start).expect("no negative cycle");
        for to in graph.nodes() {
            let want = paths.distances[reference.index_of(to).expect("converted").index()];
            match bellman_ford::execute(&graph, from, to).expect("no negative cycle") {
                Some(path) => {
                    correctness::check_path(&graph, from, to, &path, true)
                        .expect("bellman-ford path invariants hold");
                    correctness::check_path_length(&path, want)
                        .expect("bellman-ford length matches petgraph");
                }
                None => assert!(want.is_infinite(), "{from} -> {to} should be unreachable"),
            }
        }
    }
}

#[test]
fn kruskal_produces_spanning_forest() {
    for constraints in [
        Constraints::SIMPLE | Constraints::UNDIRECTED | Constraints::WEIGHTED,
        Constraints::MULTIGRAPH | Constraints::MIXED | Constraints::WEIGHTED,
    ] {
        let graph = generate_graph(&SizeTier::Medium.config(42).with_constraints(constraints));
        let forest = kruskal::execute(&graph).expect("forest");
        correctness::check_spanning_forest(&graph, &forest).expect("forest invariants hold");

        let reference = baseline::to_undirected(&graph);
        let expected: f64 = algo::min_spanning_tree(&reference.graph)
            .filter_map(|element| match element {
                petgraph::data::Element::Edge { weight, .. } => Some(weight),
                petgraph::data::Element::Node { .. } => None,
            })
            .sum();
        assert!((kruskal::total_weight(&forest) - expected).abs() < 1e-9);
    }
}

#[test]
fn found_cycles_are_valid() {
    for seed in [42, 123, 999] {
        let graph = generate_graph(&GeneratorConfig {
            inject_cycles: true,
            ..SizeTier::Medium.config(seed)
        });
        let cycle = cycles::find_cycle(&graph)
            .expect("consistent")
            .expect("cycles were injected");
        correctness::check_cycle(&graph, &cycle).expect("cycle invariants hold");
        assert!(algo::is_cyclic_directed(&baseline::to_directed(&graph).graph));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Cycle presence in directed-only graphs agrees with petgraph for any
    /// seed, with or without injected back edges.
    #[test]
    fn directed_cycle_presence_matches_petgraph(seed in any::<u64>(), inject in any::<bool>()) {
        let graph = generate_graph(&GeneratorConfig {
            inject_cycles: inject,
            ..SizeTier::Small.config(seed)
        });
        let found = cycles::find_cycle(&graph).expect("consistent");
        if let Some(cycle) = &found {
            prop_assert!(correctness::check_cycle(&graph, cycle).is_ok());
        }
        prop_assert_eq!(found.is_some(), inject);
        prop_assert_eq!(
            found.is_some(),
            algo::is_cyclic_directed(&baseline::to_directed(&graph).graph)
        );
    }

    /// Every generated graph, whatever its constraints, passes the container
    /// invariants and yields a valid spanning forest.
    #[test]
    fn generated_graphs_hold_invariants(
        seed in any::<u64>(),
        mixed in any::<bool>(),
        multigraph in any::<bool>(),
    ) {
        let kind = if multigraph { Constraints::MULTIGRAPH } else { Constraints::SIMPLE };
        let edges = if mixed { Constraints::MIXED } else { Constraints::UNDIRECTED };
        let graph = generate_graph(
            &SizeTier::Small.config(seed).with_constraints(kind | edges | Constraints::WEIGHTED),
        );
        prop_assert!(correctness::check_graph_invariants(&graph).is_ok());
        let forest = kruskal::execute(&graph).expect("forest");
        prop_assert!(correctness::check_spanning_forest(&graph, &forest).is_ok());
    }
}
