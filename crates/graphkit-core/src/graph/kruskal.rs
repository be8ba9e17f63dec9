//! Kruskal's minimum spanning forest.
//!
//! Only the lightest edge of each endpoint pair can belong to a minimum
//! spanning forest, so one representative per group is considered.
//! Representatives are taken in ascending weight order (ties keep group
//! order) and kept when they join two different [`UnionFind`] sets.
//! Self-edges never join two sets and are skipped outright.
//!
//! Direction is ignored for connectivity; kept edges retain their original
//! direction, id and weight.
use crate::error::GraphError;
use crate::graph::Graph;
use crate::structures::Edge;
use crate::union_find::UnionFind;

/// Builds a minimum spanning forest of `graph`: a new graph with the same
/// constraints and nodes, and one tree per connected component.
///
/// # Errors
///
/// Propagates a [`GraphError`] if the forest refuses an edge; this does not
/// happen for a forest built from a consistent graph.
pub fn execute(graph: &Graph) -> Result<Graph, GraphError> {
    let mut forest = Graph::with_nodes(graph.constraints(), graph.nodes());
    let mut components = UnionFind::new(graph.nodes());

    let mut candidates: Vec<Edge> = graph
        .edges()
        .keys()
        .filter(|key| !key.is_loop())
        .filter_map(|key| {
            graph
                .group(key)
                .into_iter()
                .min_by(|a, b| a.numeric_weight().total_cmp(&b.numeric_weight()))
                .copied()
        })
        .collect();
    candidates.sort_by(|a, b| a.numeric_weight().total_cmp(&b.numeric_weight()));

    for edge in candidates {
        if components.union(&edge.first(), &edge.second()) {
            forest.try_add_edge(edge)?;
        }
    }
    tracing::trace!(
        nodes = forest.node_count(),
        edges = forest.edge_count(),
        trees = components.set_count(),
        "spanning forest built"
    );
    Ok(forest)
}

/// Sum of the numeric weights of every edge in `graph`.
pub fn total_weight(graph: &Graph) -> f64 {
    graph.iter_edges().map(Edge::numeric_weight).sum()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::constraints::Constraints;
    use crate::graph::bfs;
    use crate::test_helpers::{
        assert_close, e, graph_with, n, undirected, weighted_edges, weighted_k5,
    };

    #[test]
    fn test_kruskal_on_tree_returns_equal_graph() {
        let tree = undirected(6, &[(0, 1), (0, 2), (2, 3), (2, 4), (4, 5)]);
        let forest = execute(&tree).expect("forest");
        assert_eq!(forest, tree);
    }

    #[test]
    fn test_kruskal_k5_weight() {
        let graph = weighted_k5();
        let forest = execute(&graph).expect("forest");
        assert_eq!(forest.node_count(), 5);
        assert_eq!(forest.edge_count(), 4);
        // 0-3 (1), 0-1 (2), 0-2 (2), then 1-4 (3) beats 0-4 / 2-4 (4).
        assert_close(total_weight(&forest), 8.0);
        for node in forest.nodes() {
            assert!(bfs::connected(&forest, n(0), node, false).expect("members"));
        }
    }

    #[test]
    fn test_kruskal_ties_follow_endpoint_order() {
        let graph = graph_with(
            Constraints::SIMPLE | Constraints::UNDIRECTED | Constraints::WEIGHTED,
            3,
            &weighted_edges(false, &[(0, 1, 1.0), (1, 2, 1.0), (0, 2, 1.0)]),
        );
        let forest = execute(&graph).expect("forest");
        let kept: Vec<_> = forest.iter_edges().map(Edge::id).collect();
        // Equal weights: pair (0, 1) then (0, 2) win, (1, 2) closes a cycle.
        assert_eq!(kept, vec![e(0), e(2)]);
    }

    #[test]
    fn test_kruskal_disconnected_input_yields_forest() {
        let graph = graph_with(
            Constraints::SIMPLE | Constraints::UNDIRECTED | Constraints::WEIGHTED,
            7,
            &weighted_edges(
                false,
                &[
                    (0, 1, 3.0),
                    (1, 2, 1.0),
                    (0, 2, 2.0),
                    (3, 4, 5.0),
                    (4, 5, 1.0),
                    (3, 5, 1.0),
                ],
            ),
        );
        let forest = execute(&graph).expect("forest");
        assert_eq!(forest.edge_count(), graph.node_count() - 3);
        assert!(forest.contains_node(n(6)));
        assert!(!bfs::connected(&forest, n(0), n(3), false).expect("members"));
        assert_close(total_weight(&forest), 5.0);
    }

    #[test]
    fn test_kruskal_multigraph_uses_lightest_parallel_and_skips_self_edges() {
        let graph = graph_with(
            Constraints::MULTIGRAPH | Constraints::MIXED | Constraints::WEIGHTED,
            2,
            &[
                Edge::weighted(e(0), n(0), n(1), false, 4.0),
                Edge::weighted(e(1), n(1), n(0), true, 0.5),
                Edge::weighted(e(2), n(0), n(0), false, -9.0),
            ],
        );
        let forest = execute(&graph).expect("forest");
        let kept: Vec<_> = forest.iter_edges().map(Edge::id).collect();
        assert_eq!(kept, vec![e(1)]);
        assert!(forest.edge(e(1)).expect("kept").is_directed());
        assert_eq!(forest.constraints(), graph.constraints());
    }
}
