#![deny(clippy::print_stdout, clippy::print_stderr)]
//! A constrained in-memory graph and the classic algorithms over it.
//!
//! Build a [`Graph`] from a [`Constraints`] set, register [`NodeId`]s and
//! [`Edge`]s, then run:
//!
//! - [`bfs`] / [`dfs`]: `explore`, `explore_all`, `search`, `connected`;
//! - [`dijkstra::execute`] and [`bellman_ford::execute`];
//! - [`kruskal::execute`] for a minimum spanning forest;
//! - [`cycles::find_cycle`] and [`cycles::is_acyclic`].
//!
//! Algorithms borrow the graph immutably and return [`Path`], [`Cycle`],
//! [`Graph`] or plain values; "no path" and "acyclic" are `None`, and every
//! other failure is a [`GraphError`].

pub mod constraints;
pub mod error;
pub mod graph;
pub mod newtypes;
pub mod pair;
pub mod path;
pub mod structures;
pub mod union_find;

#[cfg(test)]
mod test_helpers;

pub use constraints::Constraints;
pub use error::{ConstraintViolation, GraphError};
pub use graph::shortest_path::{Hop, NegativeCycle, bellman_ford, dijkstra};
pub use graph::{AdjListData, Graph, NodeRemoval, bfs, cycles, dfs, kruskal};
pub use newtypes::{EdgeId, IdGenerator, NodeId};
pub use pair::{OrderedPair, UnorderedPair};
pub use path::{Cycle, Path};
pub use structures::{DEFAULT_WEIGHT, Edge};
pub use union_find::UnionFind;

/// Returns the current version of the graphkit-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn version_is_semver() {
        let v = version();
        let parts: Vec<&str> = v.split('.').collect();
        assert_eq!(parts.len(), 3, "version should have 3 parts: {v}");
        for part in parts {
            part.parse::<u32>().expect("each part should be a number");
        }
    }

    #[test]
    fn crate_root_exports_compose() {
        let mut ids = IdGenerator::new();
        let (a, b) = (ids.next_node(), ids.next_node());
        let mut graph = Graph::with_nodes(Constraints::default(), [a, b]);
        assert!(graph.add_edge(Edge::undirected(ids.next_edge(), a, b)));
        let path = bfs::search(&graph, a, b, true)
            .expect("members")
            .expect("adjacent");
        assert_eq!(path.hops(), 1);
        assert!(cycles::is_acyclic(&graph).expect("consistent graph"));
    }
}
