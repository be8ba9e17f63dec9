//! Breadth-first search.
//!
//! [`search`] returns a path with the fewest edges; between adjacent path
//! nodes the lightest edge is chosen.
use std::collections::BTreeSet;

use super::Fifo;
use crate::error::GraphError;
use crate::graph::Graph;
use crate::newtypes::NodeId;
use crate::path::Path;

/// Every node reachable from `start`, `start` included.
///
/// # Errors
///
/// Returns [`GraphError::NodeNotFound`] if `start` is not a member.
pub fn explore(
    graph: &Graph,
    start: NodeId,
    follow_directed: bool,
) -> Result<BTreeSet<NodeId>, GraphError> {
    super::explore::<Fifo>(graph, start, follow_directed)
}

/// Union of [`explore`] over `starts`.
///
/// # Errors
///
/// Returns [`GraphError::NodeNotFound`] if any start is not a member.
pub fn explore_all(
    graph: &Graph,
    starts: impl IntoIterator<Item = NodeId>,
    follow_directed: bool,
) -> Result<BTreeSet<NodeId>, GraphError> {
    super::explore_all::<Fifo>(graph, starts, follow_directed)
}

/// A fewest-edges path from `start` to `target`, or `None` if there is none.
/// When `start == target` the path is the single node.
///
/// # Errors
///
/// Returns [`GraphError::NodeNotFound`] if either node is not a member.
pub fn search(
    graph: &Graph,
    start: NodeId,
    target: NodeId,
    follow_directed: bool,
) -> Result<Option<Path>, GraphError> {
    super::search::<Fifo>(graph, start, target, follow_directed)
}

/// Returns `true` if `target` is reachable from `start`.
///
/// # Errors
///
/// Returns [`GraphError::NodeNotFound`] if either node is not a member.
pub fn connected(
    graph: &Graph,
    start: NodeId,
    target: NodeId,
    follow_directed: bool,
) -> Result<bool, GraphError> {
    super::connected::<Fifo>(graph, start, target, follow_directed)
}
