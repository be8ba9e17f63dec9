//! Worklist graph traversal shared by [`bfs`] and [`dfs`].
//!
//! Both searches run the same loop: pop a node from the worklist, visit each
//! unvisited neighbor, mark it, and push it. A FIFO worklist yields
//! breadth-first order; a LIFO worklist yields depth-first order. Nodes are
//! marked when discovered, so each node enters the worklist at most once.
//!
//! Every operation takes a `follow_directed` flag. When `true`, directed
//! edges are only crossed from source to sink; when `false`, every edge is
//! crossed in both directions.
pub mod bfs;
pub mod dfs;

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::ops::ControlFlow;

use crate::error::GraphError;
use crate::graph::Graph;
use crate::newtypes::NodeId;
use crate::path::Path;


/// The pending-node container that decides visiting order.
pub(crate) trait Worklist: Default {
    fn push(&mut self, node: NodeId);
    fn pop(&mut self) -> Option<NodeId>;
}

/// First-in first-out: breadth-first order.
#[derive(Debug, Default)]
pub(crate) struct Fifo(VecDeque<NodeId>);

impl Worklist for Fifo {
    fn push(&mut self, node: NodeId) {
        self.0.push_back(node);
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.0.pop_front()
    }
}

/// Last-in first-out: depth-first order.
#[derive(Debug, Default)]
pub(crate) struct Lifo(Vec<NodeId>);

impl Worklist for Lifo {
    fn push(&mut self, node: NodeId) {
        self.0.push(node);
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.0.pop()
    }
}

/// Runs the traversal from `start`, marking nodes in `visited`.
///
/// `on_discover(from, to)` is called once per newly discovered node with the
/// node it was reached from; returning [`ControlFlow::Break`] stops the
/// traversal immediately. Nodes already in `visited` are never discovered,
/// which lets callers chain traversals over a shared visited set.
pub(crate) fn traverse<W, F>(
    graph: &Graph,
    start: NodeId,
    follow_directed: bool,
    visited: &mut BTreeSet<NodeId>,
    mut on_discover: F,
) -> Result<(), GraphError>
where
    W: Worklist,
    F: FnMut(NodeId, NodeId) -> ControlFlow<()>,
{
    let mut worklist = W::default();
    visited.insert(start);
    worklist.push(start);

    while let Some(current) = worklist.pop() {
        for neighbor in graph.neighbors(current, follow_directed)? {
            if !visited.insert(neighbor) {
                continue;
            }
            if on_discover(current, neighbor).is_break() {
                return Ok(());
            }
            worklist.push(neighbor);
        }
    }
    Ok(())
}

/// Every node reachable from `start`, `start` included.
pub(crate) fn explore<W: Worklist>(
    graph: &Graph,
    start: NodeId,
    follow_directed: bool,
) -> Result<BTreeSet<NodeId>, GraphError> {
    graph.ensure_members(&[start])?;
    let mut visited = BTreeSet::new();
    traverse::<W, _>(graph, start, follow_directed, &mut visited, |_, _| {
        ControlFlow::Continue(())
    })?;
    tracing::trace!(start = %start, reached = visited.len(), "explored");
    Ok(visited)
}

/// Union of [`explore`] from every start. A start already reached by an
/// earlier start is not explored again.
pub(crate) fn explore_all<W: Worklist>(
    graph: &Graph,
    starts: impl IntoIterator<Item = NodeId>,
    follow_directed: bool,
) -> Result<BTreeSet<NodeId>, GraphError> {
    let starts: Vec<NodeId> = starts.into_iter().collect();
    graph.ensure_members(&starts)?;

    let mut reached = BTreeSet::new();
    for start in starts {
        if reached.contains(&start) {
            continue;
        }
        reached.extend(explore::<W>(graph, start, follow_directed)?);
    }
    Ok(reached)
}

/// A path from `start` to `target` built from discovery pointers, or `None`
/// if `target` is unreachable.
pub(crate) fn search<W: Worklist>(
    graph: &Graph,
    start: NodeId,
    target: NodeId,
    follow_directed: bool,
) -> Result<Option<Path>, GraphError> {
    graph.ensure_members(&[start, target])?;
    if start == target {
        return Ok(Some(Path::new(start)));
    }

    let mut parent: BTreeMap<NodeId, NodeId> = BTreeMap::new();
    let mut visited = BTreeSet::new();
    traverse::<W, _>(graph, start, follow_directed, &mut visited, |from, to| {
        parent.insert(to, from);
        if to == target {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })?;

    if !parent.contains_key(&target) {
        tracing::trace!(start = %start, target = %target, "target unreachable");
        return Ok(None);
    }

    let mut chain = vec![target];
    let mut current = target;
    while let Some(&previous) = parent.get(&current) {
        chain.push(previous);
        current = previous;
    }
    chain.reverse();

    let mut path = Path::new(start);
    for hop in chain.windows(2) {
        let (from, to) = (hop[0], hop[1]);
        let edge = graph
            .min_edge_to(from, to, follow_directed)?
            .ok_or(GraphError::NoEdgeBetween { from, to })?;
        path.append(*edge)?;
    }
    tracing::trace!(start = %start, target = %target, hops = path.hops(), "path found");
    Ok(Some(path))
}

/// Returns `true` if `target` is reachable from `start`.
pub(crate) fn connected<W: Worklist>(
    graph: &Graph,
    start: NodeId,
    target: NodeId,
    follow_directed: bool,
) -> Result<bool, GraphError> {
    graph.ensure_members(&[start, target])?;
    if start == target {
        return Ok(true);
    }
    let mut found = false;
    let mut visited = BTreeSet::new();
    traverse::<W, _>(graph, start, follow_directed, &mut visited, |_, to| {
        if to == target {
            found = true;
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })?;
    Ok(found)
}
