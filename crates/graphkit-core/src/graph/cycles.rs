//! Cycle detection for undirected, directed and mixed graphs.
//!
//! A cycle is a closed walk that crosses directed edges from source to sink,
//! crosses undirected edges in either direction, and never reuses an edge.
//! [`find_cycle`] proceeds in two stages.
//!
//! # Small cycles
//!
//! Every edge group is checked first for a 1-cycle (a self-edge) or a
//! 2-cycle: two undirected edges, an undirected edge beside a directed one,
//! or directed edges in both directions. A single undirected edge crossed
//! forth and back is not a cycle.
//!
//! # Longer cycles
//!
//! - In a graph that is not [`Constraints::MIXED`], an iterative three-colour
//!   DFS runs from every unvisited node. Reaching a node that is still on
//!   the stack (grey) closes a cycle. In undirected graphs the edge used to
//!   arrive at a node is not followed straight back.
//! - In a mixed graph the DFS colouring is not enough, since an undirected
//!   edge may be crossed either way but only once. Instead, nodes that
//!   cannot lie on a cycle are peeled off until a fixed point (see
//!   `Reduction`); any node left over lies on a cycle, which is recovered
//!   by walking backwards until a node repeats.
//!
//! [`Constraints::MIXED`]: crate::Constraints::MIXED
use std::collections::{BTreeMap, BTreeSet};

use crate::error::GraphError;
use crate::graph::Graph;
use crate::newtypes::{EdgeId, NodeId};
use crate::path::Cycle;
use crate::structures::Edge;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Returns `true` if `graph` contains no cycle.
///
/// # Errors
///
/// Propagates a [`GraphError`] if the graph's indexes are inconsistent.
pub fn is_acyclic(graph: &Graph) -> Result<bool, GraphError> {
    Ok(find_cycle(graph)?.is_none())
}

/// Returns one cycle of `graph`, or `None` if the graph is acyclic.
///
/// Results are deterministic: groups, nodes and edges are scanned in
/// ascending order.
///
/// # Errors
///
/// Propagates a [`GraphError`] if the graph's indexes are inconsistent.
pub fn find_cycle(graph: &Graph) -> Result<Option<Cycle>, GraphError> {
    if let Some(cycle) = find_small_cycle(graph)? {
        tracing::trace!(len = cycle.len(), "small cycle found");
        return Ok(Some(cycle));
    }
    let found = if graph.constraints().is_mixed() {
        Reduction::new(graph).run()?.find_cycle()?
    } else {
        find_cycle_dfs(graph)?
    };
    tracing::trace!(found = found.is_some(), "cycle search finished");
    Ok(found)
}

// ---------------------------------------------------------------------------
// Small cycles
// ---------------------------------------------------------------------------

fn find_small_cycle(graph: &Graph) -> Result<Option<Cycle>, GraphError> {
    for key in graph.edges().keys() {
        let group = graph.group(key);
        let Some(&&first) = group.first() else {
            continue;
        };
        if key.is_loop() {
            return Cycle::from_nodes(vec![*key.low()], vec![first]).map(Some);
        }

        let (a, b) = (*key.low(), *key.high());
        let undirected: Vec<Edge> = group.iter().filter(|e| !e.is_directed()).map(|e| **e).collect();
        let forward = group.iter().find(|e| e.is_directed() && e.source() == a).copied();
        let backward = group.iter().find(|e| e.is_directed() && e.source() == b).copied();

        let cycle = match (undirected.as_slice(), forward.or(backward)) {
            ([u1, u2, ..], _) => Some((vec![a, b], vec![*u1, *u2])),
            ([u], Some(d)) => Some((vec![d.source(), d.sink()], vec![*d, *u])),
            ([], _) | ([_], None) => match (forward, backward) {
                (Some(f), Some(g)) => Some((vec![a, b], vec![*f, *g])),
                (Some(_) | None, _) => None,
            },
        };
        if let Some((nodes, edges)) = cycle {
            return Cycle::from_nodes(nodes, edges).map(Some);
        }
    }
    Ok(None)
}

// ---------------------------------------------------------------------------
// Non-mixed graphs: three-colour DFS
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Colour {
    Grey,
    Black,
}

/// One DFS stack frame: a grey node, the edge it was entered by, and the
/// edges still to examine.
struct Frame {
    node: NodeId,
    arrival: Option<Edge>,
    pending: Vec<EdgeId>,
    next: usize,
}

impl Frame {
    fn new(graph: &Graph, node: NodeId, arrival: Option<Edge>) -> Result<Self, GraphError> {
        Ok(Self {
            node,
            arrival,
            pending: graph.adj_list_of(node)?.neighboring_edges(true),
            next: 0,
        })
    }
}

fn find_cycle_dfs(graph: &Graph) -> Result<Option<Cycle>, GraphError> {
    let mut colour: BTreeMap<NodeId, Colour> = BTreeMap::new();

    for root in graph.nodes() {
        if colour.contains_key(&root) {
            continue;
        }
        colour.insert(root, Colour::Grey);
        let mut stack = vec![Frame::new(graph, root, None)?];

        while let Some(frame) = stack.last_mut() {
            let Some(&id) = frame.pending.get(frame.next) else {
                colour.insert(frame.node, Colour::Black);
                stack.pop();
                continue;
            };
            frame.next += 1;

            if frame.arrival.is_some_and(|arrival| arrival.id() == id) {
                continue;
            }
            let node = frame.node;
            let edge = *graph.edge(id).ok_or(GraphError::EdgeNotFound(id))?;
            let neighbor = edge.other_endpoint(node)?;

            match colour.get(&neighbor).copied() {
                None => {
                    colour.insert(neighbor, Colour::Grey);
                    stack.push(Frame::new(graph, neighbor, Some(edge))?);
                }
                Some(Colour::Grey) => return close_on_stack(&stack, neighbor, edge).map(Some),
                Some(Colour::Black) => {}
            }
        }
    }
    Ok(None)
}

/// Builds the cycle formed by the stack segment from `entry` to the top plus
/// the back edge `closing` from the top node to `entry`.
fn close_on_stack(stack: &[Frame], entry: NodeId, closing: Edge) -> Result<Cycle, GraphError> {
    let at = stack
        .iter()
        .position(|frame| frame.node == entry)
        .ok_or(GraphError::NodeNotFound(entry))?;
    let segment = &stack[at..];
    let nodes = segment.iter().map(|frame| frame.node).collect();
    let mut edges: Vec<Edge> = segment.iter().skip(1).filter_map(|frame| frame.arrival).collect();
    edges.push(closing);
    Cycle::from_nodes(nodes, edges)
}

// ---------------------------------------------------------------------------
// Mixed graphs: fixed-point reduction
// ---------------------------------------------------------------------------

/// Conceptual simplification of a mixed graph that keeps every cycle.
///
/// Two rules are applied until neither changes anything:
///
/// 1. A relevant node with no incoming edge and no open undirected edge
///    cannot be entered, so it is removed from the relevant set.
/// 2. A relevant node with no incoming edge and exactly one open undirected
///    edge can only be entered through that edge, so the edge is redirected
///    toward it.
///
/// "Incoming" counts directed edges into the node and redirected edges
/// pointing at it; "open" undirected edges are those not yet redirected.
/// Only edges whose other endpoint is still relevant count. Each productive
/// pass removes a node or redirects an edge, so at most `|V| + |E|` passes
/// change anything. The graph itself is never modified.
///
/// At the fixed point every relevant node has an incoming edge or at least
/// two open undirected edges, so a backward walk can always continue without
/// reusing the edge it arrived by.
struct Reduction<'g> {
    graph: &'g Graph,
    relevant: BTreeSet<NodeId>,
    toward: BTreeMap<EdgeId, NodeId>,
}

impl<'g> Reduction<'g> {
    fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            relevant: graph.nodes().collect(),
            toward: BTreeMap::new(),
        }
    }

    fn run(mut self) -> Result<Self, GraphError> {
        let max_passes = self.graph.node_count() + self.graph.edge_count() + 1;
        for pass in 0..max_passes {
            let mut removed = false;
            let mut redirected = false;
            let snapshot: Vec<NodeId> = self.relevant.iter().copied().collect();
            for node in snapshot {
                if !self.incoming(node)?.is_empty() {
                    continue;
                }
                match self.open_undirected(node)?.as_slice() {
                    [] => {
                        self.relevant.remove(&node);
                        removed = true;
                    }
                    [only] => {
                        self.toward.insert(only.id(), node);
                        redirected = true;
                    }
                    [_, _, ..] => {}
                }
            }
            if !(removed || redirected) {
                tracing::trace!(
                    passes = pass + 1,
                    relevant = self.relevant.len(),
                    redirected = self.toward.len(),
                    "reduction reached fixed point"
                );
                break;
            }
        }
        Ok(self)
    }

    /// Edges entering `node` from relevant neighbors, paired with the
    /// neighbor they come from.
    fn incoming(&self, node: NodeId) -> Result<Vec<(NodeId, Edge)>, GraphError> {
        let adj = self.graph.adj_list_of(node)?;
        let mut entering = Vec::new();
        for (&source, ids) in adj.incoming() {
            if self.relevant.contains(&source) {
                for id in ids {
                    entering.push((source, self.resolve(*id)?));
                }
            }
        }
        for (&other, ids) in adj.undirected() {
            if self.relevant.contains(&other) {
                for id in ids {
                    if self.toward.get(id) == Some(&node) {
                        entering.push((other, self.resolve(*id)?));
                    }
                }
            }
        }
        Ok(entering)
    }

    /// Undirected edges of `node` to relevant neighbors that have not been
    /// redirected.
    fn open_undirected(&self, node: NodeId) -> Result<Vec<Edge>, GraphError> {
        let adj = self.graph.adj_list_of(node)?;
        let mut open = Vec::new();
        for (&other, ids) in adj.undirected() {
            if self.relevant.contains(&other) {
                for id in ids {
                    if !self.toward.contains_key(id) {
                        open.push(self.resolve(*id)?);
                    }
                }
            }
        }
        Ok(open)
    }

    fn resolve(&self, id: EdgeId) -> Result<Edge, GraphError> {
        self.graph
            .edge(id)
            .copied()
            .ok_or(GraphError::EdgeNotFound(id))
    }

    /// One step backwards from `node`: an incoming edge if there is one,
    /// otherwise an open undirected edge other than `arrival`.
    fn predecessor(
        &self,
        node: NodeId,
        arrival: Option<EdgeId>,
    ) -> Result<Option<(NodeId, Edge)>, GraphError> {
        if let Some(&step) = self.incoming(node)?.first() {
            return Ok(Some(step));
        }
        for edge in self.open_undirected(node)? {
            if Some(edge.id()) != arrival {
                return Ok(Some((edge.other_endpoint(node)?, edge)));
            }
        }
        Ok(None)
    }

    /// Walks backwards from the first relevant node until a node repeats and
    /// returns the enclosed cycle, oriented forwards.
    fn find_cycle(&self) -> Result<Option<Cycle>, GraphError> {
        let Some(&origin) = self.relevant.first() else {
            return Ok(None);
        };

        let mut trail: Vec<NodeId> = vec![origin];
        let mut steps: Vec<Edge> = Vec::new();
        let mut position: BTreeMap<NodeId, usize> = BTreeMap::from([(origin, 0)]);
        let mut arrival: Option<EdgeId> = None;

        while steps.len() <= self.relevant.len() {
            let current = trail[trail.len() - 1];
            let Some((previous, edge)) = self.predecessor(current, arrival)? else {
                return Ok(None);
            };
            if let Some(&at) = position.get(&previous) {
                // Forwards: trail[at] -> trail[k] -> ... -> trail[at + 1] -> trail[at].
                let mut nodes = vec![trail[at]];
                nodes.extend(trail[at + 1..].iter().rev());
                let mut edges = vec![edge];
                edges.extend(steps[at..].iter().rev());
                return Cycle::from_nodes(nodes, edges).map(Some);
            }
            position.insert(previous, trail.len());
            trail.push(previous);
            steps.push(edge);
            arrival = Some(edge.id());
        }
        Ok(None)
    }
}
