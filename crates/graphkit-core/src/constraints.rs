//! Graph constraint flags.
//!
//! A [`Constraints`] value is the complete configuration of a
//! [`crate::Graph`]. It carries three independent axes:
//!
//! - graph type: [`Constraints::SIMPLE`] or [`Constraints::MULTIGRAPH`];
//! - edge behaviour: [`Constraints::UNDIRECTED`] and/or
//!   [`Constraints::DIRECTED`], both set meaning [`Constraints::MIXED`];
//! - weight: [`Constraints::WEIGHTED`] or [`Constraints::UNWEIGHTED`].
//!
//! With the `serde` support from `bitflags`, a constraint set serialises as its
//! flag names (`"MULTIGRAPH | DIRECTED | WEIGHTED"`) in human-readable formats.
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::GraphError;

bitflags! {
    /// Bitmask selecting which edges a graph accepts.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Constraints: u8 {
        /// At most one edge per ordered node pair, no self-edges.
        const SIMPLE = 0b0000_0001;
        /// Parallel edges and self-edges allowed.
        const MULTIGRAPH = 0b0000_0010;
        /// Undirected edges allowed.
        const UNDIRECTED = 0b0000_0100;
        /// Directed edges allowed.
        const DIRECTED = 0b0000_1000;
        /// Both directed and undirected edges allowed.
        const MIXED = Self::UNDIRECTED.bits() | Self::DIRECTED.bits();
        /// Edge weights are not meaningful to the caller.
        const UNWEIGHTED = 0b0001_0000;
        /// Edge weights are meaningful to the caller.
        const WEIGHTED = 0b0010_0000;
    }
}

impl Default for Constraints {
    /// A simple, undirected, unweighted graph.
    fn default() -> Self {
        Constraints::SIMPLE | Constraints::UNDIRECTED | Constraints::UNWEIGHTED
    }
}

impl Constraints {
    /// Returns `true` if parallel edges and self-edges are allowed.
    pub fn is_multigraph(self) -> bool {
        self.contains(Constraints::MULTIGRAPH)
    }

    /// Returns `true` if both directed and undirected edges are allowed.
    pub fn is_mixed(self) -> bool {
        self.contains(Constraints::MIXED)
    }

    /// Returns `true` if directed edges are allowed.
    pub fn allows_directed(self) -> bool {
        self.contains(Constraints::DIRECTED)
    }

    /// Returns `true` if undirected edges are allowed.
    pub fn allows_undirected(self) -> bool {
        self.contains(Constraints::UNDIRECTED)
    }

    /// Returns `true` if the weighted flag is set.
    pub fn is_weighted(self) -> bool {
        self.contains(Constraints::WEIGHTED)
    }

    /// Checks that the set names exactly one graph type, exactly one weight
    /// mode and at least one edge behaviour.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidConstraints`] describing the first
    /// contradiction found.
    pub fn validate(self) -> Result<Self, GraphError> {
        let reason = if self.contains(Constraints::SIMPLE | Constraints::MULTIGRAPH) {
            Some("SIMPLE and MULTIGRAPH are mutually exclusive")
        } else if !self.intersects(Constraints::SIMPLE | Constraints::MULTIGRAPH) {
            Some("one of SIMPLE or MULTIGRAPH is required")
        } else if self.contains(Constraints::WEIGHTED | Constraints::UNWEIGHTED) {
            Some("WEIGHTED and UNWEIGHTED are mutually exclusive")
        } else if !self.intersects(Constraints::WEIGHTED | Constraints::UNWEIGHTED) {
            Some("one of WEIGHTED or UNWEIGHTED is required")
        } else if !self.intersects(Constraints::MIXED) {
            Some("at least one of UNDIRECTED or DIRECTED is required")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(GraphError::InvalidConstraints {
                constraints: self,
                reason,
            }),
            None => Ok(self),
        }
    }

    /// Resolves contradictions instead of rejecting them.
    ///
    /// MULTIGRAPH wins over SIMPLE, WEIGHTED over UNWEIGHTED, and a set with no
    /// edge behaviour becomes UNDIRECTED. Missing graph-type or weight bits
    /// default to SIMPLE and UNWEIGHTED.
    pub fn normalized(self) -> Self {
        let mut flags = self;
        if flags.contains(Constraints::MULTIGRAPH) {
            flags.remove(Constraints::SIMPLE);
        } else {
            flags.insert(Constraints::SIMPLE);
        }
        if flags.contains(Constraints::WEIGHTED) {
            flags.remove(Constraints::UNWEIGHTED);
        } else {
            flags.insert(Constraints::UNWEIGHTED);
        }
        if !flags.intersects(Constraints::MIXED) {
            flags.insert(Constraints::UNDIRECTED);
        }
        flags
    }
}
