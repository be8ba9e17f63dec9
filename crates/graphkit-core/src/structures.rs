//! Entity model: nodes are bare [`NodeId`](crate::NodeId) handles, edges are
//! [`Edge`] values carrying their endpoints, direction and optional weight.
mod edge;

pub use edge::{DEFAULT_WEIGHT, Edge};

#[cfg(test)]
mod tests;
