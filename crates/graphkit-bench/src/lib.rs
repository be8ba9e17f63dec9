//! Graph generator and benchmark utilities for graphkit.
//!
//! This crate provides deterministic generation of layered random graphs
//! for benchmarking and property-based testing of `graphkit-core`, plus a
//! conversion to `petgraph` used as a reference implementation.

pub mod baseline;
pub mod correctness;
pub mod generator;

pub use generator::{GeneratorConfig, SizeTier, generate_graph};
