#![allow(clippy::expect_used)]

use super::*;
use crate::error::GraphError;
use crate::newtypes::{EdgeId, NodeId};
use crate::pair::UnorderedPair;

fn n(raw: u64) -> NodeId {
    NodeId::new(raw)
}

fn e(raw: u64) -> EdgeId {
    EdgeId::new(raw)
}

#[test]
fn test_other_endpoint_of_both_ends() {
    let edge = Edge::undirected(e(0), n(1), n(2));
    assert_eq!(edge.other_endpoint(n(1)).expect("endpoint"), n(2));
    assert_eq!(edge.other_endpoint(n(2)).expect("endpoint"), n(1));
}

#[test]
fn test_other_endpoint_rejects_foreign_node() {
    let edge = Edge::directed(e(5), n(1), n(2));
    let err = edge
        .other_endpoint(n(3))
        .expect_err("n3 is not an endpoint");
    assert_eq!(
        err,
        GraphError::InvalidEndpoint {
            edge: e(5),
            node: n(3)
        }
    );
    assert!(err.to_string().contains("e5"));
}

#[test]
fn test_self_edge_is_structural() {
    let looped = Edge::directed(e(0), n(4), n(4));
    assert!(looped.is_self_edge());
    assert_eq!(looped.other_endpoint(n(4)).expect("endpoint"), n(4));
    assert!(looped.key().is_loop());
    assert!(!Edge::undirected(e(1), n(4), n(5)).is_self_edge());
}

#[test]
fn test_numeric_weight_defaults_to_one() {
    let plain = Edge::undirected(e(0), n(0), n(1));
    assert_eq!(plain.weight(), None);
    assert!((plain.numeric_weight() - DEFAULT_WEIGHT).abs() < f64::EPSILON);

    let heavy = plain.with_weight(-2.5);
    assert!(heavy.is_weighted());
    assert!((heavy.numeric_weight() + 2.5).abs() < f64::EPSILON);
}

#[test]
fn test_traversable_from_honours_direction() {
    let arc = Edge::directed(e(0), n(1), n(2));
    assert_eq!(arc.traversable_from(n(1)), Some(n(2)));
    assert_eq!(arc.traversable_from(n(2)), None);

    let line = Edge::undirected(e(1), n(1), n(2));
    assert_eq!(line.traversable_from(n(2)), Some(n(1)));
    assert_eq!(line.traversable_from(n(9)), None);
}

#[test]
fn test_key_groups_both_orientations() {
    let forward = Edge::directed(e(0), n(1), n(2));
    let backward = Edge::directed(e(1), n(2), n(1));
    assert_eq!(forward.key(), backward.key());
    assert_eq!(forward.key(), UnorderedPair::new(n(1), n(2)));
    assert!(forward.connects(n(2), n(1)));
}

#[test]
fn test_edge_serde_omits_missing_weight() {
    let plain = Edge::undirected(e(3), n(0), n(1));
    let json = serde_json::to_value(plain).expect("serialize");
    assert!(json.get("weight").is_none());

    let weighted = plain.with_weight(0.5);
    let text = serde_json::to_string(&weighted).expect("serialize");
    let back: Edge = serde_json::from_str(&text).expect("deserialize");
    assert_eq!(back, weighted);
}
