//! Typed 2-tuples used as edge endpoints and as edge-group keys.
//!
//! [`OrderedPair`] keeps its elements in position: the endpoints of a directed
//! edge are `(source, sink)`. [`UnorderedPair`] compares equal regardless of
//! element order and is the key under which a [`crate::Graph`] groups every
//! edge running between the same two nodes.
use serde::{Deserialize, Serialize};

/// A pair whose element positions are significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderedPair<T> {
    first: T,
    second: T,
}

impl<T> OrderedPair<T> {
    /// Creates a pair from its first and second elements.
    pub const fn new(first: T, second: T) -> Self {
        Self { first, second }
    }

    /// Returns the first element.
    pub fn first(&self) -> &T {
        &self.first
    }

    /// Returns the second element.
    pub fn second(&self) -> &T {
        &self.second
    }

    /// Returns a pair with the two elements swapped.
    pub fn reversed(self) -> Self {
        Self {
            first: self.second,
            second: self.first,
        }
    }

    /// Consumes the pair, returning `(first, second)`.
    pub fn into_tuple(self) -> (T, T) {
        (self.first, self.second)
    }
}

impl<T: PartialEq> OrderedPair<T> {
    /// Returns `true` if either element equals `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.first == *value || self.second == *value
    }
}

impl<T: Ord> OrderedPair<T> {
    /// Forgets the element order.
    pub fn unordered(self) -> UnorderedPair<T> {
        UnorderedPair::new(self.first, self.second)
    }
}

/// A pair for which `(a, b) == (b, a)`.
///
/// The elements are stored normalised (`low <= high`), so the derived `Eq`,
/// `Ord` and `Hash` implementations are symmetric in construction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct UnorderedPair<T> {
    low: T,
    high: T,
}

impl<T: Ord> UnorderedPair<T> {
    /// Creates a pair from two elements in any order.
    pub fn new(a: T, b: T) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }
}

impl<T> UnorderedPair<T> {
    /// Returns the smaller element.
    pub fn low(&self) -> &T {
        &self.low
    }

    /// Returns the larger element.
    pub fn high(&self) -> &T {
        &self.high
    }

    /// Consumes the pair, returning `(low, high)`.
    pub fn into_tuple(self) -> (T, T) {
        (self.low, self.high)
    }
}

impl<T: PartialEq> UnorderedPair<T> {
    /// Returns `true` if either element equals `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.low == *value || self.high == *value
    }

    /// Returns the element paired with `value`, or `None` if `value` is not in
    /// the pair. A pair of two equal elements returns that element.
    pub fn other(&self, value: &T) -> Option<&T> {
        if self.low == *value {
            Some(&self.high)
        } else if self.high == *value {
            Some(&self.low)
        } else {
            None
        }
    }

    /// Returns `true` if both elements are equal (the key of a self-edge group).
    pub fn is_loop(&self) -> bool {
        self.low == self.high
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_unordered_pair_equality_ignores_order() {
        assert_eq!(UnorderedPair::new(1, 2), UnorderedPair::new(2, 1));
        assert_ne!(UnorderedPair::new(1, 2), UnorderedPair::new(1, 3));
    }

    #[test]
    fn test_unordered_pair_hashes_symmetrically() {
        let mut set = HashSet::new();
        set.insert(UnorderedPair::new("a", "b"));
        assert!(set.contains(&UnorderedPair::new("b", "a")));
    }

    #[test]
    fn test_unordered_pair_other() {
        let pair = UnorderedPair::new(4, 9);
        assert_eq!(pair.other(&4), Some(&9));
        assert_eq!(pair.other(&9), Some(&4));
        assert_eq!(pair.other(&5), None);
        assert_eq!(UnorderedPair::new(3, 3).other(&3), Some(&3));
        assert!(UnorderedPair::new(3, 3).is_loop());
    }

    #[test]
    fn test_ordered_pair_keeps_positions() {
        let pair = OrderedPair::new(1, 2);
        assert_ne!(pair, OrderedPair::new(2, 1));
        assert_eq!(pair.reversed(), OrderedPair::new(2, 1));
        assert_eq!(pair.unordered(), UnorderedPair::new(2, 1));
        assert!(pair.contains(&2));
        assert!(!pair.contains(&3));
    }
}
