//! Union-Find (disjoint set) structure used by Kruskal's algorithm.
//!
//! Elements are mapped to dense ordinals on insertion; the forest itself is two
//! parallel `Vec`s indexed by ordinal. Path compression uses iterative
//! path-halving: during [`UnionFind::find`] each visited ordinal is pointed at
//! its grandparent, halving the path length without a second pass or
//! recursion. Union is weighted by set size; when sizes are equal the **lower
//! ordinal** (the element inserted first) becomes the root, so the
//! representative of a set does not depend on the argument order of `union`.
use std::collections::BTreeMap;

/// A union-find over arbitrary ordered elements with path-halving and
/// union-by-size.
#[derive(Debug, Clone)]
pub struct UnionFind<T> {
    ordinals: BTreeMap<T, usize>,
    elements: Vec<T>,
    parent: Vec<usize>,
    size: Vec<usize>,
    sets: usize,
}

impl<T: Ord + Clone> UnionFind<T> {
    /// Creates a union-find holding each of `elements` as a singleton set.
    ///
    /// Duplicates are ignored.
    pub fn new(elements: impl IntoIterator<Item = T>) -> Self {
        let mut uf = Self {
            ordinals: BTreeMap::new(),
            elements: Vec::new(),
            parent: Vec::new(),
            size: Vec::new(),
            sets: 0,
        };
        for element in elements {
            uf.insert(element);
        }
        uf
    }

    /// Adds `element` as a singleton set. Returns `false` if it was already
    /// present.
    pub fn insert(&mut self, element: T) -> bool {
        if self.ordinals.contains_key(&element) {
            return false;
        }
        let ordinal = self.elements.len();
        self.ordinals.insert(element.clone(), ordinal);
        self.elements.push(element);
        self.parent.push(ordinal);
        self.size.push(1);
        self.sets += 1;
        true
    }

    /// Returns the representative of the set containing `element`, or `None`
    /// if `element` was never inserted.
    pub fn find(&mut self, element: &T) -> Option<T> {
        let ordinal = *self.ordinals.get(element)?;
        let root = self.root(ordinal);
        Some(self.elements[root].clone())
    }

    /// Merges the sets containing `a` and `b`.
    ///
    /// Returns `true` if two distinct sets were merged, `false` if the
    /// elements already shared a set or either is unknown.
    pub fn union(&mut self, a: &T, b: &T) -> bool {
        let (Some(&oa), Some(&ob)) = (self.ordinals.get(a), self.ordinals.get(b)) else {
            return false;
        };
        let ra = self.root(oa);
        let rb = self.root(ob);
        if ra == rb {
            return false;
        }

        let (winner, loser) = match self.size[ra].cmp(&self.size[rb]) {
            std::cmp::Ordering::Greater => (ra, rb),
            std::cmp::Ordering::Less => (rb, ra),
            std::cmp::Ordering::Equal => {
                if ra < rb {
                    (ra, rb)
                } else {
                    (rb, ra)
                }
            }
        };
        self.parent[loser] = winner;
        self.size[winner] += self.size[loser];
        self.sets -= 1;
        true
    }

    /// Returns `true` if `a` and `b` are known and share a set.
    pub fn same_set(&mut self, a: &T, b: &T) -> bool {
        let (Some(&oa), Some(&ob)) = (self.ordinals.get(a), self.ordinals.get(b)) else {
            return false;
        };
        self.root(oa) == self.root(ob)
    }

    /// Number of elements in the set containing `element`.
    pub fn set_size(&mut self, element: &T) -> Option<usize> {
        let ordinal = *self.ordinals.get(element)?;
        let root = self.root(ordinal);
        Some(self.size[root])
    }

    /// Number of disjoint sets.
    pub fn set_count(&self) -> usize {
        self.sets
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn root(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            let grandparent = self.parent[self.parent[x]];
            self.parent[x] = grandparent;
            x = grandparent;
        }
        x
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn new_creates_singletons() {
        let mut uf = UnionFind::new(0..5);
        for i in 0..5 {
            assert_eq!(
                uf.find(&i),
                Some(i),
                "element {i} should be its own representative"
            );
        }
        assert_eq!(uf.set_count(), 5);
    }

    #[test]
    fn find_unknown_is_none() {
        let mut uf = UnionFind::new(["a", "b"]);
        assert_eq!(uf.find(&"z"), None);
        assert!(!uf.union(&"a", &"z"));
        assert!(!uf.same_set(&"a", &"z"));
    }

    #[test]
    fn union_two_elements_same_set() {
        let mut uf = UnionFind::new(0..4);
        assert!(uf.union(&0, &1));
        assert_eq!(
            uf.find(&0),
            uf.find(&1),
            "after union, elements should share a representative"
        );
        assert!(uf.same_set(&0, &1));
    }

    #[test]
    fn union_does_not_affect_others() {
        let mut uf = UnionFind::new(0..4);
        uf.union(&0, &1);
        assert_ne!(uf.find(&0), uf.find(&2));
        assert_ne!(uf.find(&0), uf.find(&3));
        assert_ne!(uf.find(&2), uf.find(&3));
    }

    #[test]
    fn transitive_closure() {
        let mut uf = UnionFind::new(0..3);
        uf.union(&0, &1);
        uf.union(&1, &2);
        assert!(uf.same_set(&0, &2));
        assert_eq!(uf.set_count(), 1);
    }

    #[test]
    fn deterministic_representative_first_inserted_wins_on_tie() {
        let mut uf = UnionFind::new(["x", "y"]);
        uf.union(&"y", &"x");
        assert_eq!(uf.find(&"y"), Some("x"), "first-inserted x wins the tie");
    }

    #[test]
    fn union_commutativity_same_representative() {
        let mut uf_ab = UnionFind::new(0..2);
        uf_ab.union(&0, &1);
        let rep_ab = uf_ab.find(&0);

        let mut uf_ba = UnionFind::new(0..2);
        uf_ba.union(&1, &0);
        let rep_ba = uf_ba.find(&0);

        assert_eq!(rep_ab, rep_ba, "union must be commutative");
    }

    #[test]
    fn idempotent_union() {
        let mut uf = UnionFind::new(0..3);
        assert!(uf.union(&0, &1));
        let rep_before = uf.find(&0);
        assert!(!uf.union(&0, &1), "second union is a no-op");
        assert_eq!(rep_before, uf.find(&0));
        assert_eq!(uf.set_count(), 2);
    }

    #[test]
    fn union_by_size_larger_set_wins() {
        let mut uf = UnionFind::new(0..4);
        uf.union(&2, &3);
        uf.union(&2, &1);
        uf.union(&0, &2);
        assert_eq!(uf.find(&0), Some(2), "singleton joins the size-3 set");
        assert_eq!(uf.set_size(&0), Some(4));
    }

    #[test]
    fn insert_is_idempotent() {
        let mut uf = UnionFind::new(Vec::<u32>::new());
        assert!(uf.is_empty());
        assert!(uf.insert(7));
        assert!(!uf.insert(7));
        assert_eq!(uf.len(), 1);
    }

    #[test]
    fn large_component_merge() {
        const N: usize = 64;
        let mut uf = UnionFind::new(0..N);
        for i in 1..N {
            uf.union(&0, &i);
        }
        let root = uf.find(&0);
        for i in 0..N {
            assert_eq!(
                uf.find(&i),
                root,
                "element {i} should share the root after merging all into one component"
            );
        }
        assert_eq!(uf.set_size(&(N - 1)), Some(N));
    }
}
