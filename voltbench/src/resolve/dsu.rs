//! Disjoint-set forest over [`NodeKey`]s.
//!
//! Keys register lazily on first `find`, so callers never pre-declare the
//! universe. `union(a, b)` always parents `b`'s representative under `a`'s;
//! the resulting representative choice is reproducible, which the naming
//! pass depends on. No size or rank heuristics.

use std::collections::HashMap;

use super::ident::NodeKey;

/// Ephemeral union-find structure, rebuilt on every resolution pass.
#[derive(Debug, Default)]
pub struct DisjointSet {
    parent: HashMap<NodeKey, NodeKey>,
}

impl DisjointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Representative of `key`'s set, registering a singleton on first sight.
    /// Applies full path compression.
    pub fn find(&mut self, key: &NodeKey) -> NodeKey {
        if !self.parent.contains_key(key) {
            self.parent.insert(key.clone(), key.clone());
            return key.clone();
        }

        let mut root = key.clone();
        loop {
            let up = self.parent[&root].clone();
            if up == root {
                break;
            }
            root = up;
        }

        let mut cursor = key.clone();
        while cursor != root {
            let next = self.parent[&cursor].clone();
            self.parent.insert(cursor, root.clone());
            cursor = next;
        }

        root
    }

    /// Merge the sets containing `a` and `b`; `a`'s representative becomes
    /// the parent. No-op when already joined.
    pub fn union(&mut self, a: &NodeKey, b: &NodeKey) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            self.parent.insert(rb, ra);
        }
    }

    /// Whether two keys currently share a set.
    pub fn connected(&mut self, a: &NodeKey, b: &NodeKey) -> bool {
        self.find(a) == self.find(b)
    }
}
