//! Value candidate sets
//!
//! Ordered, deduplicated sequences of expression nodes representing the
//! possible values of a symbol or the possible results of a member. Order
//! follows declaration order; a node revisited through a different path is
//! suppressed. Iteration is restartable, so consumers can stop at the first
//! confident answer and rules can re-run the same set.

use rustc_hash::FxHashSet;

use crate::shared::models::NodeId;

/// Ordered, deduplicated set of candidate expression nodes.
#[derive(Debug, Clone, Default)]
pub struct ValueCandidates {
    values: Vec<NodeId>,
    seen: FxHashSet<NodeId>,
}

impl ValueCandidates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a candidate; returns `false` when it was already present.
    pub fn push(&mut self, node: NodeId) -> bool {
        if self.seen.insert(node) {
            self.values.push(node);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.seen.contains(&node)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<NodeId> {
        self.values.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.values.iter().copied()
    }

    /// Move the collected values into another set, preserving order.
    pub fn extend_into(&self, other: &mut ValueCandidates) {
        for value in self.iter() {
            other.push(value);
        }
    }
}

impl FromIterator<NodeId> for ValueCandidates {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        let mut set = Self::new();
        for node in iter {
            set.push(node);
        }
        set
    }
}

impl<'a> IntoIterator for &'a ValueCandidates {
    type Item = NodeId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, NodeId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_order() {
        let set: ValueCandidates = [3, 1, 2].into_iter().collect();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![3, 1, 2]);
    }

    #[test]
    fn test_deduplicates() {
        let mut set = ValueCandidates::new();
        assert!(set.push(5));
        assert!(!set.push(5));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_restartable_iteration() {
        let set: ValueCandidates = [1, 2].into_iter().collect();
        let first: Vec<_> = set.iter().take(1).collect();
        let second: Vec<_> = set.iter().collect();
        assert_eq!(first, vec![1]);
        assert_eq!(second, vec![1, 2]);
    }
}
