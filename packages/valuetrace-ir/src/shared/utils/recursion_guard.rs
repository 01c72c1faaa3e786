//! Recursion guard for traversal stacks
//!
//! Bounds mutual recursion between the assignment and return-value walkers.
//! The guard records every node the fixpoint engine is about to expand; when
//! the top of the stack starts repeating with any period (a suffix like
//! `.. a b a b`), further expansion along that path yields no new
//! information and the caller must treat the branch as a leaf.
//!
//! The stack is a plain value owned by the driving query and passed `&mut`
//! into nested expansion; no shared state between walker instances.

use crate::shared::models::NodeId;

/// Stack of nodes visited by nested walker invocations.
#[derive(Debug, Default)]
pub struct RecursionGuard {
    nodes: Vec<NodeId>,
}

impl RecursionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `node` as about to be expanded.
    ///
    /// Returns `false` when the stack suffix now repeats, i.e. expanding
    /// `node` would add no new information. The caller must then stop
    /// expanding that branch; this is an expected outcome, not an error.
    pub fn push(&mut self, node: NodeId) -> bool {
        self.nodes.push(node);
        !self.is_repeating()
    }

    pub fn depth(&self) -> usize {
        self.nodes.len()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Suffix-period detection: find the smallest period whose last two
    /// occurrences match element-wise. A period of 1 catches `.. a a`,
    /// longer periods catch `.. a b a b` and so on. Bounded by half the
    /// stack depth, so one full repeated cycle is the most the stack can
    /// grow before expansion halts.
    fn is_repeating(&self) -> bool {
        if self.nodes.len() < 2 {
            return false;
        }

        let mut period = 1;
        while !self.equals_at_offset(0, period) {
            if period >= self.nodes.len() / 2 {
                return false;
            }
            period += 1;
        }

        for start in 1..period {
            if !self.equals_at_offset(start, period) {
                return false;
            }
        }

        true
    }

    /// Compare the element `start` positions below the top with the element
    /// one `period` further down.
    fn equals_at_offset(&self, start: usize, period: usize) -> bool {
        let top = self.nodes.len() - 1;
        self.nodes[top - start] == self.nodes[top - start - period]
    }
}
