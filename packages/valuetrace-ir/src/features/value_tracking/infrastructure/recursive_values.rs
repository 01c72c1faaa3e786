//! Recursive value resolution: the fixpoint engine
//!
//! Feeds the assignment walker and the return-value walker into each other
//! until no new candidate is discovered: an assigned value that is itself a
//! symbol reference is re-resolved to that symbol's assignments, a returned
//! value that is a call is re-resolved to the callee's return values, and so
//! on down to terminal roots (literals, object creations, parameters,
//! opaque externals).
//!
//! Iteration is lazy and restartable: `try_next` expands just enough of the
//! work queue to produce the next terminal, and `reset` replays already
//! discovered terminals before expanding further. The recursion guard is
//! owned here and passed `&mut` into nested walker recursion; dedup plus the
//! guard bound the walk on cyclic reference graphs to one repeated cycle.
//!
//! The resolver only discovers roots; it never classifies them.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::errors::Result;
use crate::semantic::{CancelToken, SemanticModel};
use crate::shared::models::{NodeId, SymbolKind, SyntaxKind};
use crate::shared::utils::RecursionGuard;

use super::super::domain::ValueCandidates;
use super::assignment_walker::AssignmentWalker;
use super::return_walker::ReturnWalker;

/// Lazily expanding transitive closure of value roots.
pub struct RecursiveValues<'a> {
    model: &'a SemanticModel,
    token: CancelToken,
    queue: VecDeque<NodeId>,
    seen: FxHashSet<NodeId>,
    terminals: Vec<NodeId>,
    cursor: usize,
    guard: RecursionGuard,
}

impl<'a> RecursiveValues<'a> {
    pub fn new(initial: &ValueCandidates, model: &'a SemanticModel, token: CancelToken) -> Self {
        let mut seen = FxHashSet::default();
        let mut queue = VecDeque::new();
        for node in initial.iter() {
            if seen.insert(node) {
                queue.push_back(node);
            }
        }
        Self {
            model,
            token,
            queue,
            seen,
            terminals: Vec::new(),
            cursor: 0,
            guard: RecursionGuard::new(),
        }
    }

    /// Next terminal root, expanding the frontier as needed.
    pub fn try_next(&mut self) -> Result<Option<NodeId>> {
        if self.cursor < self.terminals.len() {
            let node = self.terminals[self.cursor];
            self.cursor += 1;
            return Ok(Some(node));
        }
        while let Some(node) = self.queue.pop_front() {
            self.token.check()?;
            if self.expand(node)? {
                self.terminals.push(node);
                self.cursor += 1;
                return Ok(Some(node));
            }
        }
        Ok(None)
    }

    /// Restart iteration over the terminals discovered so far; further
    /// `try_next` calls continue expanding where the queue left off.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Number of terminals discovered so far.
    pub fn discovered(&self) -> usize {
        self.terminals.len()
    }

    /// Run to fixpoint and collect every terminal root.
    pub fn resolve_all(&mut self) -> Result<ValueCandidates> {
        self.reset();
        let mut out = ValueCandidates::new();
        while let Some(node) = self.try_next()? {
            out.push(node);
        }
        Ok(out)
    }

    fn enqueue(&mut self, values: &ValueCandidates) {
        for value in values.iter() {
            if self.seen.insert(value) {
                self.queue.push_back(value);
            }
        }
    }

    /// Expand one candidate. `Ok(true)` marks it terminal; `Ok(false)`
    /// means its sources (if any) were enqueued instead.
    fn expand(&mut self, node: NodeId) -> Result<bool> {
        let kind = self.model.tree().kind(node);
        match kind {
            // terminal values
            SyntaxKind::LiteralExpr | SyntaxKind::ObjectCreationExpr => Ok(true),

            SyntaxKind::IdentifierName | SyntaxKind::MemberAccessExpr => {
                let Some(symbol) = self.model.resolve_symbol(node, &self.token) else {
                    // unknown input: keep the node, classification folds it
                    // into the conservative answer
                    return Ok(true);
                };
                match self.model.symbol(symbol).kind {
                    // parameters are opaque inputs; classify at this
                    // boundary, never chase call sites
                    SymbolKind::Parameter => Ok(true),
                    SymbolKind::Local | SymbolKind::Field | SymbolKind::Property => {
                        if !self.guard.push(node) {
                            debug!(node, "recursion guard stopped expansion");
                            return Ok(false);
                        }
                        self.expand_symbol(node, symbol)?;
                        Ok(false)
                    }
                    // a bare method-group reference has no further sources
                    SymbolKind::Method => Ok(true),
                }
            }

            SyntaxKind::InvocationExpr => match self.callee_body(node) {
                Some(decl) => {
                    if !self.guard.push(node) {
                        debug!(node, "recursion guard stopped call expansion");
                        return Ok(false);
                    }
                    let walker = ReturnWalker::new(self.model, self.token.clone());
                    let returns = walker.return_values(decl, true, &mut self.guard)?;
                    trace!(node, returned = returns.len(), "expanded invocation");
                    self.enqueue(&returns);
                    Ok(false)
                }
                // call into code we cannot see: terminal
                None => Ok(true),
            },

            // anything else is kept as-is rather than guessed at
            _ => Ok(true),
        }
    }

    /// Enqueue the assignment sources of a field/property/local reference,
    /// plus the getter's return values for a computed property.
    fn expand_symbol(&mut self, node: NodeId, symbol: crate::shared::models::SymbolId) -> Result<()> {
        let assignments =
            AssignmentWalker::new(self.model, self.token.clone()).assigned_values(symbol)?;
        trace!(node, assigned = assignments.len(), "expanded symbol reference");
        self.enqueue(&assignments);

        let sym = self.model.symbol(symbol);
        if sym.kind == SymbolKind::Property && !self.model.is_auto_property(symbol) {
            if let Some(getter) = self.model.getter_of(symbol) {
                let returns = ReturnWalker::new(self.model, self.token.clone())
                    .return_values(getter, true, &mut self.guard)?;
                self.enqueue(&returns);
            }
        }
        Ok(())
    }

    /// Declaration of a resolvable callee with a visible body.
    fn callee_body(&self, invocation: NodeId) -> Option<NodeId> {
        let symbol = self.model.resolve_symbol(invocation, &self.token)?;
        let sym = self.model.symbol(symbol);
        if sym.kind != SymbolKind::Method {
            return None;
        }
        let &decl = sym.declarations.first()?;
        self.model.body_of(decl).map(|_| decl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::SemanticBuilder;
    use crate::shared::models::Accessibility;

    fn resolve_all(model: &SemanticModel, seeds: &[NodeId]) -> Vec<NodeId> {
        let initial: ValueCandidates = seeds.iter().copied().collect();
        RecursiveValues::new(&initial, model, CancelToken::none())
            .resolve_all()
            .expect("resolution must not fail")
            .iter()
            .collect()
    }

    #[test]
    fn test_literal_and_creation_are_terminal() {
        let mut builder = SemanticBuilder::new();
        let lit = builder.literal("1");
        let ty = builder.external_type("Widget");
        let creation = builder.object_creation(ty);
        let model = builder.finish();

        assert_eq!(resolve_all(&model, &[lit, creation]), vec![lit, creation]);
    }

    #[test]
    fn test_field_reference_resolves_to_assignments() {
        let mut builder = SemanticBuilder::new();
        let ty = builder.class("C");
        let field = builder.field(ty, "value", Accessibility::Private, false, true);
        let (ctor, block) = builder.constructor(ty);
        let param = builder.parameter(ctor, "value");
        let lhs = builder.this_member(field);
        let rhs = builder.identifier(param);
        builder.assign(block, lhs, rhs);

        // reading the field elsewhere resolves to the ctor parameter
        let read = builder.this_member(field);
        let model = builder.finish();

        assert_eq!(resolve_all(&model, &[read]), vec![rhs]);
    }

    #[test]
    fn test_local_chain_resolves_through() {
        let mut builder = SemanticBuilder::new();
        let ty = builder.class("C");
        let (method, block) = builder.method(ty, "Run", Accessibility::Public, false);
        let param = builder.parameter(method, "input");
        let init = builder.identifier(param);
        let local = builder.local(block, "x", Some(init));
        let read = builder.identifier(local);
        let model = builder.finish();

        // x -> input parameter (terminal)
        assert_eq!(resolve_all(&model, &[read]), vec![init]);
    }

    #[test]
    fn test_invocation_resolves_to_return_values() {
        let mut builder = SemanticBuilder::new();
        let ty = builder.class("C");
        let widget = builder.external_type("Widget");
        let creation = builder.object_creation(widget);
        let factory = builder.method_expr(ty, "Create", Accessibility::Private, creation);
        let call = builder.call_method(factory, vec![]);
        let model = builder.finish();

        assert_eq!(resolve_all(&model, &[call]), vec![creation]);
    }

    #[test]
    fn test_self_referential_getter_contributes_nothing() {
        let mut builder = SemanticBuilder::new();
        let ty = builder.class("C");
        let (prop, getter) = builder.computed_property(ty, "Recursive", Accessibility::Public);
        let self_read = builder.this_member(prop);
        builder.getter_returns(getter, self_read);
        let model = builder.finish();

        // the cycle is detected and the branch ends as a leaf: no terminals
        assert!(resolve_all(&model, &[self_read]).is_empty());
    }

    #[test]
    fn test_mutually_recursive_getters_terminate() {
        let mut builder = SemanticBuilder::new();
        let ty = builder.class("C");
        let (p, p_getter) = builder.computed_property(ty, "P", Accessibility::Public);
        let (q, q_getter) = builder.computed_property(ty, "Q", Accessibility::Public);
        let read_q = builder.this_member(q);
        builder.getter_returns(p_getter, read_q);
        let read_p = builder.this_member(p);
        builder.getter_returns(q_getter, read_p);
        let model = builder.finish();

        assert!(resolve_all(&model, &[read_q]).is_empty());
        let _ = p;
    }

    #[test]
    fn test_branches_contribute_both_candidates() {
        let mut builder = SemanticBuilder::new();
        let ty = builder.class("C");
        let field = builder.field(ty, "value", Accessibility::Private, false, false);
        let widget = builder.external_type("Widget");

        let (ctor_a, block_a) = builder.constructor(ty);
        let param = builder.parameter(ctor_a, "value");
        let lhs_a = builder.this_member(field);
        let rhs_a = builder.identifier(param);
        builder.assign(block_a, lhs_a, rhs_a);

        let (_ctor_b, block_b) = builder.constructor(ty);
        let lhs_b = builder.this_member(field);
        let rhs_b = builder.object_creation(widget);
        builder.assign(block_b, lhs_b, rhs_b);

        let read = builder.identifier(field);
        let model = builder.finish();

        assert_eq!(resolve_all(&model, &[read]), vec![rhs_a, rhs_b]);
    }

    #[test]
    fn test_restartable_iteration() {
        let mut builder = SemanticBuilder::new();
        let a = builder.literal("1");
        let b = builder.literal("2");
        let model = builder.finish();

        let initial: ValueCandidates = [a, b].into_iter().collect();
        let mut recursive = RecursiveValues::new(&initial, &model, CancelToken::none());

        assert_eq!(recursive.try_next().unwrap(), Some(a));
        recursive.reset();
        assert_eq!(recursive.try_next().unwrap(), Some(a));
        assert_eq!(recursive.try_next().unwrap(), Some(b));
        assert_eq!(recursive.try_next().unwrap(), None);
        assert_eq!(recursive.discovered(), 2);
    }

    #[test]
    fn test_cancellation_unwinds_without_result() {
        let mut builder = SemanticBuilder::new();
        let lit = builder.literal("1");
        let model = builder.finish();

        let token = CancelToken::new();
        token.cancel();
        let initial: ValueCandidates = [lit].into_iter().collect();
        let mut recursive = RecursiveValues::new(&initial, &model, token);
        assert!(recursive.try_next().is_err());
    }

    #[test]
    fn test_unresolved_identifier_is_terminal() {
        let mut builder = SemanticBuilder::new();
        let unknown = builder.unresolved_identifier("external");
        let model = builder.finish();

        assert_eq!(resolve_all(&model, &[unknown]), vec![unknown]);
    }
}
