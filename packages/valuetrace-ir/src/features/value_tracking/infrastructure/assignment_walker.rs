//! Assignment walker
//!
//! Produces every expression assigned to a symbol within its accessible
//! scope: declaration initializers, simple and compound assignments, and
//! assignments reached through constructor/`base.M()` chains. The walk is a
//! pure read of the tree plus the oracle; oracle misses skip the node and
//! never fail the query.
//!
//! Compound assignments are surfaced as ordinary assignment events
//! contributing their right-hand side; the target's prior value is already
//! in the set through earlier assignments.

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::errors::Result;
use crate::semantic::{CancelToken, SemanticModel};
use crate::shared::models::{NodeId, SymbolId, SymbolKind, SyntaxKind, TypeId};

use super::super::domain::ValueCandidates;

/// Per-query walker over a symbol's assignment sites.
pub struct AssignmentWalker<'a> {
    model: &'a SemanticModel,
    token: CancelToken,
}

impl<'a> AssignmentWalker<'a> {
    pub fn new(model: &'a SemanticModel, token: CancelToken) -> Self {
        Self { model, token }
    }

    /// All expressions assigned to `symbol`, in declaration order.
    ///
    /// A symbol with no reachable declaring syntax yields an empty set, not
    /// an error. A get-only property with no assignment sites yields empty.
    pub fn assigned_values(&self, symbol: SymbolId) -> Result<ValueCandidates> {
        let mut out = ValueCandidates::new();
        let sym = self.model.symbol(symbol);

        match sym.kind {
            SymbolKind::Field | SymbolKind::Property => {
                // The whole containing type is in scope: constructors,
                // methods, accessors, and (for statics) static constructors
                // all live under the type declaration.
                let Some(scope) = self.model.containing_type_decl(symbol) else {
                    return Ok(out);
                };
                let mut visited = FxHashSet::default();
                if let Some(ty) = sym.containing_type {
                    visited.insert(ty);
                }
                self.scan(scope, symbol, &mut out, &mut visited)?;
            }
            SymbolKind::Local | SymbolKind::Parameter => {
                let Some(&decl) = sym.declarations.first() else {
                    return Ok(out);
                };
                if let Some(scope) = self.enclosing_member(decl) {
                    let mut visited = FxHashSet::default();
                    self.scan(scope, symbol, &mut out, &mut visited)?;
                }
            }
            // methods have return values, not assignment sources
            SymbolKind::Method => {}
        }

        trace!(symbol = sym.name.as_str(), count = out.len(), "assignment walk complete");
        Ok(out)
    }

    /// Nearest enclosing executable member of a declaration.
    fn enclosing_member(&self, decl: NodeId) -> Option<NodeId> {
        let tree = self.model.tree();
        tree.ancestors(decl).find(|&a| tree.kind(a).is_body_owner())
    }

    /// Collect assignment sites for `target` under `root`, following
    /// constructor and `base.M()` chains one level at a time. The walk up
    /// the base chain is bounded by the visited-type set (the inheritance
    /// chain is finite and acyclic), not by the recursion guard.
    fn scan(
        &self,
        root: NodeId,
        target: SymbolId,
        out: &mut ValueCandidates,
        visited: &mut FxHashSet<TypeId>,
    ) -> Result<()> {
        let tree = self.model.tree();
        for node in tree.descendants(root) {
            self.token.check()?;
            match tree.kind(node) {
                SyntaxKind::FieldDecl | SyntaxKind::PropertyDecl | SyntaxKind::LocalDecl => {
                    if self.binds_target(node, target) {
                        if let Some(init) = self.declaration_initializer(node) {
                            out.push(init);
                        }
                    }
                }
                SyntaxKind::AssignmentExpr | SyntaxKind::CompoundAssignmentExpr => {
                    let children = tree.children(node);
                    if let (Some(&lhs), Some(&rhs)) = (children.first(), children.get(1)) {
                        if self.lhs_matches(lhs, target) {
                            out.push(rhs);
                        }
                    }
                }
                SyntaxKind::BaseInitializer => {
                    // `: base(...)`: the chained constructor may assign the
                    // same (or overridden) member in the base class.
                    if let Some(chained) = self.model.resolve_symbol(node, &self.token) {
                        self.follow_chained_member(chained, target, out, visited)?;
                    }
                }
                SyntaxKind::InvocationExpr => {
                    if self.is_base_call(node) {
                        if let Some(method) = self.model.resolve_symbol(node, &self.token) {
                            self.follow_chained_member(method, target, out, visited)?;
                        }
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Scan the body of a base-chain member (chained constructor or
    /// `base.M()` target) for assignments to the same member.
    fn follow_chained_member(
        &self,
        member: SymbolId,
        target: SymbolId,
        out: &mut ValueCandidates,
        visited: &mut FxHashSet<TypeId>,
    ) -> Result<()> {
        let sym = self.model.symbol(member);
        if sym.kind != SymbolKind::Method {
            return Ok(());
        }
        match sym.containing_type {
            // `this(...)` chains stay inside an already-scanned type
            Some(ty) if visited.insert(ty) => {}
            _ => return Ok(()),
        }
        if let Some(&decl) = sym.declarations.first() {
            trace!(member = sym.name.as_str(), "following base-chain member");
            self.scan(decl, target, out, visited)?;
        }
        Ok(())
    }

    /// `base.M(...)`: callee is a member access on `base`.
    fn is_base_call(&self, invocation: NodeId) -> bool {
        let tree = self.model.tree();
        let Some(&callee) = tree.children(invocation).first() else {
            return false;
        };
        if tree.kind(callee) != SyntaxKind::MemberAccessExpr {
            return false;
        }
        tree.children(callee)
            .first()
            .map_or(false, |&receiver| tree.kind(receiver) == SyntaxKind::BaseExpr)
    }

    /// Whether the assignment target resolves to the tracked symbol.
    ///
    /// Resolution goes through the member-access name part, so `this.x`,
    /// `x`, and an access through another instance all normalize to the same
    /// member symbol. Receiver-insensitive on purpose (sound toward
    /// "maybe"). Override equality along the base chain counts as a match.
    fn lhs_matches(&self, lhs: NodeId, target: SymbolId) -> bool {
        match self.model.resolve_symbol(lhs, &self.token) {
            Some(sym) => self.model.symbols_match(sym, target),
            None => false,
        }
    }

    fn binds_target(&self, decl: NodeId, target: SymbolId) -> bool {
        match self.model.resolve_symbol(decl, &self.token) {
            Some(sym) => self.model.symbols_match(sym, target),
            None => false,
        }
    }

    /// The `= expr` initializer directly under a declaration node, if any.
    /// Accessor children of a property are not initializers.
    fn declaration_initializer(&self, decl: NodeId) -> Option<NodeId> {
        let tree = self.model.tree();
        tree.children(decl)
            .iter()
            .copied()
            .find(|&c| tree.kind(c).is_expression())
    }
}
