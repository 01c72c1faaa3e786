//! Semantic model: the read-only oracle boundary
//!
//! Maps syntax nodes to bound symbols and types, and symbols back to their
//! declaring syntax. The model is immutable once built and is shared across
//! concurrent queries; every lookup is side-effect-free.
//!
//! Lookup failures are data, not errors: a node with no binding resolves to
//! `None` and the caller folds that into the most conservative answer.

use rustc_hash::FxHashMap;

use crate::shared::models::{
    NodeId, Symbol, SymbolId, SymbolKind, SyntaxKind, SyntaxTree, TypeEntry, TypeId,
};

use super::cancel::CancelToken;

/// Bound tree plus symbol/type tables.
#[derive(Debug, Clone, Default)]
pub struct SemanticModel {
    pub(crate) tree: SyntaxTree,
    pub(crate) symbols: Vec<Symbol>,
    pub(crate) types: Vec<TypeEntry>,
    pub(crate) bindings: FxHashMap<NodeId, SymbolId>,
    pub(crate) type_bindings: FxHashMap<NodeId, TypeId>,
}

impl SemanticModel {
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id as usize]
    }

    pub fn type_entry(&self, id: TypeId) -> &TypeEntry {
        &self.types[id as usize]
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    /// Resolve the symbol a node refers to, if any.
    ///
    /// Member accesses resolve through their name part, invocations through
    /// their callee; `this.x` and `x` therefore resolve identically.
    pub fn resolve_symbol(&self, node: NodeId, token: &CancelToken) -> Option<SymbolId> {
        if token.is_cancelled() {
            return None;
        }
        if let Some(&sym) = self.bindings.get(&node) {
            return Some(sym);
        }
        match self.tree.kind(node) {
            SyntaxKind::MemberAccessExpr => {
                let name = self.tree.children(node).get(1).copied()?;
                self.resolve_symbol(name, token)
            }
            SyntaxKind::InvocationExpr => {
                let callee = self.tree.children(node).first().copied()?;
                self.resolve_symbol(callee, token)
            }
            _ => None,
        }
    }

    /// Resolve the type of an expression node, if known.
    pub fn resolve_type(&self, node: NodeId, token: &CancelToken) -> Option<TypeId> {
        if token.is_cancelled() {
            return None;
        }
        self.type_bindings.get(&node).copied()
    }

    /// Declaring syntax locations of a symbol; empty for external symbols.
    pub fn declaring_syntax(&self, symbol: SymbolId) -> &[NodeId] {
        &self.symbol(symbol).declarations
    }

    /// Identity or override equality along the base chain.
    ///
    /// Walks the (finite, acyclic) `overridden` chain in both directions;
    /// never consults the recursion guard.
    pub fn symbols_match(&self, a: SymbolId, b: SymbolId) -> bool {
        if a == b {
            return true;
        }
        self.override_chain_reaches(a, b) || self.override_chain_reaches(b, a)
    }

    fn override_chain_reaches(&self, from: SymbolId, to: SymbolId) -> bool {
        let mut current = self.symbol(from).overridden;
        while let Some(next) = current {
            if next == to {
                return true;
            }
            current = self.symbol(next).overridden;
        }
        false
    }

    /// Declaring syntax of the symbol's containing type, if available.
    pub fn containing_type_decl(&self, symbol: SymbolId) -> Option<NodeId> {
        let ty = self.symbol(symbol).containing_type?;
        self.type_entry(ty).decl
    }

    /// The get-accessor node of a property symbol, if declared.
    pub fn getter_of(&self, symbol: SymbolId) -> Option<NodeId> {
        let sym = self.symbol(symbol);
        if sym.kind != SymbolKind::Property {
            return None;
        }
        sym.declarations.iter().find_map(|&decl| {
            if self.tree.kind(decl) == SyntaxKind::PropertyDecl {
                self.tree.child_of_kind(decl, SyntaxKind::GetAccessor)
            } else {
                None
            }
        })
    }

    /// An auto-property's accessors have no bodies; assignments observed
    /// through the property symbol cover its synthesized backing storage,
    /// and no separate backing-field symbol ever surfaces.
    pub fn is_auto_property(&self, symbol: SymbolId) -> bool {
        match self.getter_of(symbol) {
            Some(getter) => self.body_of(getter).is_none(),
            None => false,
        }
    }

    /// Executable body of a member or lambda: its block, or the single
    /// expression of an expression-bodied member. `None` for abstract and
    /// auto-generated members.
    pub fn body_of(&self, owner: NodeId) -> Option<NodeId> {
        for &child in self.tree.children(owner) {
            let kind = self.tree.kind(child);
            if kind == SyntaxKind::Block {
                return Some(child);
            }
            if kind.is_expression() {
                return Some(child);
            }
        }
        None
    }
}
