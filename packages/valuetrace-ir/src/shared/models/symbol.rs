//! Bound symbol model
//!
//! Symbols are the stable identities the semantic oracle hands out for
//! declared program entities. The core consumes them read-only and compares
//! them by id; it never mutates or re-binds a symbol.

use serde::{Deserialize, Serialize};

use super::syntax::NodeId;

/// Symbol identifier (index into the model's symbol table)
pub type SymbolId = u32;

/// Type identifier (index into the model's type table)
pub type TypeId = u32;

/// Declared accessibility of a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Accessibility {
    Private,
    Internal,
    Protected,
    Public,
}

impl Accessibility {
    pub fn is_private(self) -> bool {
        matches!(self, Accessibility::Private)
    }
}

/// Kind of declared entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    Field,
    Property,
    Parameter,
    Local,
    Method,
}

/// A bound symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Symbol {
    pub id: SymbolId,
    pub name: String,
    pub kind: SymbolKind,
    pub accessibility: Accessibility,
    pub is_static: bool,
    /// `readonly` field or get-only property
    pub is_readonly: bool,
    /// For properties: accessibility of the setter, `None` when there is no
    /// setter at all. Ignored for other kinds.
    pub setter_accessibility: Option<Accessibility>,
    /// Containing type, absent for locals/parameters of free functions
    pub containing_type: Option<TypeId>,
    /// Declaring syntax locations; empty for external/metadata symbols
    pub declarations: Vec<NodeId>,
    /// The base-chain member this symbol overrides, if any
    pub overridden: Option<SymbolId>,
}

impl Symbol {
    /// Whether this property has a setter (always false for non-properties).
    pub fn has_setter(&self) -> bool {
        self.kind == SymbolKind::Property && self.setter_accessibility.is_some()
    }
}

/// Entry in the model's type table.
///
/// The base chain is finite and acyclic by language rule; base-call
/// traversal is bounded by it rather than by the recursion guard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeEntry {
    pub id: TypeId,
    pub name: String,
    pub base: Option<TypeId>,
    /// Declaring syntax of the type, absent for external types
    pub decl: Option<NodeId>,
    pub is_sealed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessibility_private() {
        assert!(Accessibility::Private.is_private());
        assert!(!Accessibility::Public.is_private());
        assert!(!Accessibility::Internal.is_private());
    }

    #[test]
    fn test_has_setter_only_for_properties() {
        let mut sym = Symbol {
            id: 0,
            name: "Value".to_string(),
            kind: SymbolKind::Property,
            accessibility: Accessibility::Public,
            is_static: false,
            is_readonly: false,
            setter_accessibility: Some(Accessibility::Public),
            containing_type: None,
            declarations: Vec::new(),
            overridden: None,
        };
        assert!(sym.has_setter());

        sym.kind = SymbolKind::Field;
        assert!(!sym.has_setter());
    }
}
