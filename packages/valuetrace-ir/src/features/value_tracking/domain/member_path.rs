//! Member-path resolution
//!
//! Decomposes a chained member access (`a.b.c`, `this.a.b`) into its root
//! symbol and the ordered list of member names. `this.`/`base.` qualifiers
//! are semantically equivalent to the unqualified form and normalize away.
//! A chain hanging off an arbitrary sub-expression (a call result, a
//! literal) is unrooted: resolution fails gracefully with `None`.

use crate::semantic::{CancelToken, SemanticModel};
use crate::shared::models::{NodeId, SymbolId, SyntaxKind};

/// Leftmost named expression of a member-access chain, qualifiers stripped.
///
/// For `this.a.b` this is the `a` identifier node; for a bare identifier it
/// is the node itself. `None` when the chain is unrooted.
pub fn root_expr(model: &SemanticModel, node: NodeId) -> Option<NodeId> {
    let tree = model.tree();
    let mut current = node;
    loop {
        match tree.kind(current) {
            SyntaxKind::IdentifierName => return Some(current),
            SyntaxKind::MemberAccessExpr => {
                let receiver = tree.children(current).first().copied()?;
                match tree.kind(receiver) {
                    // `this.a`, `base.a`: the qualifier is a no-op, the
                    // first member is the root.
                    SyntaxKind::ThisExpr | SyntaxKind::BaseExpr => {
                        return tree.children(current).get(1).copied();
                    }
                    _ => current = receiver,
                }
            }
            SyntaxKind::InvocationExpr => {
                current = tree.children(current).first().copied()?;
            }
            _ => return None,
        }
    }
}

/// Root symbol of a member-access chain, if the chain is rooted and bound.
pub fn root_of(model: &SemanticModel, node: NodeId, token: &CancelToken) -> Option<SymbolId> {
    let root = root_expr(model, node)?;
    model.resolve_symbol(root, token)
}

/// Ordered member names from root to leaf, `this.`/`base.` stripped.
pub fn path_of(model: &SemanticModel, node: NodeId) -> Vec<String> {
    let mut path = Vec::new();
    collect(model, node, &mut path);
    path
}

fn collect(model: &SemanticModel, node: NodeId, out: &mut Vec<String>) {
    let tree = model.tree();
    match tree.kind(node) {
        SyntaxKind::IdentifierName => {
            if let Some(text) = tree.text(node) {
                out.push(text.to_string());
            }
        }
        SyntaxKind::MemberAccessExpr => {
            if let Some(&receiver) = tree.children(node).first() {
                collect(model, receiver, out);
            }
            if let Some(&name) = tree.children(node).get(1) {
                collect(model, name, out);
            }
        }
        SyntaxKind::InvocationExpr => {
            if let Some(&callee) = tree.children(node).first() {
                collect(model, callee, out);
            }
        }
        // qualifiers and unrooted sub-expressions contribute no path step
        _ => {}
    }
}
