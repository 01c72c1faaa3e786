//! Origin classification queries
//!
//! Composes the value-tracking resolver with the leaf decision table: the
//! resolver discovers the terminal roots a symbol's value can come from, and
//! each root is voted through the table, folded with
//! `Verdict::from_votes` (agreement keeps the verdict, disagreement with a
//! `Yes` escalates to `Maybe`).
//!
//! Every query constructs its walkers fresh and shares no mutable state, so
//! concurrent invocations over the same model are safe.

use tracing::debug;

use crate::errors::Result;
use crate::features::value_tracking::infrastructure::{
    AssignmentWalker, RecursiveValues, ReturnWalker,
};
use crate::features::value_tracking::{member_path, ValueCandidates};
use crate::semantic::{CancelToken, SemanticModel};
use crate::shared::models::{NodeId, SymbolId, SymbolKind, SyntaxKind, Verdict};
use crate::shared::utils::RecursionGuard;

use super::super::domain::injectedness;

/// Is this symbol's value externally supplied (injected).
///
/// Votes are the symbol's own settability (a non-private setter is an
/// injection source in itself) plus the classification of every resolved
/// terminal root of its assigned values. A symbol nothing assigns to and
/// nothing can set from outside is `No` vacuously.
pub fn classify_origin(
    symbol: SymbolId,
    model: &SemanticModel,
    token: &CancelToken,
) -> Result<Verdict> {
    token.check()?;
    let mut votes = Vec::new();

    let leaf = injectedness(model.symbol(symbol))?;
    if leaf.is_either(Verdict::Yes, Verdict::Maybe) {
        votes.push(leaf);
    }

    let roots = resolved_roots(symbol, model, token)?;
    for root in roots.iter() {
        votes.push(root_vote(model, root, token)?);
    }

    let verdict = Verdict::from_votes(votes);
    debug!(symbol, roots = roots.len(), ?verdict, "origin classified");
    Ok(verdict)
}

/// Is this symbol assigned only with freshly created values, and never also
/// cached or injected elsewhere.
pub fn classify_freshness(
    symbol: SymbolId,
    model: &SemanticModel,
    token: &CancelToken,
) -> Result<bool> {
    if classify_origin(symbol, model, token)? != Verdict::No {
        return Ok(false);
    }
    let created = creation_fold(symbol, model, token)?;
    Ok(created.is_either(Verdict::Yes, Verdict::Maybe))
}

/// Is this symbol assigned with created values on some paths and injected
/// values on others. A member that sometimes owns its value and sometimes
/// does not is the strongest "do not dispose here" signal.
pub fn classify_created_and_injected(
    symbol: SymbolId,
    model: &SemanticModel,
    token: &CancelToken,
) -> Result<bool> {
    let injected = classify_origin(symbol, model, token)?;
    if !injected.is_either(Verdict::Yes, Verdict::Maybe) {
        return Ok(false);
    }
    let created = creation_fold(symbol, model, token)?;
    Ok(created.is_either(Verdict::Yes, Verdict::Maybe))
}

/// Can this expression's value be cached in a member or have been injected.
///
/// Entry point for rules inspecting an arbitrary expression (typically the
/// receiver of a cleanup call) rather than a declared symbol. A chain rooted
/// in a directly injected symbol short-circuits to `Yes`; an unrooted chain
/// (hanging off a literal or other sub-expression) is `Unknown`.
pub fn classify_cached_or_injected(
    expr: NodeId,
    model: &SemanticModel,
    token: &CancelToken,
) -> Result<Verdict> {
    token.check()?;
    let mut votes = Vec::new();

    match member_path::root_of(model, expr, token) {
        Some(root) => {
            let sym = model.symbol(root);
            if sym.kind != SymbolKind::Method {
                let leaf = injectedness(sym)?;
                if leaf == Verdict::Yes {
                    return Ok(Verdict::Yes);
                }
                if leaf == Verdict::Maybe {
                    votes.push(leaf);
                }
            }
        }
        None => {
            let kind = model.tree().kind(expr);
            if matches!(
                kind,
                SyntaxKind::IdentifierName
                    | SyntaxKind::MemberAccessExpr
                    | SyntaxKind::InvocationExpr
            ) {
                // a chain we cannot root cannot be traced
                return Ok(Verdict::Unknown);
            }
        }
    }

    let seeds: ValueCandidates = [expr].into_iter().collect();
    let roots = RecursiveValues::new(&seeds, model, token.clone()).resolve_all()?;
    for root in roots.iter() {
        votes.push(root_vote(model, root, token)?);
    }
    Ok(Verdict::from_votes(votes))
}

/// Vote of a single terminal root: creations and literals are never
/// injected, resolvable references go through the table, anything opaque
/// stays `Unknown`.
fn root_vote(model: &SemanticModel, root: NodeId, token: &CancelToken) -> Result<Verdict> {
    match model.tree().kind(root) {
        SyntaxKind::ObjectCreationExpr | SyntaxKind::LiteralExpr => Ok(Verdict::No),
        _ => match model.resolve_symbol(root, token) {
            Some(symbol) if model.symbol(symbol).kind == SymbolKind::Method => {
                Ok(Verdict::Unknown)
            }
            Some(symbol) => injectedness(model.symbol(symbol)),
            None => Ok(Verdict::Unknown),
        },
    }
}

/// Whether a single terminal root is a freshly constructed value.
fn creationness(model: &SemanticModel, root: NodeId, token: &CancelToken) -> Verdict {
    match model.tree().kind(root) {
        SyntaxKind::ObjectCreationExpr => Verdict::Yes,
        SyntaxKind::LiteralExpr => Verdict::No,
        _ => match model.resolve_symbol(root, token) {
            // a reference that still resolves is handed in, not constructed
            Some(_) => Verdict::No,
            None => Verdict::Unknown,
        },
    }
}

fn creation_fold(symbol: SymbolId, model: &SemanticModel, token: &CancelToken) -> Result<Verdict> {
    let roots = resolved_roots(symbol, model, token)?;
    let votes: Vec<Verdict> = roots
        .iter()
        .map(|root| creationness(model, root, token))
        .collect();
    Ok(Verdict::from_votes(votes))
}

/// Terminal roots of everything assigned to (or returned for) the symbol.
fn resolved_roots(
    symbol: SymbolId,
    model: &SemanticModel,
    token: &CancelToken,
) -> Result<ValueCandidates> {
    let mut seeds =
        AssignmentWalker::new(model, token.clone()).assigned_values(symbol)?;

    // a computed property's value flows out of its getter
    let sym = model.symbol(symbol);
    if sym.kind == SymbolKind::Property && !model.is_auto_property(symbol) {
        if let Some(getter) = model.getter_of(symbol) {
            let mut guard = RecursionGuard::new();
            let returns =
                ReturnWalker::new(model, token.clone()).return_values(getter, false, &mut guard)?;
            returns.extend_into(&mut seeds);
        }
    }

    RecursiveValues::new(&seeds, model, token.clone()).resolve_all()
}
