/*
 * Valuetrace IR - Semantic Data-Flow Core
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (Verdict, SyntaxTree, Symbol, Span) and utils
 * - semantic/    : Compiler-oracle facade (SemanticModel, builder, cancellation)
 * - features/    : Vertical slices (value_tracking → classification)
 *
 * Given a symbol and a bound syntax tree, the crate answers: what expressions
 * can this symbol's value come from, and does that value originate from an
 * injected dependency, a fresh creation, or something ambiguous. Walks are
 * query-scoped, deterministic, cycle-bounded, and cooperatively cancellable.
 */

#![allow(clippy::collapsible_if)] // Readability over brevity
#![allow(clippy::match_like_matches_macro)] // Match for readability
#![allow(clippy::new_without_default)] // Default impl not always needed

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Compiler oracle facade
pub mod semantic;

/// Feature modules (value tracking, classification)
pub mod features;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use errors::{Result, TraceError};
pub use features::classification::{
    classify_cached_or_injected, classify_created_and_injected, classify_freshness,
    classify_origin, injectedness,
};
pub use features::value_tracking::{
    member_path, AssignmentWalker, RecursiveValues, ReturnWalker, ValueCandidates,
};
pub use semantic::{CancelToken, SemanticBuilder, SemanticModel};
pub use shared::models::{
    Accessibility, NodeId, Span, Symbol, SymbolId, SymbolKind, SyntaxKind, SyntaxTree, TypeId,
    Verdict,
};
pub use shared::utils::RecursionGuard;
