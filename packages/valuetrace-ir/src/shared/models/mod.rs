//! Shared models: single source of truth for the analysis data model

pub mod span;
pub mod symbol;
pub mod syntax;
pub mod verdict;

pub use span::Span;
pub use symbol::{Accessibility, Symbol, SymbolId, SymbolKind, TypeEntry, TypeId};
pub use syntax::{NodeData, NodeId, SyntaxKind, SyntaxTree};
pub use verdict::Verdict;
