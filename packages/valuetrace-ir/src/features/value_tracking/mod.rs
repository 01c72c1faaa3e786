//! Value tracking: where does a symbol's value come from
//!
//! The walkers answer the two local questions (what gets assigned to a
//! symbol, what can a body return) and the recursive resolver closes them
//! transitively into the set of terminal value roots.

pub mod domain;
pub mod infrastructure;

pub use domain::{member_path, ValueCandidates};
pub use infrastructure::{AssignmentWalker, RecursiveValues, ReturnWalker};
