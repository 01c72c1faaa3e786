//! Value-tracking domain types

pub mod candidates;
pub mod member_path;

pub use candidates::ValueCandidates;
