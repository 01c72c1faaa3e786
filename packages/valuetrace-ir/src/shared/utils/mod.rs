//! Shared utilities

pub mod recursion_guard;

pub use recursion_guard::RecursionGuard;
