//! Classification: what does a traced value ultimately originate from
//!
//! The domain layer is the pure decision table over symbol shape; the
//! application layer composes it with the value-tracking resolver into the
//! queries rules actually ask.

pub mod application;
pub mod domain;

pub use application::{
    classify_cached_or_injected, classify_created_and_injected, classify_freshness,
    classify_origin,
};
pub use domain::injectedness;
