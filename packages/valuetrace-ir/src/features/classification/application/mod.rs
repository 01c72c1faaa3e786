//! Classification query entry points

pub mod origin;

pub use origin::{
    classify_cached_or_injected, classify_created_and_injected, classify_freshness,
    classify_origin,
};
