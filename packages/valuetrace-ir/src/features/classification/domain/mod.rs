//! Classification domain rules

pub mod injected;

pub use injected::injectedness;
