//! Oracle boundary: semantic model, builder, cancellation

pub mod builder;
pub mod cancel;
pub mod model;

pub use builder::SemanticBuilder;
pub use cancel::CancelToken;
pub use model::SemanticModel;
