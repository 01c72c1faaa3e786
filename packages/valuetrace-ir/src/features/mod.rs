//! Feature modules

pub mod classification;
pub mod value_tracking;
