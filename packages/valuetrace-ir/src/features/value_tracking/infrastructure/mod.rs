//! Value-tracking walkers and the fixpoint resolver

pub mod assignment_walker;
pub mod recursive_values;
pub mod return_walker;

pub use assignment_walker::AssignmentWalker;
pub use recursive_values::RecursiveValues;
pub use return_walker::ReturnWalker;
