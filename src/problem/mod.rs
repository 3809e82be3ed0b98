//! The problem data model.

pub use configuration::Configuration;
pub use problem::{AlphaError, ConstraintSet, Problem};
pub use universe::{ProblemId, Universe};

mod configuration;
mod problem;
mod universe;
