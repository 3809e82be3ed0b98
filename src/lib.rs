//! Round-complexity classification of three-label LCL problems.

pub mod classifier;
pub mod complexity;
pub mod generate;
pub mod oracle;
pub mod problem;
pub mod propagate;
pub mod reference;
pub mod relations;
pub mod store;
pub mod types;
