//! Various types related to problem classification.

/// The label type.
pub type Label = usize;

/// The node degree type.
pub type Degree = usize;

/// The size of the label alphabet.
pub const NUM_LABELS: usize = 3;
