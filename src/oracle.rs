//! Call contracts for the external decision procedures.
//!
//! The solvers behind these contracts are independent programs; the
//! pipeline only consumes their verdicts. Calls are blocking, total and
//! side-effect-free aside from the return value.

use crate::complexity::Complexity;
use crate::problem::{ConstraintSet, Problem};
use crate::types::{Degree, Label};
use std::collections::BTreeSet;

/// The effort direction of a round-eliminator run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefineMode {
    UpperBound,
    LowerBound,
}

/// The external solver suite consumed by the classification pipeline.
///
/// Every method has a declining default, so partial suites stay valid: a
/// non-answer is not an error and leaves the problem's bounds untouched.
pub trait OracleSuite {
    /// Exact verdict for problems over fewer than three labels.
    fn classify_exact(
        &self,
        _white: &ConstraintSet,
        _black: &ConstraintSet,
        _alphabet: &BTreeSet<Label>,
        _white_degree: Degree,
        _black_degree: Degree,
    ) -> Option<Complexity> {
        None
    }

    /// Strip a redundant label from a three-label problem, if one exists.
    fn reduce_redundancy(
        &self,
        _white: &ConstraintSet,
        _black: &ConstraintSet,
    ) -> Option<(ConstraintSet, ConstraintSet, BTreeSet<Label>)> {
        None
    }

    /// `true` certifies an iterated-logarithmic lower bound.
    fn cover_map_lower_bound(&self, _white: &ConstraintSet, _black: &ConstraintSet) -> bool {
        false
    }

    /// `true` certifies an iterated-logarithmic upper bound.
    fn greedy_coloring_upper_bound(&self, _problem: &Problem) -> bool {
        false
    }

    /// Constant round count found at this effort level, if any.
    fn refine(
        &self,
        _problem: &Problem,
        _mode: RefineMode,
        _iterations: usize,
        _labels: usize,
    ) -> Option<u32> {
        None
    }
}

/// A suite that never answers; classification then rests on the
/// oracle-free stages and propagation alone.
pub struct NoOracles;

impl OracleSuite for NoOracles {}
