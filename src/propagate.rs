//! Monotone propagation of bounds along the relation graph.

use crate::complexity::Complexity;
use crate::problem::{ProblemId, Universe};
use crate::relations::RelationGraph;
use log::info;

/// Push every problem's bounds to its comparable problems.
///
/// A restriction can never be easier than a lower bound already proven for
/// the problem it restricts; a relaxation can never be harder than a known
/// upper bound, and an exact constant round count composes trivially for
/// relaxations. One ascending sweep over the scale saturates because the
/// relation graph is already the full comparability closure.
pub fn propagate(universe: &mut Universe, relations: &RelationGraph) {
    assert_eq!(
        universe.len(),
        relations.len(),
        "relation graph does not cover the problem universe"
    );
    info!("propagating the lower and upper bounds");
    for &complexity in Complexity::REAL.iter() {
        let lower: Vec<ProblemId> = universe
            .ids()
            .filter(|&id| universe.problem(id).lower_bound() == complexity)
            .collect();
        for id in lower {
            for &restriction in relations.restrictions(id) {
                universe.problem_mut(restriction).set_lower_bound(complexity);
            }
        }
        let upper: Vec<ProblemId> = universe
            .ids()
            .filter(|&id| universe.problem(id).upper_bound() == complexity)
            .collect();
        for id in upper {
            let constant_upper_bound = universe.problem(id).constant_upper_bound();
            for &relaxation in relations.relaxations(id) {
                let relaxed = universe.problem_mut(relaxation);
                relaxed.set_upper_bound(complexity);
                if complexity == Complexity::Constant {
                    relaxed.tighten_constant_upper_bound(constant_upper_bound);
                }
            }
        }
    }
}
