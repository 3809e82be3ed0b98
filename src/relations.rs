//! The restriction/relaxation comparability graph.

use crate::problem::{ProblemId, Universe};
use log::info;
use rayon::prelude::*;
use std::collections::BTreeSet;

/// The full comparability relation over one problem universe.
///
/// For every problem this records *all* comparable problems, not merely
/// covering pairs, so a single propagation sweep needs no transitive
/// closure of its own. Comparisons are made against the whole
/// relabeling-equivalence class, catching pairs that differ only by a
/// renaming of labels.
pub struct RelationGraph {
    relaxations: Vec<BTreeSet<ProblemId>>,
    restrictions: Vec<BTreeSet<ProblemId>>,
}

impl RelationGraph {
    /// Quadratic scan over the universe, parallel over the source problem.
    /// Each worker reads the shared universe and writes only its own entry.
    pub fn build(universe: &Universe) -> Self {
        info!(
            "computing relaxations and restrictions ({} problems)",
            universe.len()
        );
        let ids: Vec<ProblemId> = universe.ids().collect();
        let entries: Vec<(BTreeSet<ProblemId>, BTreeSet<ProblemId>)> = ids
            .into_par_iter()
            .map(|id| {
                let equivalence_class = universe.problem(id).equivalent_problems();
                let mut relaxations = BTreeSet::new();
                let mut restrictions = BTreeSet::new();
                for other_id in universe.ids() {
                    if other_id == id {
                        continue;
                    }
                    let other = universe.problem(other_id);
                    for variant in &equivalence_class {
                        if variant.is_restriction(other) {
                            relaxations.insert(other_id);
                        }
                        if variant.is_relaxation(other) {
                            restrictions.insert(other_id);
                        }
                    }
                }
                (relaxations, restrictions)
            })
            .collect();
        let (relaxations, restrictions) = entries.into_iter().unzip();
        Self {
            relaxations,
            restrictions,
        }
    }

    pub fn from_parts(
        relaxations: Vec<BTreeSet<ProblemId>>,
        restrictions: Vec<BTreeSet<ProblemId>>,
    ) -> Self {
        assert_eq!(relaxations.len(), restrictions.len());
        Self {
            relaxations,
            restrictions,
        }
    }

    pub fn len(&self) -> usize {
        self.relaxations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relaxations.is_empty()
    }

    /// Problems allowing at least as much as `id` (no harder than it).
    pub fn relaxations(&self, id: ProblemId) -> &BTreeSet<ProblemId> {
        &self.relaxations[id]
    }

    /// Problems allowing at most as much as `id` (no easier than it).
    pub fn restrictions(&self, id: ProblemId) -> &BTreeSet<ProblemId> {
        &self.restrictions[id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{Configuration, ConstraintSet, Problem};

    fn constraint(configurations: &[[u8; 3]]) -> ConstraintSet {
        configurations.iter().map(|&c| Configuration::new(c)).collect()
    }

    #[test]
    fn test_literal_containment() {
        let a = Problem::new(
            constraint(&[[1, 2, 0], [2, 1, 0]]),
            constraint(&[[1, 2, 0], [3, 0, 0]]),
            3,
            3,
        );
        let b = Problem::new(
            constraint(&[[2, 1, 0]]),
            constraint(&[[1, 2, 0], [3, 0, 0]]),
            3,
            3,
        );
        let universe = Universe::from_problems(3, 3, vec![a, b]);
        let relations = RelationGraph::build(&universe);
        // b forbids more than a: a relaxes b, b restricts a
        assert!(relations.restrictions(0).contains(&1));
        assert!(relations.relaxations(1).contains(&0));
        assert!(!relations.relaxations(0).contains(&0));
        assert!(!relations.restrictions(1).contains(&1));
    }

    #[test]
    fn test_containment_up_to_relabeling() {
        // p's constraints are not a literal subset of q's, but swapping
        // labels 0 and 1 makes them one.
        let p = Problem::new(
            constraint(&[[0, 3, 0]]),
            constraint(&[[0, 3, 0]]),
            3,
            3,
        );
        let q = Problem::new(
            constraint(&[[3, 0, 0], [2, 1, 0]]),
            constraint(&[[3, 0, 0], [2, 1, 0]]),
            3,
            3,
        );
        assert!(!p.is_restriction(&q));
        let universe = Universe::from_problems(3, 3, vec![p, q]);
        let relations = RelationGraph::build(&universe);
        assert!(relations.relaxations(0).contains(&1));
        assert!(relations.restrictions(1).contains(&0));
    }

    #[test]
    fn test_incomparable_pair() {
        let p = Problem::new(
            constraint(&[[3, 0, 0]]),
            constraint(&[[3, 0, 0]]),
            3,
            3,
        );
        let q = Problem::new(
            constraint(&[[1, 1, 1]]),
            constraint(&[[1, 1, 1]]),
            3,
            3,
        );
        let universe = Universe::from_problems(3, 3, vec![p, q]);
        let relations = RelationGraph::build(&universe);
        assert!(relations.relaxations(0).is_empty());
        assert!(relations.restrictions(0).is_empty());
        assert!(relations.relaxations(1).is_empty());
        assert!(relations.restrictions(1).is_empty());
    }
}
