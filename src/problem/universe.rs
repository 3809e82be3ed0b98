use crate::problem::Problem;
use crate::types::Degree;
use std::ops::Range;

/// A stable handle into a [`Universe`](struct.Universe.html).
pub type ProblemId = usize;

/// The arena of all problems generated for one degree pair.
///
/// Problems are created once and never structurally mutated; only their
/// classification state changes, addressed through stable ids.
pub struct Universe {
    white_degree: Degree,
    black_degree: Degree,
    problems: Vec<Problem>,
}

impl Universe {
    pub fn new(white_degree: Degree, black_degree: Degree) -> Self {
        Self {
            white_degree,
            black_degree,
            problems: Vec::new(),
        }
    }

    pub fn from_problems(
        white_degree: Degree,
        black_degree: Degree,
        problems: Vec<Problem>,
    ) -> Self {
        let mut universe = Self::new(white_degree, black_degree);
        for problem in problems {
            universe.push(problem);
        }
        universe
    }

    pub fn push(&mut self, problem: Problem) -> ProblemId {
        debug_assert_eq!(problem.white_degree(), self.white_degree);
        debug_assert_eq!(problem.black_degree(), self.black_degree);
        self.problems.push(problem);
        self.problems.len() - 1
    }

    pub fn white_degree(&self) -> Degree {
        self.white_degree
    }

    pub fn black_degree(&self) -> Degree {
        self.black_degree
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn ids(&self) -> Range<ProblemId> {
        0..self.problems.len()
    }

    pub fn problem(&self, id: ProblemId) -> &Problem {
        &self.problems[id]
    }

    pub fn problem_mut(&mut self, id: ProblemId) -> &mut Problem {
        &mut self.problems[id]
    }

    pub fn problems(&self) -> impl Iterator<Item = &Problem> {
        self.problems.iter()
    }

    /// Locate a problem by structural equality. The cached hash is only a
    /// pre-filter; a hit is always confirmed with `==`.
    pub fn find(&self, shape: &Problem) -> Option<ProblemId> {
        self.problems
            .iter()
            .position(|p| p.structural_hash() == shape.structural_hash() && p == shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{Configuration, ConstraintSet};

    fn constraint(configurations: &[[u8; 3]]) -> ConstraintSet {
        configurations.iter().map(|&c| Configuration::new(c)).collect()
    }

    #[test]
    fn test_push_and_find() {
        let mut universe = Universe::new(3, 3);
        let a = Problem::new(
            constraint(&[[3, 0, 0]]),
            constraint(&[[3, 0, 0]]),
            3,
            3,
        );
        let b = Problem::new(
            constraint(&[[3, 0, 0], [2, 1, 0]]),
            constraint(&[[3, 0, 0]]),
            3,
            3,
        );
        let a_id = universe.push(a.clone());
        let b_id = universe.push(b.clone());
        assert_eq!(universe.len(), 2);
        assert_eq!(universe.find(&a), Some(a_id));
        assert_eq!(universe.find(&b), Some(b_id));
        let missing = Problem::new(
            constraint(&[[0, 3, 0]]),
            constraint(&[[3, 0, 0]]),
            3,
            3,
        );
        assert_eq!(universe.find(&missing), None);
    }
}
