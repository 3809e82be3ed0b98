use crate::complexity::Complexity;
use crate::oracle::{OracleSuite, RefineMode};
use crate::problem::{Problem, ProblemId, Universe};
use crate::propagate::propagate;
use crate::reference::ReferenceTables;
use crate::relations::RelationGraph;
use crate::types::NUM_LABELS;
use derive_more::Display;
use log::info;

/// Constant-round refinement schedule as `(iterations, labels)` pairs,
/// cheapest search first.
const REFINEMENT_SCHEDULE: [(usize, usize); 3] = [(20, 3), (10, 4), (3, 5)];

/// Refinement is only attempted while the known constant upper bound is
/// this loose.
const CONSTANT_ROUNDS_THRESHOLD: u32 = 200;

#[derive(Debug, Display, PartialEq)]
pub enum PipelineError {
    #[display(fmt = "relation data missing for the problem universe")]
    MissingRelations,
}

impl std::error::Error for PipelineError {}

/// The classification stages, in execution order. Each stage carries its
/// own applicability predicate, so adding an oracle is adding a stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Solvability,
    ExactSmallAlphabet,
    CoverMap,
    GreedyColoring,
    ReferenceTables,
}

impl Stage {
    pub const ORDER: [Stage; 5] = [
        Stage::Solvability,
        Stage::ExactSmallAlphabet,
        Stage::CoverMap,
        Stage::GreedyColoring,
        Stage::ReferenceTables,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Solvability => "solvability",
            Stage::ExactSmallAlphabet => "exact small-alphabet classification",
            Stage::CoverMap => "cover map lower bounds",
            Stage::GreedyColoring => "greedy coloring upper bounds",
            Stage::ReferenceTables => "reference table overrides",
        }
    }

    /// Whether the stage may still act on the problem. Exactly classified
    /// and unsolvable problems are retired from oracle work.
    fn applies(self, problem: &Problem) -> bool {
        match self {
            Stage::Solvability
            | Stage::ExactSmallAlphabet
            | Stage::CoverMap
            | Stage::GreedyColoring => problem.complexity() == Complexity::Unclassified,
            Stage::ReferenceTables => true,
        }
    }
}

/// Drives oracle calls interleaved with propagation over one universe.
///
/// The stage sequence is fixed; only propagation and the refinement
/// schedule iterate internally. Problems never regress.
pub struct Pipeline<'a, O: OracleSuite> {
    universe: &'a mut Universe,
    relations: &'a RelationGraph,
    oracles: &'a O,
    tables: &'a ReferenceTables,
}

impl<'a, O: OracleSuite> Pipeline<'a, O> {
    pub fn new(
        universe: &'a mut Universe,
        relations: &'a RelationGraph,
        oracles: &'a O,
        tables: &'a ReferenceTables,
    ) -> Result<Self, PipelineError> {
        if relations.len() != universe.len() {
            return Err(PipelineError::MissingRelations);
        }
        Ok(Self {
            universe,
            relations,
            oracles,
            tables,
        })
    }

    /// Run every stage in order, propagating after each, then work through
    /// the constant-round refinement schedule.
    pub fn run(&mut self) {
        info!("starting classification ({} problems)", self.universe.len());
        for &stage in Stage::ORDER.iter() {
            self.run_stage(stage);
            propagate(self.universe, self.relations);
        }
        self.refine_constant();
        propagate(self.universe, self.relations);
    }

    fn run_stage(&mut self, stage: Stage) {
        info!("stage: {}", stage.name());
        if stage == Stage::ReferenceTables {
            self.apply_reference_tables();
            return;
        }
        for id in 0..self.universe.len() {
            if !stage.applies(self.universe.problem(id)) {
                continue;
            }
            match stage {
                Stage::Solvability => self.check_solvability(id),
                Stage::ExactSmallAlphabet => self.classify_exact(id),
                Stage::CoverMap => self.cover_map(id),
                Stage::GreedyColoring => self.greedy_coloring(id),
                Stage::ReferenceTables => unreachable!(),
            }
        }
    }

    /// A problem with an empty side admits no correct labeling at all;
    /// anything else is solvable with global knowledge.
    fn check_solvability(&mut self, id: ProblemId) {
        let problem = self.universe.problem_mut(id);
        if problem.white().is_empty() || problem.black().is_empty() {
            problem.set_complexity(Complexity::Unsolvable);
        } else {
            problem.set_upper_bound(Complexity::Global);
        }
    }

    fn classify_exact(&mut self, id: ProblemId) {
        let problem = self.universe.problem(id);
        let verdict = if problem.alphabet_size() < NUM_LABELS {
            self.oracles.classify_exact(
                problem.white(),
                problem.black(),
                &problem.alphabet(),
                problem.white_degree(),
                problem.black_degree(),
            )
        } else {
            self.oracles
                .reduce_redundancy(problem.white(), problem.black())
                .and_then(|(white, black, alphabet)| {
                    self.oracles.classify_exact(
                        &white,
                        &black,
                        &alphabet,
                        problem.white_degree(),
                        problem.black_degree(),
                    )
                })
        };
        if let Some(complexity) = verdict {
            self.universe.problem_mut(id).set_complexity(complexity);
        }
    }

    fn cover_map(&mut self, id: ProblemId) {
        let problem = self.universe.problem(id);
        if self
            .oracles
            .cover_map_lower_bound(problem.white(), problem.black())
        {
            self.universe
                .problem_mut(id)
                .set_lower_bound(Complexity::IteratedLogarithmic);
        }
    }

    fn greedy_coloring(&mut self, id: ProblemId) {
        if self
            .oracles
            .greedy_coloring_upper_bound(self.universe.problem(id))
        {
            self.universe
                .problem_mut(id)
                .set_upper_bound(Complexity::IteratedLogarithmic);
        }
    }

    fn apply_reference_tables(&mut self) {
        for entry in &self.tables.logarithmic_upper {
            if let Some(id) = self.universe.find(entry) {
                self.universe
                    .problem_mut(id)
                    .set_upper_bound(Complexity::Logarithmic);
            }
        }
        for entry in &self.tables.logarithmic_tight {
            if let Some(id) = self.universe.find(entry) {
                self.universe
                    .problem_mut(id)
                    .set_complexity(Complexity::Logarithmic);
            }
        }
        for entry in &self.tables.logarithmic_lower {
            if let Some(id) = self.universe.find(entry) {
                self.universe
                    .problem_mut(id)
                    .set_lower_bound(Complexity::Logarithmic);
            }
        }
        for entry in &self.tables.iterated_logarithmic {
            if let Some(id) = self.universe.find(entry) {
                self.universe
                    .problem_mut(id)
                    .set_complexity(Complexity::IteratedLogarithmic);
            }
        }
    }

    /// Re-propagating after every schedule step lets newly tightened
    /// problems relax their neighbors before the next, more expensive
    /// search is attempted.
    fn refine_constant(&mut self) {
        for &(iterations, labels) in REFINEMENT_SCHEDULE.iter() {
            info!(
                "round elimination pass: iterations={}, labels={}",
                iterations, labels
            );
            let candidates: Vec<ProblemId> = (0..self.universe.len())
                .filter(|&id| {
                    let problem = self.universe.problem(id);
                    problem.lower_bound() == Complexity::Constant
                        && problem.constant_upper_bound() > CONSTANT_ROUNDS_THRESHOLD
                })
                .collect();
            let mut newly_constant = 0;
            for id in candidates {
                let verdict = self.oracles.refine(
                    self.universe.problem(id),
                    RefineMode::UpperBound,
                    iterations,
                    labels,
                );
                if let Some(rounds) = verdict {
                    let problem = self.universe.problem_mut(id);
                    problem.set_complexity(Complexity::Constant);
                    problem.tighten_constant_upper_bound(rounds);
                    newly_constant += 1;
                }
            }
            info!("{} problems classified as constant", newly_constant);
            propagate(self.universe, self.relations);
        }
    }
}

/// Problem counts per verdict, in scale order.
pub fn summary(universe: &Universe) -> Vec<(Complexity, usize)> {
    Complexity::ALL
        .iter()
        .map(|&complexity| {
            (
                complexity,
                universe
                    .problems()
                    .filter(|p| p.complexity() == complexity)
                    .count(),
            )
        })
        .collect()
}
