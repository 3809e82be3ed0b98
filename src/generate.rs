//! Problem universe enumeration.

use crate::problem::{Configuration, ConstraintSet, Problem, Universe};
use crate::types::Degree;
use log::info;

/// Generate every structurally distinct problem for the given degree pair,
/// keeping exactly one canonical representative per relabeling-equivalence
/// class. Degrees are normalized so the white side carries the smaller one.
pub fn generate(white_degree: Degree, black_degree: Degree) -> Universe {
    let (white_degree, black_degree) = (
        white_degree.min(black_degree),
        white_degree.max(black_degree),
    );
    let white_configurations = Configuration::all_of_degree(white_degree);
    let black_configurations = Configuration::all_of_degree(black_degree);
    info!("white configurations: {}", white_configurations.len());
    info!("black configurations: {}", black_configurations.len());
    let white_constraints = powerset(&white_configurations);
    let black_constraints = powerset(&black_configurations);
    info!("white constraints: {}", white_constraints.len());
    info!("black constraints: {}", black_constraints.len());
    let mut problems = Vec::new();
    for white in &white_constraints {
        for black in &black_constraints {
            let problem = Problem::new(white.clone(), black.clone(), white_degree, black_degree);
            if problem.is_canonical() {
                problems.push(problem);
            }
        }
    }
    info!("problems kept: {}", problems.len());
    Universe::from_problems(white_degree, black_degree, problems)
}

fn powerset(configurations: &[Configuration]) -> Vec<ConstraintSet> {
    (0..1u64 << configurations.len())
        .map(|mask| {
            configurations
                .iter()
                .enumerate()
                .filter(|(i, _)| mask >> i & 1 == 1)
                .map(|(_, &configuration)| configuration)
                .collect()
        })
        .collect()
}
