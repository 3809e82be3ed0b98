use tlpc::{
    classifier::{summary, Pipeline},
    complexity::Complexity,
    generate::generate,
    oracle::{NoOracles, OracleSuite},
    problem::{ConstraintSet, Problem},
    reference::ReferenceTables,
    relations::RelationGraph,
};

#[test]
fn test_classify_2_2_universe() {
    let mut universe = generate(2, 2);
    assert_eq!(universe.len(), 816);
    let relations = RelationGraph::build(&universe);

    // the fully permissive problem relaxes everything else
    let everything: ConstraintSet = tlpc::problem::Configuration::all_of_degree(2)
        .into_iter()
        .collect();
    let empty = universe
        .find(&Problem::new(
            ConstraintSet::new(),
            ConstraintSet::new(),
            2,
            2,
        ))
        .unwrap();
    assert_eq!(relations.relaxations(empty).len(), universe.len() - 1);
    assert!(relations.restrictions(empty).is_empty());
    let full = universe
        .find(&Problem::new(everything.clone(), everything, 2, 2))
        .unwrap();
    assert_eq!(relations.restrictions(full).len(), universe.len() - 1);
    assert!(relations.relaxations(full).is_empty());

    let tables = ReferenceTables::default();
    let mut pipeline = Pipeline::new(&mut universe, &relations, &NoOracles, &tables).unwrap();
    pipeline.run();

    // problems with an empty side are unsolvable: one canonical problem
    // per constraint-set orbit on the other side (20 each), minus the
    // double-counted empty-empty problem
    let unsolvable = universe
        .problems()
        .filter(|p| p.complexity() == Complexity::Unsolvable)
        .count();
    assert_eq!(unsolvable, 39);
    assert!(universe
        .problems()
        .filter(|p| p.white().is_empty() || p.black().is_empty())
        .all(|p| p.complexity() == Complexity::Unsolvable));

    // without oracles everything else stays bounded by Global only
    for (complexity, count) in summary(&universe) {
        match complexity {
            Complexity::Unclassified => assert_eq!(count, universe.len() - unsolvable),
            Complexity::Unsolvable => assert_eq!(count, unsolvable),
            _ => assert_eq!(count, 0),
        }
    }
    assert!(universe
        .problems()
        .filter(|p| p.complexity() != Complexity::Unsolvable)
        .all(|p| p.upper_bound() == Complexity::Global));

    // bounds never cross
    assert!(universe.problems().all(|p| {
        p.upper_bound() == Complexity::Unclassified || p.lower_bound() <= p.upper_bound()
    }));
}

struct CoverMapEverywhere;

impl OracleSuite for CoverMapEverywhere {
    fn cover_map_lower_bound(&self, _white: &ConstraintSet, _black: &ConstraintSet) -> bool {
        true
    }
}

#[test]
fn test_certified_lower_bounds_saturate() {
    let mut universe = generate(2, 2);
    let relations = RelationGraph::build(&universe);
    let tables = ReferenceTables::default();
    let mut pipeline =
        Pipeline::new(&mut universe, &relations, &CoverMapEverywhere, &tables).unwrap();
    pipeline.run();
    // every solvable problem is certified directly or through a relaxation
    assert!(universe
        .problems()
        .filter(|p| p.complexity() != Complexity::Unsolvable)
        .all(|p| p.lower_bound() == Complexity::IteratedLogarithmic));
}
