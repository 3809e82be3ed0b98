use crate::complexity::Complexity;
use crate::problem::Configuration;
use crate::types::{Degree, Label, NUM_LABELS};
use derive_more::Display;
use itertools::Itertools;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Alpha-format parse error.
#[derive(Debug, Display, PartialEq)]
pub enum AlphaError {
    #[display(fmt = "invalid label character: {}", _0)]
    BadLabel(char),
    #[display(fmt = "configuration of degree {} where {} was expected", _0, _1)]
    WrongDegree(Degree, Degree),
}

impl std::error::Error for AlphaError {}

/// The allowed configurations on one side of a problem.
///
/// A set of unique, unordered configurations of one fixed degree; a
/// configuration absent from the set is forbidden.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ConstraintSet(BTreeSet<Configuration>);

impl ConstraintSet {
    pub fn new() -> Self {
        ConstraintSet(BTreeSet::new())
    }

    /// Parse whitespace-separated alpha words (`A`/`B`/`C` per edge-end),
    /// checking every configuration against the side's degree. An empty
    /// string is the empty constraint set.
    pub fn from_alpha(text: &str, degree: Degree) -> Result<Self, AlphaError> {
        let mut configurations = BTreeSet::new();
        for word in text.split_whitespace() {
            let mut counts = [0u8; NUM_LABELS];
            for ch in word.chars() {
                let label = (ch as usize).wrapping_sub('A' as usize);
                if label >= NUM_LABELS {
                    return Err(AlphaError::BadLabel(ch));
                }
                counts[label] += 1;
            }
            let configuration = Configuration::new(counts);
            if configuration.degree() != degree {
                return Err(AlphaError::WrongDegree(configuration.degree(), degree));
            }
            configurations.insert(configuration);
        }
        Ok(ConstraintSet(configurations))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, configuration: &Configuration) -> bool {
        self.0.contains(configuration)
    }

    pub fn insert(&mut self, configuration: Configuration) -> bool {
        self.0.insert(configuration)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Configuration> {
        self.0.iter()
    }

    pub fn is_subset(&self, other: &Self) -> bool {
        self.0.is_subset(&other.0)
    }

    /// Labels appearing with nonzero count in at least one configuration.
    pub fn alphabet(&self) -> BTreeSet<Label> {
        self.0.iter().flat_map(|c| c.labels()).collect()
    }

    /// The image under a label permutation applied to every configuration.
    pub fn permuted(&self, perm: &[Label]) -> Self {
        self.0.iter().map(|c| c.permuted(perm)).collect()
    }

    /// Order-independent aggregate of the per-configuration hashes.
    pub(crate) fn fingerprint(&self) -> u64 {
        self.0.iter().map(Configuration::mix).fold(0, |acc, h| acc ^ h)
    }
}

impl Default for ConstraintSet {
    fn default() -> Self {
        Self::new()
    }
}

impl std::iter::FromIterator<Configuration> for ConstraintSet {
    fn from_iter<I: IntoIterator<Item = Configuration>>(iter: I) -> Self {
        ConstraintSet(iter.into_iter().collect())
    }
}

impl fmt::Display for ConstraintSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join(" "))
    }
}

/// An LCL problem: a white and a black constraint set with their degrees,
/// plus the classification state attached to it.
///
/// Equality and hashing are structural only; the classification state is
/// mutable and excluded from both. The hash is cached at construction and
/// combines an order-independent aggregate per side with the degree pair,
/// so equal problems hash equally regardless of insertion order. Hash
/// equality across unequal problems is possible and must always be
/// confirmed with `==`.
#[derive(Clone, Debug)]
pub struct Problem {
    white: ConstraintSet,
    black: ConstraintSet,
    white_degree: Degree,
    black_degree: Degree,
    hash: u64,
    lower_bound: Complexity,
    upper_bound: Complexity,
    constant_upper_bound: u32,
}

impl Problem {
    pub fn new(
        white: ConstraintSet,
        black: ConstraintSet,
        white_degree: Degree,
        black_degree: Degree,
    ) -> Self {
        let hash = white.fingerprint()
            ^ black.fingerprint().rotate_left(17)
            ^ (((white_degree as u64) << 8) | black_degree as u64)
                .wrapping_mul(0x9e37_79b9_7f4a_7c15);
        Self {
            white,
            black,
            white_degree,
            black_degree,
            hash,
            lower_bound: Complexity::Unclassified,
            upper_bound: Complexity::Unclassified,
            constant_upper_bound: u32::MAX,
        }
    }

    /// Parse a problem from per-side alpha descriptions.
    pub fn from_alpha(
        white: &str,
        black: &str,
        white_degree: Degree,
        black_degree: Degree,
    ) -> Result<Self, AlphaError> {
        Ok(Self::new(
            ConstraintSet::from_alpha(white, white_degree)?,
            ConstraintSet::from_alpha(black, black_degree)?,
            white_degree,
            black_degree,
        ))
    }

    pub fn white(&self) -> &ConstraintSet {
        &self.white
    }

    pub fn black(&self) -> &ConstraintSet {
        &self.black
    }

    pub fn white_degree(&self) -> Degree {
        self.white_degree
    }

    pub fn black_degree(&self) -> Degree {
        self.black_degree
    }

    pub(crate) fn structural_hash(&self) -> u64 {
        self.hash
    }

    /// Labels appearing in either constraint set.
    pub fn alphabet(&self) -> BTreeSet<Label> {
        let mut alphabet = self.white.alphabet();
        alphabet.extend(self.black.alphabet());
        alphabet
    }

    pub fn alphabet_size(&self) -> usize {
        self.alphabet().len()
    }

    /// Whether at least one label may legally appear on both sides.
    pub fn has_common_labels(&self) -> bool {
        !self.white.alphabet().is_disjoint(&self.black.alphabet())
    }

    /// Whether `self` allows a subset of what `other` allows on both sides.
    /// Problems of differing degree pairs are incomparable.
    pub fn is_restriction(&self, other: &Self) -> bool {
        self.white_degree == other.white_degree
            && self.black_degree == other.black_degree
            && self.white.is_subset(&other.white)
            && self.black.is_subset(&other.black)
    }

    pub fn is_relaxation(&self, other: &Self) -> bool {
        other.is_restriction(self)
    }

    /// The deduplicated image of the problem under every label permutation.
    /// All members share the problem's true complexity.
    pub fn equivalent_problems(&self) -> Vec<Problem> {
        let mut variants: Vec<Problem> = Vec::new();
        for perm in (0..NUM_LABELS).permutations(NUM_LABELS) {
            let variant = Problem::new(
                self.white.permuted(&perm),
                self.black.permuted(&perm),
                self.white_degree,
                self.black_degree,
            );
            if !variants.contains(&variant) {
                variants.push(variant);
            }
        }
        variants
    }

    /// Whether the problem is the greatest member of its equivalence class
    /// under the structural order.
    pub fn is_canonical(&self) -> bool {
        self.equivalent_problems()
            .iter()
            .all(|variant| (&self.white, &self.black) >= (&variant.white, &variant.black))
    }

    pub fn lower_bound(&self) -> Complexity {
        self.lower_bound
    }

    pub fn upper_bound(&self) -> Complexity {
        self.upper_bound
    }

    /// Exact round count, meaningful once the upper bound is `Constant`;
    /// `u32::MAX` stands for "unbounded so far".
    pub fn constant_upper_bound(&self) -> u32 {
        self.constant_upper_bound
    }

    /// The verdict once both bounds agree, `Unclassified` otherwise.
    pub fn complexity(&self) -> Complexity {
        if self.lower_bound == self.upper_bound {
            self.lower_bound
        } else {
            Complexity::Unclassified
        }
    }

    /// Raise the lower bound; never loosens.
    pub fn set_lower_bound(&mut self, complexity: Complexity) {
        if complexity > self.lower_bound {
            self.lower_bound = complexity;
        }
        self.check_bounds();
    }

    /// Tighten the upper bound; never loosens. `Unclassified` carries no
    /// information and is ignored.
    pub fn set_upper_bound(&mut self, complexity: Complexity) {
        if complexity == Complexity::Unclassified {
            return;
        }
        if self.upper_bound == Complexity::Unclassified || complexity < self.upper_bound {
            self.upper_bound = complexity;
        }
        self.check_bounds();
    }

    /// Set both bounds to an exactly decided verdict.
    pub fn set_complexity(&mut self, complexity: Complexity) {
        self.set_lower_bound(complexity);
        self.set_upper_bound(complexity);
    }

    pub fn tighten_constant_upper_bound(&mut self, rounds: u32) {
        self.constant_upper_bound = self.constant_upper_bound.min(rounds);
    }

    fn check_bounds(&self) {
        if self.upper_bound != Complexity::Unclassified {
            assert!(
                self.lower_bound <= self.upper_bound,
                "inconsistent bounds {:?} > {:?} for problem {}",
                self.lower_bound,
                self.upper_bound,
                self
            );
        }
    }
}

impl PartialEq for Problem {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
            && self.white_degree == other.white_degree
            && self.black_degree == other.black_degree
            && self.white == other.white
            && self.black == other.black
    }
}

impl Eq for Problem {}

impl Hash for Problem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.white, self.black)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constraint(configurations: &[[u8; NUM_LABELS]]) -> ConstraintSet {
        configurations.iter().map(|&c| Configuration::new(c)).collect()
    }

    fn problem(white: &[[u8; NUM_LABELS]], black: &[[u8; NUM_LABELS]]) -> Problem {
        Problem::new(constraint(white), constraint(black), 3, 3)
    }

    #[test]
    fn test_equality() {
        let problem1 = problem(&[[1, 2, 0], [2, 1, 0]], &[[1, 1, 1], [3, 0, 0]]);
        let problem2 = problem(&[[2, 1, 0], [1, 2, 0]], &[[1, 1, 1], [3, 0, 0]]);
        assert_eq!(problem1, problem2);
    }

    #[test]
    fn test_hash_consistency() {
        let problem1 = problem(&[[1, 2, 0], [1, 1, 1]], &[[1, 2, 0], [3, 0, 0]]);
        let problem2 = problem(&[[1, 1, 1], [1, 2, 0]], &[[1, 2, 0], [3, 0, 0]]);
        let problem3 = problem(&[[1, 1, 1], [0, 2, 1]], &[[1, 2, 0], [3, 0, 0]]);
        assert_eq!(problem1.structural_hash(), problem2.structural_hash());
        assert_ne!(problem1.structural_hash(), problem3.structural_hash());
    }

    #[test]
    fn test_alphabet() {
        let problem1 = problem(&[[1, 2, 0], [2, 1, 0]], &[[1, 2, 0], [3, 0, 0]]);
        assert_eq!(problem1.alphabet(), vec![0, 1].into_iter().collect());
        let problem2 = problem(&[[1, 1, 1], [2, 1, 0]], &[[1, 2, 0], [3, 0, 0]]);
        assert_eq!(problem2.alphabet(), vec![0, 1, 2].into_iter().collect());
        let problem3 = problem(&[[3, 0, 0]], &[[3, 0, 0]]);
        assert_eq!(problem3.alphabet(), vec![0].into_iter().collect());
        assert_eq!(problem3.alphabet_size(), 1);
    }

    #[test]
    fn test_has_common_labels() {
        let problem1 = problem(&[[1, 2, 0], [2, 1, 0]], &[[1, 2, 0], [3, 0, 0]]);
        let problem2 = problem(&[[0, 3, 0]], &[[3, 0, 0]]);
        assert!(problem1.has_common_labels());
        assert!(!problem2.has_common_labels());
    }

    #[test]
    fn test_restriction_relaxation() {
        let problem1 = problem(&[[1, 2, 0], [2, 1, 0]], &[[1, 2, 0], [3, 0, 0]]);
        let problem2 = problem(&[[2, 1, 0]], &[[1, 2, 0], [3, 0, 0]]);
        let problem3 = problem(&[[1, 2, 0], [0, 3, 0]], &[[1, 2, 0], [3, 0, 0]]);
        assert!(problem2.is_restriction(&problem1));
        assert!(problem1.is_relaxation(&problem2));
        assert!(!problem2.is_restriction(&problem3));
        // reflexive under subset-with-equality
        assert!(problem1.is_restriction(&problem1));
        assert!(problem1.is_relaxation(&problem1));
    }

    #[test]
    fn test_restriction_requires_equal_degrees() {
        let problem1 = problem(&[[3, 0, 0]], &[[3, 0, 0]]);
        let problem2 = Problem::new(
            constraint(&[[2, 0, 0]]),
            constraint(&[[2, 0, 0]]),
            2,
            2,
        );
        assert!(!problem2.is_restriction(&problem1));
        assert!(!problem1.is_restriction(&problem2));
    }

    #[test]
    fn test_equivalent_problems() {
        let symmetric = problem(&[[3, 0, 0]], &[[3, 0, 0]]);
        // one label in use: one variant per label position
        assert_eq!(symmetric.equivalent_problems().len(), 3);
        let variants = symmetric.equivalent_problems();
        assert!(variants.contains(&problem(&[[0, 0, 3]], &[[0, 0, 3]])));
    }

    #[test]
    fn test_is_canonical() {
        assert!(problem(&[[3, 0, 0]], &[[3, 0, 0]]).is_canonical());
        assert!(!problem(&[[0, 0, 3]], &[[0, 0, 3]]).is_canonical());
    }

    #[test]
    fn test_monotone_setters() {
        let mut p = problem(&[[3, 0, 0]], &[[3, 0, 0]]);
        p.set_upper_bound(Complexity::Global);
        p.set_upper_bound(Complexity::Logarithmic);
        p.set_upper_bound(Complexity::Global);
        assert_eq!(p.upper_bound(), Complexity::Logarithmic);
        p.set_lower_bound(Complexity::Constant);
        p.set_lower_bound(Complexity::Unclassified);
        assert_eq!(p.lower_bound(), Complexity::Constant);
        p.set_upper_bound(Complexity::Unclassified);
        assert_eq!(p.upper_bound(), Complexity::Logarithmic);
        p.set_complexity(Complexity::IteratedLogarithmic);
        assert_eq!(p.complexity(), Complexity::IteratedLogarithmic);
    }

    #[test]
    #[should_panic(expected = "inconsistent bounds")]
    fn test_inconsistent_bounds_panic() {
        let mut p = problem(&[[3, 0, 0]], &[[3, 0, 0]]);
        p.set_upper_bound(Complexity::Constant);
        p.set_lower_bound(Complexity::Logarithmic);
    }

    #[test]
    fn test_tighten_constant_upper_bound() {
        let mut p = problem(&[[3, 0, 0]], &[[3, 0, 0]]);
        assert_eq!(p.constant_upper_bound(), u32::MAX);
        p.tighten_constant_upper_bound(7);
        p.tighten_constant_upper_bound(9);
        assert_eq!(p.constant_upper_bound(), 7);
    }

    #[test]
    fn test_alpha_round_trip() {
        let p = problem(&[[1, 2, 0], [2, 1, 0]], &[[1, 2, 0], [3, 0, 0]]);
        let text = p.to_string();
        assert_eq!(text, "ABB AAB | ABB AAA");
        let parts: Vec<_> = text.split(" | ").collect();
        let parsed = Problem::from_alpha(parts[0], parts[1], 3, 3).unwrap();
        assert_eq!(parsed, p);
    }

    #[test]
    fn test_alpha_errors() {
        assert_eq!(
            ConstraintSet::from_alpha("AAD", 3),
            Err(AlphaError::BadLabel('D'))
        );
        assert_eq!(
            ConstraintSet::from_alpha("AA", 3),
            Err(AlphaError::WrongDegree(2, 3))
        );
        assert!(ConstraintSet::from_alpha("", 3).unwrap().is_empty());
    }
}
