use crate::types::{Degree, Label, NUM_LABELS};
use std::fmt;

/// A multiset of labels around one node, stored as per-label counts.
///
/// Entry `i` counts how many incident edge-ends carry label `i`; the counts
/// sum to the degree of the node's side. Two configurations are equal iff
/// their count vectors are equal, so label order within a configuration
/// never matters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Configuration([u8; NUM_LABELS]);

impl Configuration {
    pub fn new(counts: [u8; NUM_LABELS]) -> Self {
        Configuration(counts)
    }

    pub fn degree(&self) -> Degree {
        self.0.iter().map(|&count| count as Degree).sum()
    }

    pub fn count(&self, label: Label) -> u8 {
        self.0[label]
    }

    /// Labels appearing with nonzero count.
    pub fn labels(&self) -> impl Iterator<Item = Label> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(label, _)| label)
    }

    /// The image under a label permutation: label `i` is renamed to `perm[i]`.
    pub fn permuted(&self, perm: &[Label]) -> Self {
        let mut counts = [0; NUM_LABELS];
        for (label, &count) in self.0.iter().enumerate() {
            counts[perm[label]] = count;
        }
        Configuration(counts)
    }

    /// Every count vector summing to the given degree.
    pub fn all_of_degree(degree: Degree) -> Vec<Self> {
        let mut configurations = Vec::new();
        for first in 0..=degree {
            for second in 0..=degree - first {
                configurations.push(Configuration([
                    first as u8,
                    second as u8,
                    (degree - first - second) as u8,
                ]));
            }
        }
        configurations
    }

    pub(crate) fn mix(&self) -> u64 {
        let packed = self
            .0
            .iter()
            .fold(0u64, |acc, &count| (acc << 8) | u64::from(count));
        packed
            .wrapping_mul(0x9e37_79b9_7f4a_7c15)
            .rotate_left(31)
            .wrapping_mul(0x517c_c1b7_2722_0a95)
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, &count) in self.0.iter().enumerate() {
            for _ in 0..count {
                write!(f, "{}", (b'A' + label as u8) as char)?;
            }
        }
        Ok(())
    }
}
