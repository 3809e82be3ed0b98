//! Curated canonical problems with externally proven bounds.

use crate::problem::{AlphaError, Problem};
use crate::types::Degree;

/// Four lists of problems whose logarithmic or iterated-logarithmic status
/// is known from the literature. They are matched against a universe by
/// structural equality only, never by containment, so entries must be in
/// canonical form. The tables are external input and default to empty.
#[derive(Default)]
pub struct ReferenceTables {
    pub logarithmic_upper: Vec<Problem>,
    pub logarithmic_tight: Vec<Problem>,
    pub logarithmic_lower: Vec<Problem>,
    pub iterated_logarithmic: Vec<Problem>,
}

impl ReferenceTables {
    /// Parse each list from `(white, black)` alpha descriptions carrying
    /// the universe's degree pair.
    pub fn from_alpha(
        logarithmic_upper: &[(&str, &str)],
        logarithmic_tight: &[(&str, &str)],
        logarithmic_lower: &[(&str, &str)],
        iterated_logarithmic: &[(&str, &str)],
        white_degree: Degree,
        black_degree: Degree,
    ) -> Result<Self, AlphaError> {
        let parse = |entries: &[(&str, &str)]| -> Result<Vec<Problem>, AlphaError> {
            entries
                .iter()
                .map(|&(white, black)| Problem::from_alpha(white, black, white_degree, black_degree))
                .collect()
        };
        Ok(Self {
            logarithmic_upper: parse(logarithmic_upper)?,
            logarithmic_tight: parse(logarithmic_tight)?,
            logarithmic_lower: parse(logarithmic_lower)?,
            iterated_logarithmic: parse(iterated_logarithmic)?,
        })
    }
}
