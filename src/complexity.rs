//! The round-complexity scale.

/// A distributed round-complexity verdict.
///
/// The derived order is the propagation order: `Unclassified` is the bottom
/// "no information" sentinel and `Unsolvable` the absorbing terminal, set
/// directly and never derived by interpolation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Complexity {
    Unclassified,
    Constant,
    IteratedLogarithmic,
    Logarithmic,
    Global,
    Unsolvable,
}

impl Complexity {
    /// Every value, bottom sentinel included, in ascending order.
    pub const ALL: [Complexity; 6] = [
        Complexity::Unclassified,
        Complexity::Constant,
        Complexity::IteratedLogarithmic,
        Complexity::Logarithmic,
        Complexity::Global,
        Complexity::Unsolvable,
    ];

    /// The ascending sweep order for propagation: every value that carries
    /// information about a problem.
    pub const REAL: [Complexity; 5] = [
        Complexity::Constant,
        Complexity::IteratedLogarithmic,
        Complexity::Logarithmic,
        Complexity::Global,
        Complexity::Unsolvable,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Complexity::Unclassified => "unclassified",
            Complexity::Constant => "constant",
            Complexity::IteratedLogarithmic => "iterated logarithmic",
            Complexity::Logarithmic => "logarithmic",
            Complexity::Global => "global",
            Complexity::Unsolvable => "unsolvable",
        }
    }

    pub(crate) fn code(self) -> i64 {
        match self {
            Complexity::Unclassified => 0,
            Complexity::Constant => 1,
            Complexity::IteratedLogarithmic => 2,
            Complexity::Logarithmic => 3,
            Complexity::Global => 4,
            Complexity::Unsolvable => 5,
        }
    }

    pub(crate) fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Complexity::Unclassified),
            1 => Some(Complexity::Constant),
            2 => Some(Complexity::IteratedLogarithmic),
            3 => Some(Complexity::Logarithmic),
            4 => Some(Complexity::Global),
            5 => Some(Complexity::Unsolvable),
            _ => None,
        }
    }
}
