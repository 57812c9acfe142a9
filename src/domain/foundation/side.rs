//! Which of the two compared areas a value belongs to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One side of a pairwise comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaSide {
    A,
    B,
}

impl AreaSide {
    pub fn other(&self) -> AreaSide {
        match self {
            AreaSide::A => AreaSide::B,
            AreaSide::B => AreaSide::A,
        }
    }
}

impl fmt::Display for AreaSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AreaSide::A => write!(f, "a"),
            AreaSide::B => write!(f, "b"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_flips_side() {
        assert_eq!(AreaSide::A.other(), AreaSide::B);
        assert_eq!(AreaSide::B.other(), AreaSide::A);
    }
}
