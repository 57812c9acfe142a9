//! Weight vectors over the comparison dimensions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance used when checking that weights sum to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// A dimension two areas are compared on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Cost,
    Lease,
    School,
    Stability,
    Rent,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Cost,
        Dimension::Lease,
        Dimension::School,
        Dimension::Stability,
        Dimension::Rent,
    ];
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Dimension::Cost => "cost",
            Dimension::Lease => "lease",
            Dimension::School => "school",
            Dimension::Stability => "stability",
            Dimension::Rent => "rent",
        };
        write!(f, "{}", s)
    }
}

/// Non-negative weight per dimension. Normalised vectors sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Weights {
    pub cost: f64,
    pub lease: f64,
    pub school: f64,
    pub stability: f64,
    #[serde(default)]
    pub rent: f64,
}

impl Weights {
    pub const fn new(cost: f64, lease: f64, school: f64, stability: f64) -> Self {
        Self {
            cost,
            lease,
            school,
            stability,
            rent: 0.0,
        }
    }

    pub const fn with_rent(self, rent: f64) -> Self {
        Self { rent, ..self }
    }

    /// Equal weight on the four core dimensions.
    pub const fn even() -> Self {
        Self::new(0.25, 0.25, 0.25, 0.25)
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Cost => self.cost,
            Dimension::Lease => self.lease,
            Dimension::School => self.school,
            Dimension::Stability => self.stability,
            Dimension::Rent => self.rent,
        }
    }

    fn set(&mut self, dimension: Dimension, value: f64) {
        match dimension {
            Dimension::Cost => self.cost = value,
            Dimension::Lease => self.lease = value,
            Dimension::School => self.school = value,
            Dimension::Stability => self.stability = value,
            Dimension::Rent => self.rent = value,
        }
    }

    pub fn sum(&self) -> f64 {
        Dimension::ALL.iter().map(|d| self.get(*d)).sum()
    }

    /// True when every weight is in [0, 1] and the total is 1.
    pub fn is_normalized(&self) -> bool {
        Dimension::ALL
            .iter()
            .all(|d| (0.0..=1.0).contains(&self.get(*d)))
            && (self.sum() - 1.0).abs() < WEIGHT_SUM_TOLERANCE
    }

    /// Scales the vector to sum to 1.
    ///
    /// Negative and non-finite weights count as zero. A vector with nothing
    /// left to scale becomes [`Weights::even`].
    pub fn normalized(&self) -> Self {
        let mut cleaned = *self;
        for dimension in Dimension::ALL {
            let value = cleaned.get(dimension);
            if !value.is_finite() || value < 0.0 {
                cleaned.set(dimension, 0.0);
            }
        }

        let total = cleaned.sum();
        if total <= 0.0 {
            return Self::even();
        }

        let mut scaled = cleaned;
        for dimension in Dimension::ALL {
            scaled.set(dimension, cleaned.get(dimension) / total);
        }
        scaled
    }

    /// Adds signed deltas, clamps each weight to [0, 1], then renormalises.
    pub fn adjusted(&self, deltas: &WeightDeltas) -> Self {
        let mut adjusted = *self;
        for dimension in Dimension::ALL {
            let value = (self.get(dimension) + deltas.get(dimension)).clamp(0.0, 1.0);
            adjusted.set(dimension, value);
        }
        adjusted.normalized()
    }

    /// Multiplies each weight by its factor, then renormalises.
    pub fn scaled(&self, factors: &Weights) -> Self {
        let mut scaled = *self;
        for dimension in Dimension::ALL {
            scaled.set(dimension, self.get(dimension) * factors.get(dimension));
        }
        scaled.normalized()
    }

    /// Drops one dimension and renormalises the rest.
    pub fn without(&self, dimension: Dimension) -> Self {
        let mut reduced = *self;
        reduced.set(dimension, 0.0);
        reduced.normalized()
    }
}

/// Signed additive adjustments to a weight vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WeightDeltas {
    pub cost: f64,
    pub lease: f64,
    pub school: f64,
    pub stability: f64,
}

impl WeightDeltas {
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Cost => self.cost,
            Dimension::Lease => self.lease,
            Dimension::School => self.school,
            Dimension::Stability => self.stability,
            Dimension::Rent => 0.0,
        }
    }

    pub fn add(&mut self, dimension: Dimension, delta: f64) {
        match dimension {
            Dimension::Cost => self.cost += delta,
            Dimension::Lease => self.lease += delta,
            Dimension::School => self.school += delta,
            Dimension::Stability => self.stability += delta,
            Dimension::Rent => {}
        }
    }

    /// Sum of absolute deltas.
    pub fn magnitude(&self) -> f64 {
        self.cost.abs() + self.lease.abs() + self.school.abs() + self.stability.abs()
    }

    /// Scales every delta down proportionally so the magnitude is at most `cap`.
    pub fn capped(&self, cap: f64) -> Self {
        let magnitude = self.magnitude();
        if magnitude <= cap || magnitude == 0.0 {
            return *self;
        }
        let factor = cap / magnitude;
        Self {
            cost: self.cost * factor,
            lease: self.lease * factor,
            school: self.school * factor,
            stability: self.stability * factor,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.magnitude() == 0.0
    }
}
