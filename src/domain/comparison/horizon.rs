//! Planning-horizon weight redistribution.

use crate::domain::preference::{HoldingHorizon, Weights};

/// Per-dimension multipliers for a planning horizon.
///
/// Short holds care more about entry cost, long holds about lease and stability.
pub fn horizon_multipliers(horizon: HoldingHorizon) -> Weights {
    match horizon {
        HoldingHorizon::Short => Weights::new(1.2, 0.85, 1.0, 0.9).with_rent(1.1),
        HoldingHorizon::Medium => Weights::new(1.0, 1.0, 1.0, 1.0).with_rent(1.0),
        HoldingHorizon::Long => Weights::new(0.85, 1.25, 1.0, 1.2).with_rent(0.9),
    }
}

/// Applies the horizon multipliers to base weights and renormalises.
pub fn apply_horizon(weights: &Weights, horizon: HoldingHorizon) -> Weights {
    weights.scaled(&horizon_multipliers(horizon))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balanced() -> Weights {
        Weights::new(0.30, 0.30, 0.25, 0.15)
    }

    #[test]
    fn medium_horizon_leaves_weights_alone() {
        let adjusted = apply_horizon(&balanced(), HoldingHorizon::Medium);
        assert!((adjusted.cost - 0.30).abs() < 1e-12);
        assert!((adjusted.stability - 0.15).abs() < 1e-12);
    }

    #[test]
    fn short_horizon_boosts_cost() {
        let adjusted = apply_horizon(&balanced(), HoldingHorizon::Short);
        assert!(adjusted.cost > 0.30);
        assert!(adjusted.lease < 0.30);
        assert!(adjusted.is_normalized());
    }

    #[test]
    fn long_horizon_boosts_lease_and_stability() {
        let adjusted = apply_horizon(&balanced(), HoldingHorizon::Long);
        assert!(adjusted.lease > 0.30);
        assert!(adjusted.stability > 0.15);
        assert!(adjusted.cost < 0.30);
        assert!(adjusted.is_normalized());
    }
}
