//! The per-side facts that preference rules are evaluated against.

use serde::Serialize;

use crate::domain::area::AreaProfile;
use crate::domain::foundation::{AreaId, AreaSide, IndexScore};
use crate::domain::indices::{EducationPressureIndex, PressureLevel};

/// Rule inputs for one area.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideMetrics {
    pub area_id: AreaId,
    pub median_price: f64,
    pub median_lease_years: f64,
    pub epi: Option<IndexScore>,
}

impl SideMetrics {
    pub fn from_profile(profile: &AreaProfile, epi: Option<&EducationPressureIndex>) -> Self {
        let metrics = profile.metrics();
        Self {
            area_id: metrics.area_id.clone(),
            median_price: metrics.median_price,
            median_lease_years: metrics.median_lease_years,
            epi: epi.map(|e| e.epi()),
        }
    }

    pub fn pressure_level(&self) -> Option<PressureLevel> {
        self.epi.map(PressureLevel::from_epi)
    }
}

/// Rule inputs for both areas of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonMetrics {
    pub a: SideMetrics,
    pub b: SideMetrics,
}

impl ComparisonMetrics {
    pub fn new(a: SideMetrics, b: SideMetrics) -> Self {
        Self { a, b }
    }

    pub fn side(&self, side: AreaSide) -> &SideMetrics {
        match side {
            AreaSide::A => &self.a,
            AreaSide::B => &self.b,
        }
    }

    /// Absolute difference in median price.
    pub fn price_gap(&self) -> f64 {
        (self.a.median_price - self.b.median_price).abs()
    }

    /// The side with the higher median price; `None` when equal.
    pub fn pricier_side(&self) -> Option<AreaSide> {
        if self.a.median_price > self.b.median_price {
            Some(AreaSide::A)
        } else if self.b.median_price > self.a.median_price {
            Some(AreaSide::B)
        } else {
            None
        }
    }

    /// Absolute EPI difference when both areas have one.
    pub fn epi_gap(&self) -> Option<f64> {
        match (self.a.epi, self.b.epi) {
            (Some(a), Some(b)) => Some((a.value() - b.value()).abs()),
            _ => None,
        }
    }
}
