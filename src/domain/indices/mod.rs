//! Indices module - Per-area risk and pressure calculators.
//!
//! Each calculator is a pure function of its explicit inputs:
//!
//! - `lease_risk` - Rule-scored remaining-lease exposure
//! - `education_pressure` - Education Pressure Index (EPI) from the school landscape
//! - `commute_burden` - Commute Burden Index (CBI) from a static structural table
//! - `school_landscape` - Schools, cutoff history, and landscape resolution

mod commute_burden;
mod education_pressure;
mod lease_risk;
mod school_landscape;

pub use commute_burden::{
    calculate_commute_burden_index, CommuteBurdenIndex, CommuteLevel, CommuteStructure,
    CommuteTable,
};
pub use education_pressure::{
    calculate_education_pressure_index, EducationPressureCalculator, EducationPressureIndex,
    FactorBand, PressureFactor, PressureLevel,
};
pub use lease_risk::{
    calculate_lease_risk, LeaseRiskAssessment, LeaseRiskCalculator, LeaseRiskLevel,
    LEASE_CRITICAL_YEARS, LEASE_HIGH_YEARS, LEASE_MODERATE_YEARS,
};
pub use school_landscape::{
    CutoffBand, CutoffRecord, LandscapeSummary, SchoolDirectory, SchoolLandscape, SchoolRecord,
};
