//! Home Compass - Residential area comparison engine
//!
//! Compares two residential areas for a home buyer: entry cost, lease
//! runway, school-admission pressure, price stability and commute burden,
//! weighted by what the buyer cares about, with a plain-language verdict.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
