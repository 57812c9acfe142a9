//! Domain layer containing the comparison engine.
//!
//! Everything here is synchronous and side-effect free apart from tracing
//! events; inputs are fully resolved before any scoring happens.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, bounded scores, errors)
//! - `indices` - Lease risk, Education Pressure Index, Commute Burden Index
//! - `area` - Area Profile built from per-period transaction rows
//! - `preference` - Weights, preference modes, family profiles, hard and school rules
//! - `comparison` - Pairwise scoring, verdict text and post-processing

pub mod area;
pub mod comparison;
pub mod foundation;
pub mod indices;
pub mod preference;
