//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the comparison engine and the data it is fed. Adapters implement these ports.
//!
//! ## Reader Ports
//!
//! - `AreaStatsReader` - Pre-aggregated per-period transaction rows
//! - `SchoolLandscapeReader` - Schools and cutoff history per area

mod area_stats_reader;
mod reader_error;
mod school_landscape_reader;

pub use area_stats_reader::AreaStatsReader;
pub use reader_error::ReaderError;
pub use school_landscape_reader::SchoolLandscapeReader;
