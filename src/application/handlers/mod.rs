//! Query handlers.

pub mod comparison;

pub use comparison::{CompareAreasError, CompareAreasHandler, CompareAreasQuery, CompareAreasResult};
