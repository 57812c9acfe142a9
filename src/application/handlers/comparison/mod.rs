//! Comparison query handlers.

mod compare_areas;

pub use compare_areas::{
    CompareAreasError, CompareAreasHandler, CompareAreasQuery, CompareAreasResult,
};
