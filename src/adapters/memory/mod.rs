//! In-memory reader adapters (testing/development).

mod in_memory_area_stats;
mod in_memory_school_landscapes;

pub use in_memory_area_stats::InMemoryAreaStats;
pub use in_memory_school_landscapes::InMemorySchoolLandscapes;
