//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - In-memory readers for tests and development
//! - `snapshot` - Readers backed by a JSON or YAML snapshot file

pub mod memory;
pub mod snapshot;

pub use memory::{InMemoryAreaStats, InMemorySchoolLandscapes};
pub use snapshot::{AreaSeries, DataSnapshot, SnapshotFormat, SnapshotStore};
