//! Snapshot Adapter
//!
//! Serves both reader ports from a raw-data snapshot file.
//!
//! ## Formats
//!
//! - **JSON** - default, any extension other than `.yaml`/`.yml`
//! - **YAML** - `.yaml` or `.yml`
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::snapshot::SnapshotStore;
//!
//! let store = Arc::new(SnapshotStore::load("./data/snapshot.json").await?);
//! let handler = CompareAreasHandler::new(store.clone(), store);
//! ```

mod snapshot_store;

pub use snapshot_store::{AreaSeries, DataSnapshot, SnapshotFormat, SnapshotStore};
