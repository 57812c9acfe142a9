use async_trait::async_trait;

use super::ReaderError;
use crate::domain::foundation::AreaId;
use crate::domain::indices::SchoolLandscape;

/// Read-only port for the schools serving an area.
#[async_trait]
pub trait SchoolLandscapeReader: Send + Sync {
    /// Resolves the landscape for an area.
    ///
    /// Falls back to matching school directory area names ignoring case.
    /// Returns `None` when no school resolves.
    async fn landscape(&self, area_id: &AreaId) -> Result<Option<SchoolLandscape>, ReaderError>;
}
