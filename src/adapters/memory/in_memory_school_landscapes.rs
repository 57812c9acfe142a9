//! In-Memory School Landscape Adapter

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::AreaId;
use crate::domain::indices::{SchoolDirectory, SchoolLandscape, SchoolRecord};
use crate::ports::{ReaderError, SchoolLandscapeReader};

#[derive(Debug, Clone, Default)]
pub struct InMemorySchoolLandscapes {
    directory: Arc<RwLock<SchoolDirectory>>,
}

impl InMemorySchoolLandscapes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_directory(directory: SchoolDirectory) -> Self {
        Self {
            directory: Arc::new(RwLock::new(directory)),
        }
    }

    pub async fn add_landscape(&self, landscape: SchoolLandscape) {
        self.directory.write().await.landscapes.push(landscape);
    }

    /// Adds a school known only by its directory area name.
    pub async fn add_unattached(&self, school: SchoolRecord) {
        self.directory.write().await.unattached.push(school);
    }
}

#[async_trait]
impl SchoolLandscapeReader for InMemorySchoolLandscapes {
    async fn landscape(&self, area_id: &AreaId) -> Result<Option<SchoolLandscape>, ReaderError> {
        Ok(self.directory.read().await.resolve(area_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_attached_landscape() {
        let reader = InMemorySchoolLandscapes::new();
        let area = AreaId::new("Bishan").unwrap();
        reader
            .add_landscape(SchoolLandscape::new(area.clone(), vec![SchoolRecord::new("s1", "Ai Tong")]))
            .await;

        let landscape = reader.landscape(&area).await.unwrap().unwrap();
        assert_eq!(landscape.school_count(), 1);
    }

    #[tokio::test]
    async fn falls_back_to_school_area_names() {
        let reader = InMemorySchoolLandscapes::new();
        reader
            .add_unattached(SchoolRecord::new("s1", "Rosyth").in_area("SERANGOON"))
            .await;

        let landscape = reader
            .landscape(&AreaId::new("Serangoon").unwrap())
            .await
            .unwrap();
        assert!(landscape.is_some());
    }

    #[tokio::test]
    async fn unknown_area_has_no_landscape() {
        let reader = InMemorySchoolLandscapes::default();
        let landscape = reader.landscape(&AreaId::new("Nowhere").unwrap()).await.unwrap();
        assert!(landscape.is_none());
    }
}
