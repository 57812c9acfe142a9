//! Data snapshot configuration

use serde::Deserialize;

use super::error::ValidationError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapshotConfig {
    /// Default snapshot file for the binary (JSON, or YAML by extension)
    pub path: Option<String>,
}

impl SnapshotConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.path {
            Some(path) if path.trim().is_empty() => Err(ValidationError::BlankSnapshotPath),
            _ => Ok(()),
        }
    }
}
