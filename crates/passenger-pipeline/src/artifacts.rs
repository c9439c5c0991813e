//! Frozen fit-time state

use crate::PipelineError;
use feature_encoder::EncoderSchema;
use feature_transform::AgeImputation;
use lookup_store::LookupTables;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Bumped whenever the serialized layout changes
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Everything serving needs to replay fit-time transforms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifacts {
    pub format_version: u32,
    pub age_imputation: AgeImputation,
    pub lookups: LookupTables,
    pub schema: EncoderSchema,
}

impl Artifacts {
    /// Create artifacts at the current format version
    pub fn new(age_imputation: AgeImputation, lookups: LookupTables, schema: EncoderSchema) -> Self {
        Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            age_imputation,
            lookups,
            schema,
        }
    }

    /// Serialize with postcard
    pub fn to_bytes(&self) -> Result<Vec<u8>, PipelineError> {
        Ok(postcard::to_allocvec(self)?)
    }

    /// Deserialize and check version and encoder layout
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PipelineError> {
        let artifacts: Self = postcard::from_bytes(bytes)?;
        if artifacts.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(PipelineError::Artifact(format!(
                "unsupported format version {} (expected {})",
                artifacts.format_version, ARTIFACT_FORMAT_VERSION
            )));
        }
        artifacts.schema.check_layout()?;
        Ok(artifacts)
    }

    /// Write to disk, creating parent directories
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PipelineError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let bytes = self.to_bytes()?;
        fs::write(path, &bytes)?;
        info!("Saved artifacts ({} bytes) to {}", bytes.len(), path.display());
        Ok(())
    }

    /// Read from disk
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let artifacts = Self::from_bytes(&bytes)?;
        info!(
            "Loaded artifacts from {} ({} columns, age imputation {})",
            path.display(),
            artifacts.schema.width(),
            artifacts.age_imputation.as_str()
        );
        Ok(artifacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::fitted;

    #[test]
    fn test_bytes_preserve_state() {
        let artifacts = fitted().artifacts().clone();
        let restored = Artifacts::from_bytes(&artifacts.to_bytes().unwrap()).unwrap();
        assert_eq!(restored, artifacts);
    }

    #[test]
    fn test_unknown_version_rejected() {
        let mut artifacts = fitted().artifacts().clone();
        artifacts.format_version = ARTIFACT_FORMAT_VERSION + 1;
        let bytes = artifacts.to_bytes().unwrap();
        assert!(matches!(
            Artifacts::from_bytes(&bytes),
            Err(PipelineError::Artifact(msg)) if msg.contains("version")
        ));
    }

    #[test]
    fn test_truncated_bytes_rejected() {
        let bytes = fitted().artifacts().to_bytes().unwrap();
        assert!(matches!(
            Artifacts::from_bytes(&bytes[..bytes.len() / 2]),
            Err(PipelineError::Artifact(_))
        ));
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("pipeline.bin");
        let artifacts = fitted().artifacts().clone();
        artifacts.save_to_file(&path).unwrap();
        assert_eq!(Artifacts::load_from_file(&path).unwrap(), artifacts);
    }
}
