//! Error types for the Engine

use thiserror::Error;

/// Errors that cross the engine boundary
///
/// Soft failures (parse problems, unmapped fields, invalid documents) are
/// data on the result types, not errors. Only unknown-form lookups and
/// storage problems that survived retries end up here.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The requested form type is not in the catalog
    #[error("Unknown form type: {0}")]
    UnknownForm(String),

    /// Version allocation lost every retry to concurrent writers
    #[error("Version conflict: {0}")]
    VersionConflict(String),

    /// Artifact or metadata storage failed (data-loss risk)
    #[error("Storage failure: {0}")]
    Storage(String),

    /// The filled artifact could not be serialized
    #[error("Artifact serialization failed: {0}")]
    Serialization(String),

    /// An internal task failed to complete
    #[error("Task error: {0}")]
    Task(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<formfill_store::StoreError> for EngineError {
    fn from(e: formfill_store::StoreError) -> Self {
        match e {
            formfill_store::StoreError::VersionConflict { .. } => {
                EngineError::VersionConflict(e.to_string())
            }
            other => EngineError::Storage(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::Serialization(e.to_string())
    }
}
