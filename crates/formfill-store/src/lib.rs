//! Formfill Storage Layer
//!
//! Persists filled-form artifacts and allocates their version numbers.
//!
//! # Versioning
//!
//! Versions are scoped to `(subject_id, form_type, tax_year)`, start at 1,
//! and are strictly increasing with no duplicates even under concurrent
//! writers. Allocation is optimistic: read the current maximum, attempt a
//! conditional metadata write for max+1, and retry on conflict up to a
//! bounded limit. There is no lock; contention is expected to be rare.
//!
//! The claim happens before the artifact write so that a losing racer can
//! never overwrite the bytes behind a version someone else owns.
//!
//! # Examples
//!
//! ```
//! use formfill_store::{FilledForm, MemoryMetadataStore, MemoryObjectStore, VersionedStore};
//!
//! let store = VersionedStore::new(MemoryObjectStore::new(), MemoryMetadataStore::new());
//! let version = store
//!     .save(FilledForm {
//!         subject_id: "subj-1".to_string(),
//!         form_type: "1040".to_string(),
//!         tax_year: 2024,
//!         artifact: b"{}".to_vec(),
//!     })
//!     .unwrap();
//! assert_eq!(version.version, 1);
//! ```

#![warn(missing_docs)]

mod memory;

pub use memory::{MemoryMetadataStore, MemoryObjectStore};

use formfill_domain::traits::{CasOutcome, MetadataStore, ObjectStore};
use formfill_domain::{DocumentId, FilledFormVersion};
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::{debug, warn};

/// Default bound on version-conflict retries
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Version allocation kept colliding with concurrent writers
    #[error("Version conflict after {attempts} attempts for ({subject_id}, {form_type}, {tax_year})")]
    VersionConflict {
        /// How many allocation attempts were made
        attempts: u32,
        /// Subject in the contended scope
        subject_id: String,
        /// Form type in the contended scope
        form_type: String,
        /// Tax year in the contended scope
        tax_year: u16,
    },

    /// Object store failure (genuine data-loss risk, propagated)
    #[error("Storage failure: {0}")]
    Storage(String),

    /// Metadata store failure
    #[error("Metadata failure: {0}")]
    Metadata(String),

    /// A stored artifact's bytes no longer match its recorded checksum
    #[error("Checksum mismatch for {storage_key}")]
    ChecksumMismatch {
        /// Key of the corrupt artifact
        storage_key: String,
    },

    /// A recorded artifact is missing from the object store
    #[error("Artifact not found: {0}")]
    ArtifactNotFound(String),
}

/// A filled form ready to be persisted
///
/// Everything except the version number, which the store allocates.
#[derive(Debug, Clone)]
pub struct FilledForm {
    /// Taxpayer/entity the filing belongs to
    pub subject_id: String,

    /// Form type identifier
    pub form_type: String,

    /// Tax year of the filing
    pub tax_year: u16,

    /// Serialized filled artifact
    pub artifact: Vec<u8>,
}

/// Versioned, append-only store for filled-form artifacts
pub struct VersionedStore<O: ObjectStore, M: MetadataStore> {
    objects: O,
    metadata: M,
    max_retries: u32,
}

impl<O, M> VersionedStore<O, M>
where
    O: ObjectStore,
    M: MetadataStore,
    O::Error: std::fmt::Display,
    M::Error: std::fmt::Display,
{
    /// Create a store over the given backends
    pub fn new(objects: O, metadata: M) -> Self {
        Self {
            objects,
            metadata,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Set the bound on version-conflict retries
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Persist a filled form, allocating the next version in its scope
    ///
    /// # Errors
    ///
    /// - `VersionConflict` when concurrent writers exhaust the retry bound
    /// - `Storage`/`Metadata` when a backend fails
    pub fn save(&self, form: FilledForm) -> Result<FilledFormVersion, StoreError> {
        let checksum = hex::encode(Sha256::digest(&form.artifact));
        let created_at = unix_now();

        let mut attempts = 0;
        while attempts < self.max_retries {
            attempts += 1;

            let current = self
                .metadata
                .latest_version(&form.subject_id, &form.form_type, form.tax_year)
                .map_err(|e| StoreError::Metadata(e.to_string()))?;
            let next = current.unwrap_or(0) + 1;

            let record = FilledFormVersion {
                document_id: DocumentId::new(),
                version: next,
                storage_key: artifact_key(&form.subject_id, &form.form_type, form.tax_year, next),
                checksum: checksum.clone(),
                created_at,
                subject_id: form.subject_id.clone(),
                form_type: form.form_type.clone(),
                tax_year: form.tax_year,
            };

            // Conditional write is the critical section: the losing racer
            // sees Conflict, re-reads the max and tries again
            match self
                .metadata
                .put_if_absent(&record)
                .map_err(|e| StoreError::Metadata(e.to_string()))?
            {
                CasOutcome::Stored => {
                    if let Err(e) = self.objects.put(&record.storage_key, &form.artifact) {
                        // Release the claim so the scope keeps a contiguous
                        // history instead of a version with no artifact
                        if let Err(cleanup_err) = self.metadata.remove(&record) {
                            warn!(
                                storage_key = %record.storage_key,
                                error = %cleanup_err,
                                "failed to release unwritten version record"
                            );
                        }
                        return Err(StoreError::Storage(e.to_string()));
                    }

                    debug!(
                        subject_id = %record.subject_id,
                        form_type = %record.form_type,
                        version = record.version,
                        "stored filled form"
                    );
                    return Ok(record);
                }
                CasOutcome::Conflict => {
                    warn!(
                        subject_id = %form.subject_id,
                        form_type = %form.form_type,
                        attempted_version = next,
                        "version conflict, retrying"
                    );
                }
            }
        }

        Err(StoreError::VersionConflict {
            attempts,
            subject_id: form.subject_id,
            form_type: form.form_type,
            tax_year: form.tax_year,
        })
    }

    /// All versions for `(subject_id, form_type)`, newest first
    pub fn list_versions(
        &self,
        subject_id: &str,
        form_type: &str,
    ) -> Result<Vec<FilledFormVersion>, StoreError> {
        self.metadata
            .list_versions(subject_id, form_type)
            .map_err(|e| StoreError::Metadata(e.to_string()))
    }

    /// The latest version in a scope, if any
    pub fn latest(
        &self,
        subject_id: &str,
        form_type: &str,
        tax_year: u16,
    ) -> Result<Option<FilledFormVersion>, StoreError> {
        let versions = self.list_versions(subject_id, form_type)?;
        Ok(versions
            .into_iter()
            .find(|v| v.tax_year == tax_year))
    }

    /// Records for a form type created at or after `since`, newest first
    pub fn recent_by_form(
        &self,
        form_type: &str,
        since: u64,
    ) -> Result<Vec<FilledFormVersion>, StoreError> {
        self.metadata
            .recent_by_form(form_type, since)
            .map_err(|e| StoreError::Metadata(e.to_string()))
    }

    /// Load an artifact's bytes, verifying the recorded checksum
    pub fn load_artifact(&self, record: &FilledFormVersion) -> Result<Vec<u8>, StoreError> {
        let bytes = self
            .objects
            .get(&record.storage_key)
            .map_err(|e| StoreError::Storage(e.to_string()))?
            .ok_or_else(|| StoreError::ArtifactNotFound(record.storage_key.clone()))?;

        let checksum = hex::encode(Sha256::digest(&bytes));
        if checksum != record.checksum {
            return Err(StoreError::ChecksumMismatch {
                storage_key: record.storage_key.clone(),
            });
        }
        Ok(bytes)
    }
}

/// Canonical artifact key for a version
fn artifact_key(subject_id: &str, form_type: &str, tax_year: u16, version: u32) -> String {
    format!(
        "filled/{}/{}/{}/v{}.json",
        subject_id, form_type, tax_year, version
    )
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> VersionedStore<MemoryObjectStore, MemoryMetadataStore> {
        VersionedStore::new(MemoryObjectStore::new(), MemoryMetadataStore::new())
    }

    fn form(subject: &str, artifact: &[u8]) -> FilledForm {
        FilledForm {
            subject_id: subject.to_string(),
            form_type: "1040".to_string(),
            tax_year: 2024,
            artifact: artifact.to_vec(),
        }
    }

    #[test]
    fn test_first_version_is_one() {
        let store = store();
        let v = store.save(form("subj-1", b"{}")).unwrap();
        assert_eq!(v.version, 1);
        assert_eq!(v.storage_key, "filled/subj-1/1040/2024/v1.json");
    }

    #[test]
    fn test_sequential_versions_have_no_gaps() {
        let store = store();
        for expected in 1..=5 {
            let v = store.save(form("subj-1", b"{}")).unwrap();
            assert_eq!(v.version, expected);
        }
    }

    #[test]
    fn test_scopes_are_independent() {
        let store = store();
        assert_eq!(store.save(form("subj-1", b"{}")).unwrap().version, 1);
        assert_eq!(store.save(form("subj-2", b"{}")).unwrap().version, 1);

        let mut other_year = form("subj-1", b"{}");
        other_year.tax_year = 2023;
        assert_eq!(store.save(other_year).unwrap().version, 1);
    }

    #[test]
    fn test_artifact_round_trip_with_checksum() {
        let store = store();
        let v = store.save(form("subj-1", b"artifact body")).unwrap();
        let bytes = store.load_artifact(&v).unwrap();
        assert_eq!(bytes, b"artifact body");
    }

    #[test]
    fn test_checksum_mismatch_detected() {
        let store = store();
        let v = store.save(form("subj-1", b"original")).unwrap();
        // Corrupt the object behind the record
        store.objects.put(&v.storage_key, b"tampered").unwrap();

        assert!(matches!(
            store.load_artifact(&v),
            Err(StoreError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_latest_per_year() {
        let store = store();
        store.save(form("subj-1", b"a")).unwrap();
        let second = store.save(form("subj-1", b"b")).unwrap();

        let latest = store.latest("subj-1", "1040", 2024).unwrap().unwrap();
        assert_eq!(latest.version, second.version);
        assert!(store.latest("subj-1", "1040", 2020).unwrap().is_none());
    }
}
