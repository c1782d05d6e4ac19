//! In-memory backend implementations
//!
//! Used by tests and embedded callers. Both stores use interior mutability
//! so that concurrent writers exercise the same conditional-write path a
//! networked backend would.

use formfill_domain::traits::{CasOutcome, MetadataStore, ObjectStore};
use formfill_domain::FilledFormVersion;
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Mutex;

/// In-memory object store
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryObjectStore {
    /// Create an empty object store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects
    pub fn len(&self) -> usize {
        lock(&self.objects).len()
    }

    /// Whether the store holds no objects
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ObjectStore for MemoryObjectStore {
    type Error = Infallible;

    fn put(&self, key: &str, bytes: &[u8]) -> Result<(), Self::Error> {
        lock(&self.objects).insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        Ok(lock(&self.objects).get(key).cloned())
    }
}

/// In-memory metadata store with a true compare-and-swap insert
///
/// The record list is guarded by one mutex, so `put_if_absent`'s
/// check-then-insert is atomic with respect to other writers - the same
/// guarantee a conditional put against a networked metadata store gives.
#[derive(Debug, Default)]
pub struct MemoryMetadataStore {
    records: Mutex<Vec<FilledFormVersion>>,
}

impl MemoryMetadataStore {
    /// Create an empty metadata store
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of records across all scopes
    pub fn len(&self) -> usize {
        lock(&self.records).len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MetadataStore for MemoryMetadataStore {
    type Error = Infallible;

    fn put_if_absent(&self, record: &FilledFormVersion) -> Result<CasOutcome, Self::Error> {
        let mut records = lock(&self.records);
        let taken = records.iter().any(|r| {
            r.version_scope() == record.version_scope() && r.version == record.version
        });
        if taken {
            return Ok(CasOutcome::Conflict);
        }
        records.push(record.clone());
        Ok(CasOutcome::Stored)
    }

    fn remove(&self, record: &FilledFormVersion) -> Result<(), Self::Error> {
        lock(&self.records).retain(|r| r.document_id != record.document_id);
        Ok(())
    }

    fn latest_version(
        &self,
        subject_id: &str,
        form_type: &str,
        tax_year: u16,
    ) -> Result<Option<u32>, Self::Error> {
        let records = lock(&self.records);
        Ok(records
            .iter()
            .filter(|r| r.version_scope() == (subject_id, form_type, tax_year))
            .map(|r| r.version)
            .max())
    }

    fn list_versions(
        &self,
        subject_id: &str,
        form_type: &str,
    ) -> Result<Vec<FilledFormVersion>, Self::Error> {
        let records = lock(&self.records);
        let mut matching: Vec<FilledFormVersion> = records
            .iter()
            .filter(|r| r.subject_id == subject_id && r.form_type == form_type)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.version.cmp(&a.version));
        Ok(matching)
    }

    fn recent_by_form(
        &self,
        form_type: &str,
        since: u64,
    ) -> Result<Vec<FilledFormVersion>, Self::Error> {
        let records = lock(&self.records);
        let mut matching: Vec<FilledFormVersion> = records
            .iter()
            .filter(|r| r.form_type == form_type && r.created_at >= since)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }
}

/// Lock a mutex, recovering the data from a poisoned lock
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
