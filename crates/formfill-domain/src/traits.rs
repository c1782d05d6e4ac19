//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the engine and infrastructure.
//! Implementations live in other crates (`formfill-docai`, `formfill-store`)
//! or in the host application.

use crate::document::DocumentRef;
use crate::version::FilledFormVersion;
use serde::{Deserialize, Serialize};

/// One page of output from the document-understanding service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPage {
    /// 1-based page number
    pub number: usize,

    /// Markdown/text rendering of the page contents
    pub markdown: String,
}

/// Raw output of the document-understanding service for one document
///
/// The extraction adapter is the only component that parses this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    /// Per-page markdown content
    pub pages: Vec<RawPage>,

    /// Which backend/model produced the output
    pub method: String,
}

impl RawDocument {
    /// Build a single-page raw document (common in tests)
    pub fn single_page(markdown: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            pages: vec![RawPage {
                number: 1,
                markdown: markdown.into(),
            }],
            method: method.into(),
        }
    }

    /// All pages joined into one text blob
    pub fn full_text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.markdown.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Trait for the external document-understanding/OCR service
///
/// Implemented by the infrastructure layer (formfill-docai)
pub trait DocumentUnderstanding {
    /// Error type for service operations
    type Error;

    /// Submit a document and get back its per-page text representation
    ///
    /// Implementations enforce their own request deadline; a caller that
    /// gives up on a call abandons it but cannot cancel it.
    fn submit(&self, document: &DocumentRef) -> Result<RawDocument, Self::Error>;

    /// Whether retrying a failed submit could plausibly succeed
    ///
    /// Permanent failures (malformed responses, rejected requests) return
    /// false so callers stop retrying immediately.
    fn is_transient(_error: &Self::Error) -> bool {
        true
    }
}

/// Trait for the blob store holding source and filled artifacts
///
/// Methods take `&self`; implementations use interior mutability so that
/// concurrent fill calls can write in parallel.
pub trait ObjectStore: Send + Sync {
    /// Error type for object store operations
    type Error;

    /// Write bytes under a key, overwriting any existing object
    fn put(&self, key: &str, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Read the bytes under a key, if present
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error>;
}

/// Outcome of a conditional metadata write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasOutcome {
    /// The record was stored; this caller owns the version number
    Stored,

    /// A record already exists for the same version key
    Conflict,
}

/// Trait for the metadata store backing version allocation
///
/// The conditional put is the system's single critical section: two callers
/// racing to claim the same `(subject_id, form_type, tax_year, version)`
/// must never both succeed.
pub trait MetadataStore: Send + Sync {
    /// Error type for metadata operations
    type Error;

    /// Insert a version record iff none exists for the same
    /// `(subject_id, form_type, tax_year, version)`
    fn put_if_absent(&self, record: &FilledFormVersion) -> Result<CasOutcome, Self::Error>;

    /// Remove a version record whose artifact was never written
    ///
    /// Compensation for a failed artifact write after the version was
    /// claimed. Committed versions are never removed.
    fn remove(&self, record: &FilledFormVersion) -> Result<(), Self::Error>;

    /// Highest allocated version in the scope, if any
    fn latest_version(
        &self,
        subject_id: &str,
        form_type: &str,
        tax_year: u16,
    ) -> Result<Option<u32>, Self::Error>;

    /// All versions for `(subject_id, form_type)`, version descending
    fn list_versions(
        &self,
        subject_id: &str,
        form_type: &str,
    ) -> Result<Vec<FilledFormVersion>, Self::Error>;

    /// Records for a form type created at or after `since` (Unix seconds),
    /// newest first
    fn recent_by_form(
        &self,
        form_type: &str,
        since: u64,
    ) -> Result<Vec<FilledFormVersion>, Self::Error>;
}
