//! Filled form version module

use crate::document::DocumentId;
use serde::{Deserialize, Serialize};

/// One immutable, versioned filled-form artifact record
///
/// Lifecycle is append-only: no updates, no deletes. Supersession is
/// implicit - a later version under the same key prefix. The version number
/// is allocated by the store; every other attribute is fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilledFormVersion {
    /// Unique id of this filled document
    pub document_id: DocumentId,

    /// Version within `(subject_id, form_type, tax_year)`, starting at 1
    pub version: u32,

    /// Object store key of the filled artifact
    pub storage_key: String,

    /// Hex SHA-256 checksum of the artifact bytes
    pub checksum: String,

    /// Creation time, seconds since the Unix epoch
    pub created_at: u64,

    /// Taxpayer/entity this filing belongs to
    pub subject_id: String,

    /// Form type identifier (`1040`, `ca_540`, ...)
    pub form_type: String,

    /// Tax year of the filing
    pub tax_year: u16,
}

impl FilledFormVersion {
    /// The composite key versions are allocated under
    pub fn version_scope(&self) -> (&str, &str, u16) {
        (&self.subject_id, &self.form_type, self.tax_year)
    }
}
