//! Request and response types for ingest and fill

use formfill_domain::{
    DocumentRef, DocumentType, ExtractionResult, FieldMappingResult, FieldValue,
    FilledFormVersion, ValidationOutcome,
};
use std::collections::BTreeMap;

/// Request to ingest one source document
#[derive(Debug, Clone)]
pub struct IngestRequest {
    /// Locator of the uploaded document
    pub document: DocumentRef,

    /// Subject the document belongs to
    pub subject_id: String,

    /// Tax year the document covers
    pub tax_year: u16,

    /// Caller-supplied type, bypassing classification when present
    pub document_type: Option<DocumentType>,
}

/// Result of an ingest operation
///
/// Ingest never proceeds to filling; the caller reviews (and possibly
/// edits) the extracted fields first.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    /// The resolved document type
    pub document_type: DocumentType,

    /// Normalized canonical fields with confidences and soft errors
    pub extraction: ExtractionResult,

    /// Rule findings; blocking errors mean the fields must not be used as-is
    pub validation: ValidationOutcome,
}

/// Request to fill one form from a semantic field map
#[derive(Debug, Clone)]
pub struct FillRequest {
    /// Target form type (must exist in the catalog)
    pub form_type: String,

    /// Subject the filing belongs to
    pub subject_id: String,

    /// Tax year of the filing
    pub tax_year: u16,

    /// Semantic field map; keys may be canonical names or arbitrary
    /// caller conventions resolved by alias inference
    pub fields: BTreeMap<String, FieldValue>,
}

/// Result of a fill operation
#[derive(Debug, Clone)]
pub struct FillOutcome {
    /// The persisted, versioned artifact record
    pub version: FilledFormVersion,

    /// How the input fields landed on the form, including what did not
    pub mapping: FieldMappingResult,
}
