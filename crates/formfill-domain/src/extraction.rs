//! Extraction result module - the normalized output of field extraction

use crate::document::DocumentType;
use crate::value::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The normalized result of extracting fields from one document
///
/// `fields` keys are canonical semantic names (`wages`,
/// `federal_withholding`, ...), never form-specific identifiers. The result
/// is created once per ingest call and is immutable after creation.
///
/// `success == false` means the external service call itself failed; the
/// field map may still be partially populated but must not be treated as
/// complete. Parse problems inside a successful service call are soft: they
/// land in `errors` with `success` staying `true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// The document type this extraction ran for
    pub document_type: DocumentType,

    /// Whether the external service call succeeded
    pub success: bool,

    /// Canonical field name -> extracted value
    pub fields: BTreeMap<String, FieldValue>,

    /// Canonical field name -> extraction confidence in [0.0, 1.0]
    pub confidences: BTreeMap<String, f64>,

    /// Soft errors describing what could not be parsed
    pub errors: Vec<String>,

    /// Extraction method tag (which adapter produced this)
    pub method: String,
}

impl ExtractionResult {
    /// Create an empty successful result for the given type
    pub fn empty(document_type: DocumentType, method: impl Into<String>) -> Self {
        Self {
            document_type,
            success: true,
            fields: BTreeMap::new(),
            confidences: BTreeMap::new(),
            errors: Vec::new(),
            method: method.into(),
        }
    }

    /// Create a failed result describing an external service failure
    ///
    /// No fields are fabricated; callers see exactly what went wrong.
    pub fn service_failure(document_type: DocumentType, error: impl Into<String>) -> Self {
        Self {
            document_type,
            success: false,
            fields: BTreeMap::new(),
            confidences: BTreeMap::new(),
            errors: vec![error.into()],
            method: "service_failure".to_string(),
        }
    }

    /// Record a field with its confidence
    pub fn put_field(&mut self, name: impl Into<String>, value: FieldValue, confidence: f64) {
        let name = name.into();
        self.confidences.insert(name.clone(), confidence);
        self.fields.insert(name, value);
    }

    /// Look up an amount field by canonical name
    pub fn amount(&self, name: &str) -> Option<f64> {
        self.fields.get(name).and_then(FieldValue::as_amount)
    }

    /// Look up a text field by canonical name
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(FieldValue::as_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result() {
        let r = ExtractionResult::empty(DocumentType::W2, "w2_markdown");
        assert!(r.success);
        assert!(r.fields.is_empty());
        assert!(r.errors.is_empty());
        assert_eq!(r.method, "w2_markdown");
    }

    #[test]
    fn test_service_failure_has_no_fields() {
        let r = ExtractionResult::service_failure(DocumentType::W2, "timeout after 3 attempts");
        assert!(!r.success);
        assert!(r.fields.is_empty());
        assert_eq!(r.errors.len(), 1);
    }

    #[test]
    fn test_put_and_lookup() {
        let mut r = ExtractionResult::empty(DocumentType::W2, "test");
        r.put_field("wages", FieldValue::Amount(48500.0), 0.9);
        r.put_field("employer_name", FieldValue::Text("Acme Corp".into()), 0.75);

        assert_eq!(r.amount("wages"), Some(48500.0));
        assert_eq!(r.text("employer_name"), Some("Acme Corp"));
        assert_eq!(r.confidences["wages"], 0.9);
        // Absent box is absent, not zero
        assert_eq!(r.amount("federal_withholding"), None);
    }
}
