//! Extractor strategy registry
//!
//! One extractor per `DocumentType`, selected here rather than through
//! conditionals scattered across the codebase. Adding a document type means
//! registering a new extractor.

use crate::form1099::{
    form1099_div_extractor, form1099_int_extractor, form1099_misc_extractor,
    form1099_nec_extractor,
};
use crate::w2::w2_extractor;
use formfill_domain::traits::RawDocument;
use formfill_domain::{DocumentType, ExtractionResult};
use std::collections::HashMap;
use tracing::warn;

/// Strategy interface for per-document-type field extraction
///
/// Implementations never return an error and never panic on malformed
/// input; whatever could not be parsed is described in the result's
/// `errors` list.
pub trait FieldExtractor: Send + Sync {
    /// The document type this extractor handles
    fn document_type(&self) -> DocumentType;

    /// Extract canonical fields from the raw service output
    fn extract(&self, raw: &RawDocument) -> ExtractionResult;
}

/// Registry mapping document types to their extractors
pub struct ExtractorRegistry {
    extractors: HashMap<DocumentType, Box<dyn FieldExtractor>>,
}

impl ExtractorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            extractors: HashMap::new(),
        }
    }

    /// Create a registry with all built-in extractors registered
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(w2_extractor()));
        registry.register(Box::new(form1099_int_extractor()));
        registry.register(Box::new(form1099_misc_extractor()));
        registry.register(Box::new(form1099_div_extractor()));
        registry.register(Box::new(form1099_nec_extractor()));
        registry
    }

    /// Register an extractor under its own document type
    ///
    /// A later registration for the same type replaces the earlier one.
    pub fn register(&mut self, extractor: Box<dyn FieldExtractor>) {
        self.extractors.insert(extractor.document_type(), extractor);
    }

    /// Whether an extractor is registered for the type
    pub fn supports(&self, document_type: DocumentType) -> bool {
        self.extractors.contains_key(&document_type)
    }

    /// Extract fields for the given document type
    ///
    /// Unknown or unregistered types yield an empty result carrying a soft
    /// error, never a panic or a guessed field map.
    pub fn extract(&self, document_type: DocumentType, raw: &RawDocument) -> ExtractionResult {
        match self.extractors.get(&document_type) {
            Some(extractor) => extractor.extract(raw),
            None => {
                warn!(%document_type, "no extractor registered");
                let mut result = ExtractionResult::empty(document_type, "unsupported");
                result.errors.push(format!(
                    "no extractor registered for document type '{}'",
                    document_type
                ));
                result
            }
        }
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_coverage() {
        let registry = ExtractorRegistry::with_builtin();
        for dt in [
            DocumentType::W2,
            DocumentType::Form1099Int,
            DocumentType::Form1099Misc,
            DocumentType::Form1099Div,
            DocumentType::Form1099Nec,
        ] {
            assert!(registry.supports(dt), "missing extractor for {}", dt);
        }
        assert!(!registry.supports(DocumentType::Unknown));
    }

    #[test]
    fn test_unknown_type_soft_error() {
        let registry = ExtractorRegistry::with_builtin();
        let raw = RawDocument::single_page("anything", "t");
        let result = registry.extract(DocumentType::Unknown, &raw);

        assert!(result.success);
        assert!(result.fields.is_empty());
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("unknown"));
    }

    #[test]
    fn test_dispatch_selects_by_type() {
        let registry = ExtractorRegistry::with_builtin();
        let raw = RawDocument::single_page("Box 1 Interest income: $250.00", "t");

        let as_int = registry.extract(DocumentType::Form1099Int, &raw);
        assert_eq!(as_int.amount("interest_income"), Some(250.0));

        // The same line means something else entirely to the W-2 extractor
        let as_w2 = registry.extract(DocumentType::W2, &raw);
        assert_eq!(as_w2.amount("interest_income"), None);
    }
}
