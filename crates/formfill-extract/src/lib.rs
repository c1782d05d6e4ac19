//! Formfill Extraction Layer
//!
//! Turns the document-understanding service's per-page markdown into
//! normalized canonical fields.
//!
//! # Architecture
//!
//! ```text
//! DocumentRef → classify → ExtractorRegistry → ExtractionResult
//! ```
//!
//! # Key Features
//!
//! - **Classification**: ordered substring rules over the storage key;
//!   total and deterministic, `Unknown` when nothing matches
//! - **Strategy registry**: one `FieldExtractor` per `DocumentType`;
//!   adding a document type means registering an extractor, not editing a
//!   dispatch chain
//! - **Allow-list catalogs**: each extractor only ever populates its
//!   declared canonical fields; unrecognized content is ignored, not guessed
//! - **Soft failure**: extraction never returns an error for malformed
//!   input; whatever could not be parsed is described in
//!   `ExtractionResult.errors`
//!
//! # Example
//!
//! ```
//! use formfill_extract::{classify_key, ExtractorRegistry};
//! use formfill_domain::DocumentType;
//! use formfill_domain::traits::RawDocument;
//!
//! let doc_type = classify_key("uploads/acme_w2_2024.pdf");
//! assert_eq!(doc_type, DocumentType::W2);
//!
//! let registry = ExtractorRegistry::with_builtin();
//! let raw = RawDocument::single_page("Box 1 Wages: $48,500.00", "mock");
//! let result = registry.extract(doc_type, &raw);
//! assert_eq!(result.amount("wages"), Some(48500.0));
//! ```

#![warn(missing_docs)]

mod classifier;
mod extractor;
mod form1099;
mod money;
mod registry;
mod w2;

pub use classifier::{classify, classify_key};
pub use extractor::{CatalogExtractor, FieldKind, FieldSpec};
pub use form1099::{
    form1099_div_extractor, form1099_int_extractor, form1099_misc_extractor,
    form1099_nec_extractor,
};
pub use money::parse_money;
pub use registry::{ExtractorRegistry, FieldExtractor};
pub use w2::w2_extractor;
