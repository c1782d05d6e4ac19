//! Formfill Domain Layer
//!
//! This crate contains the core data model for the tax document ingestion
//! and form-filling engine. It carries almost no dependencies (uuid for
//! identifiers, serde for the wire/persisted types) and defines the value
//! objects and trait interfaces that all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **DocumentRef**: an opaque locator for a source document in blob storage
//! - **DocumentType**: the resolved tax-form tag (W-2, 1099-INT, ...)
//! - **ExtractionResult**: canonical semantic fields pulled out of a document
//! - **FormDefinition**: a target form's internal field identifiers
//! - **FilledFormVersion**: one immutable, versioned filled artifact
//!
//! ## Architecture
//!
//! - Pure data and trait definitions only
//! - Infrastructure implementations (HTTP clients, stores) live in other crates
//! - Soft failures are values on these types, not errors

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod extraction;
pub mod form;
pub mod traits;
pub mod validation;
pub mod value;
pub mod version;

// Re-exports for convenience
pub use document::{DocumentId, DocumentRef, DocumentType};
pub use extraction::ExtractionResult;
pub use form::{FieldMappingResult, FieldSlot, FormCategory, FormDefinition, SplitPolicy};
pub use validation::ValidationOutcome;
pub use value::FieldValue;
pub use version::FilledFormVersion;
