//! Formfill Engine
//!
//! Caller-facing orchestration of the ingestion and form-filling pipeline.
//!
//! # Architecture
//!
//! ```text
//! DocumentRef → classify → doc-understanding → extract → validate   (ingest)
//! field map → catalog lookup → mapping → artifact → versioned store (fill)
//! ```
//!
//! # Key Properties
//!
//! - The document-understanding call is the only blocking I/O before
//!   mapping; it runs under a timeout with bounded backoff retries
//! - A failed service call yields an explicit `success: false` extraction
//!   describing the failure - the engine never fabricates plausible data
//! - Blocking validation errors stop the pipeline at ingest; the caller
//!   decides what to do with the partial result
//! - Each ingest/fill call is independent and replayable; the conditional
//!   write inside the store is the single point of coordination
//!
//! # Example
//!
//! ```no_run
//! use formfill_docai::MockDocAi;
//! use formfill_domain::DocumentRef;
//! use formfill_engine::{Engine, EngineConfig, IngestRequest};
//! use formfill_store::{MemoryMetadataStore, MemoryObjectStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let docai = MockDocAi::new("Box 1 Wages: $48,500.00");
//! let engine = Engine::new(
//!     docai,
//!     MemoryObjectStore::new(),
//!     MemoryMetadataStore::new(),
//!     EngineConfig::default(),
//! );
//!
//! let outcome = engine
//!     .ingest(IngestRequest {
//!         document: DocumentRef::new("uploads/jane_w2.pdf", "application/pdf"),
//!         subject_id: "subj-1".to_string(),
//!         tax_year: 2024,
//!         document_type: None,
//!     })
//!     .await?;
//!
//! println!("extracted {} fields", outcome.extraction.fields.len());
//! println!("valid: {}", outcome.validation.is_valid);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod engine;
mod error;
mod types;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::EngineError;
pub use types::{FillOutcome, FillRequest, IngestOutcome, IngestRequest};
