//! Formfill Mapping Layer
//!
//! Maps canonical/semantic field maps onto the internal field identifiers
//! of a target form.
//!
//! # Architecture
//!
//! ```text
//! input fields ─┬─ exact phase ──────────┐
//!               └─ alias inference phase ─┴→ FieldMappingResult
//! ```
//!
//! Two phases, both deterministic and side-effect free:
//!
//! 1. **Exact**: input keys that match a canonical name in the form's
//!    field table are assigned to its target ids in declaration order.
//! 2. **Inference**: remaining keys are normalized (lower-case, separators
//!    stripped) and compared against a fixed ordered list of concept alias
//!    groups. An alias matches the whole key, or as consecutive words of
//!    the key when the alias itself is multi-word; the longest match wins,
//!    ties break by group declaration order. A key only maps if the target
//!    concept exists on this form and was not already filled by phase 1.
//!
//! Matching is pure string comparison - no scoring heuristics, no
//! randomness. Absence of a mapping is data (`unmapped_fields`), not
//! failure; this layer raises no errors.

#![warn(missing_docs)]

mod alias;
mod catalog;
mod engine;

pub use alias::{AliasGroup, AliasTable};
pub use catalog::{CatalogError, FormCatalog};
pub use engine::MappingEngine;
