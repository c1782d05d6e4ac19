//! Formfill Validation Layer
//!
//! Domain rule checks over extraction results, run before any form filling.
//!
//! # Rules
//!
//! Each document type has its own rule set:
//!
//! - required-field presence (W-2 Box 1 wages must exist and be
//!   non-negative) - blocking errors
//! - cross-field sanity (withholding far above wages) - advisory warnings
//! - format checks (SSN/TIN digit counts) - warnings
//!
//! Errors block downstream use; warnings travel with the outcome without
//! blocking. Validation itself never fails: the output is always a
//! `ValidationOutcome` value.

#![warn(missing_docs)]

mod config;
mod validator;

pub use config::ValidationConfig;
pub use validator::Validator;
