//! Validation outcome module

use serde::{Deserialize, Serialize};

/// Outcome of validating an extraction result
///
/// Errors block downstream filling; warnings are advisory and travel with
/// the result without blocking anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Whether the document passed all blocking rules
    pub is_valid: bool,

    /// Blocking rule failures
    pub errors: Vec<String>,

    /// Advisory findings
    pub warnings: Vec<String>,
}

impl ValidationOutcome {
    /// A passing outcome with no findings
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Record a blocking error (marks the outcome invalid)
    pub fn push_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
        self.is_valid = false;
    }

    /// Record an advisory warning
    pub fn push_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }
}

impl Default for ValidationOutcome {
    fn default() -> Self {
        Self::valid()
    }
}
