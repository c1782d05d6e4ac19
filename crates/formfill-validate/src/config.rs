//! Configuration for the Validator

use serde::{Deserialize, Serialize};

/// Thresholds and switches for validation rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Warn when withholding exceeds this multiple of the income amount
    pub withholding_income_ratio: f64,

    /// Reject amounts above this ceiling as OCR garbage
    pub max_reasonable_amount: f64,

    /// Whether a missing SSN on a W-2 is a warning
    pub warn_on_missing_ssn: bool,

    /// Whether a missing employer/payer name is a warning
    pub warn_on_missing_issuer: bool,
}

impl ValidationConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.withholding_income_ratio <= 0.0 {
            return Err("withholding_income_ratio must be positive".to_string());
        }
        if self.max_reasonable_amount <= 0.0 {
            return Err("max_reasonable_amount must be positive".to_string());
        }
        Ok(())
    }

    /// Strict preset: tighter ratio, all advisory checks on
    pub fn strict() -> Self {
        Self {
            withholding_income_ratio: 0.4,
            max_reasonable_amount: 1_000_000.0,
            warn_on_missing_ssn: true,
            warn_on_missing_issuer: true,
        }
    }

    /// Permissive preset: advisory checks off, generous ceilings
    pub fn permissive() -> Self {
        Self {
            withholding_income_ratio: 1.0,
            max_reasonable_amount: 100_000_000.0,
            warn_on_missing_ssn: false,
            warn_on_missing_issuer: false,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            withholding_income_ratio: 0.5,
            max_reasonable_amount: 10_000_000.0,
            warn_on_missing_ssn: true,
            warn_on_missing_issuer: true,
        }
    }
}
