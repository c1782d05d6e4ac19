//! Configuration for the Engine

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for ingest/fill orchestration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Deadline for one document-understanding call (seconds)
    pub submit_timeout_secs: u64,

    /// Attempts against the document-understanding service
    pub submit_retries: u32,

    /// Base delay for exponential backoff between attempts (milliseconds)
    pub backoff_base_ms: u64,
}

impl EngineConfig {
    /// Get the submit timeout as a Duration
    pub fn submit_timeout(&self) -> Duration {
        Duration::from_secs(self.submit_timeout_secs)
    }

    /// Backoff delay before the given retry attempt (1-based)
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.backoff_base_ms.saturating_mul(1 << attempt.min(8)))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.submit_timeout_secs == 0 {
            return Err("submit_timeout_secs must be greater than 0".to_string());
        }
        if self.submit_retries == 0 {
            return Err("submit_retries must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Aggressive preset: short deadline, single retry
    pub fn aggressive() -> Self {
        Self {
            submit_timeout_secs: 30,
            submit_retries: 2,
            backoff_base_ms: 250,
        }
    }

    /// Lenient preset: long deadline for large multi-page scans
    pub fn lenient() -> Self {
        Self {
            submit_timeout_secs: 300,
            submit_retries: 5,
            backoff_base_ms: 1000,
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

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            submit_timeout_secs: 90,
            submit_retries: 3,
            backoff_base_ms: 500,
        }
    }
}
