//! Formfill Document-Understanding Layer
//!
//! Pluggable clients for the external document-understanding/OCR service.
//!
//! # Architecture
//!
//! This crate provides implementations of the `DocumentUnderstanding` trait
//! from `formfill-domain`. The service is a black box that turns a stored
//! document into per-page markdown; everything downstream of that markdown
//! lives in `formfill-extract`.
//!
//! # Providers
//!
//! - `MockDocAi`: deterministic mock for testing
//! - `HttpDocAi`: HTTP client for a hosted document-understanding API
//!
//! # Examples
//!
//! ```
//! use formfill_docai::MockDocAi;
//! use formfill_domain::DocumentRef;
//! use formfill_domain::traits::DocumentUnderstanding;
//!
//! let provider = MockDocAi::new("Box 1 Wages: $48,500.00");
//! let doc = DocumentRef::new("uploads/w2.pdf", "application/pdf");
//! let raw = provider.submit(&doc).unwrap();
//! assert_eq!(raw.pages.len(), 1);
//! ```

#![warn(missing_docs)]

pub mod http;

use formfill_domain::traits::{DocumentUnderstanding, RawDocument};
use formfill_domain::DocumentRef;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use http::HttpDocAi;

/// Errors that can occur talking to the document-understanding service
#[derive(Error, Debug)]
pub enum DocAiError {
    /// The service did not answer within the configured deadline
    #[error("Document understanding timed out")]
    Timeout,

    /// The service rejected the call for rate limiting
    #[error("Rate limit exceeded")]
    RateLimited,

    /// The service answered with an error
    #[error("Service error: {0}")]
    Service(String),

    /// The service answered with a shape we could not parse
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl DocAiError {
    /// Whether a retry could plausibly succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, DocAiError::Timeout | DocAiError::RateLimited)
            || matches!(self, DocAiError::Service(_))
    }
}

/// Mock document-understanding provider for deterministic testing
///
/// Returns pre-configured markdown without any network calls. Responses are
/// keyed by storage key, with a default for unconfigured keys.
///
/// # Examples
///
/// ```
/// use formfill_docai::MockDocAi;
/// use formfill_domain::DocumentRef;
/// use formfill_domain::traits::DocumentUnderstanding;
///
/// let mut provider = MockDocAi::new("default page");
/// provider.add_response("uploads/a.pdf", "Box 1: $10.00");
///
/// let a = DocumentRef::new("uploads/a.pdf", "application/pdf");
/// assert!(provider.submit(&a).unwrap().pages[0].markdown.contains("Box 1"));
/// ```
#[derive(Debug, Clone)]
pub struct MockDocAi {
    default_markdown: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    failures: Arc<Mutex<HashMap<String, MockFailure>>>,
    call_count: Arc<Mutex<usize>>,
}

#[derive(Debug, Clone, Copy)]
enum MockFailure {
    Timeout,
    RateLimited,
    Service,
    InvalidResponse,
}

impl MockDocAi {
    /// Create a mock returning the given markdown for every document
    pub fn new(markdown: impl Into<String>) -> Self {
        Self {
            default_markdown: markdown.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            failures: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Configure the markdown returned for a specific storage key
    pub fn add_response(&mut self, storage_key: impl Into<String>, markdown: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(storage_key.into(), markdown.into());
    }

    /// Configure a timeout failure for a specific storage key
    pub fn add_timeout(&mut self, storage_key: impl Into<String>) {
        self.failures
            .lock()
            .unwrap()
            .insert(storage_key.into(), MockFailure::Timeout);
    }

    /// Configure a rate-limit failure for a specific storage key
    pub fn add_rate_limit(&mut self, storage_key: impl Into<String>) {
        self.failures
            .lock()
            .unwrap()
            .insert(storage_key.into(), MockFailure::RateLimited);
    }

    /// Configure a hard service failure for a specific storage key
    pub fn add_service_error(&mut self, storage_key: impl Into<String>) {
        self.failures
            .lock()
            .unwrap()
            .insert(storage_key.into(), MockFailure::Service);
    }

    /// Configure a permanent invalid-response failure for a specific
    /// storage key
    pub fn add_invalid_response(&mut self, storage_key: impl Into<String>) {
        self.failures
            .lock()
            .unwrap()
            .insert(storage_key.into(), MockFailure::InvalidResponse);
    }

    /// Number of times submit was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call counter
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }
}

impl Default for MockDocAi {
    fn default() -> Self {
        Self::new("")
    }
}

impl DocumentUnderstanding for MockDocAi {
    type Error = DocAiError;

    fn submit(&self, document: &DocumentRef) -> Result<RawDocument, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        if let Some(failure) = self.failures.lock().unwrap().get(&document.storage_key) {
            return Err(match failure {
                MockFailure::Timeout => DocAiError::Timeout,
                MockFailure::RateLimited => DocAiError::RateLimited,
                MockFailure::Service => DocAiError::Service("mock service error".to_string()),
                MockFailure::InvalidResponse => {
                    DocAiError::InvalidResponse("mock invalid response".to_string())
                }
            });
        }

        let responses = self.responses.lock().unwrap();
        let markdown = responses
            .get(&document.storage_key)
            .cloned()
            .unwrap_or_else(|| self.default_markdown.clone());

        Ok(RawDocument::single_page(markdown, "mock"))
    }

    fn is_transient(error: &Self::Error) -> bool {
        error.is_transient()
    }
}
