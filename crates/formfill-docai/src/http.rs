//! HTTP client for a hosted document-understanding API
//!
//! Talks to a service exposing `POST /v1/analyze` which accepts a storage
//! key and returns per-page markdown.
//!
//! # Features
//!
//! - Async HTTP communication
//! - Configurable endpoint and model
//! - Retry logic with exponential backoff on transient failures
//! - Timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use formfill_docai::HttpDocAi;
//!
//! let provider = HttpDocAi::new("https://docai.internal", "layout-v2");
//! // submit() is async; use it in an async context or through the
//! // DocumentUnderstanding trait's sync wrapper
//! ```

use crate::DocAiError;
use formfill_domain::traits::{DocumentUnderstanding, RawDocument, RawPage};
use formfill_domain::DocumentRef;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default timeout for analyze requests (60 seconds; multi-page scans are slow)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// HTTP document-understanding provider
pub struct HttpDocAi {
    endpoint: String,
    model: String,
    client: reqwest::Client,
    max_retries: u32,
}

/// Request body for the analyze API
#[derive(Serialize)]
struct AnalyzeRequest {
    storage_key: String,
    content_type: String,
    model: String,
}

/// Response from the analyze API
#[derive(Deserialize)]
struct AnalyzeResponse {
    pages: Vec<AnalyzePage>,
    model: String,
}

#[derive(Deserialize)]
struct AnalyzePage {
    number: usize,
    markdown: String,
}

impl HttpDocAi {
    /// Create a new HTTP provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: service base URL (e.g. "https://docai.internal")
    /// - `model`: layout model to request (e.g. "layout-v2")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Submit a document for analysis
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The service is unreachable or keeps answering 5xx after retries
    /// - The request times out
    /// - The response body cannot be parsed
    pub async fn submit(&self, document: &DocumentRef) -> Result<RawDocument, DocAiError> {
        let url = format!("{}/v1/analyze", self.endpoint);

        let request_body = AnalyzeRequest {
            storage_key: document.storage_key.clone(),
            content_type: document.content_type.clone(),
            model: self.model.clone(),
        };

        // Retry loop with exponential backoff; only transient failures retry
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.client.post(&url).json(&request_body).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        match response.json::<AnalyzeResponse>().await {
                            Ok(analyzed) => {
                                return Ok(RawDocument {
                                    pages: analyzed
                                        .pages
                                        .into_iter()
                                        .map(|p| RawPage {
                                            number: p.number,
                                            markdown: p.markdown,
                                        })
                                        .collect(),
                                    method: analyzed.model,
                                });
                            }
                            Err(e) => {
                                return Err(DocAiError::InvalidResponse(format!(
                                    "Failed to parse response: {}",
                                    e
                                )));
                            }
                        }
                    } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(DocAiError::RateLimited);
                    } else if status.is_server_error() {
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error =
                            Some(DocAiError::Service(format!("HTTP {}: {}", status, error_text)));
                    } else {
                        // 4xx other than 429 will not improve on retry
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        return Err(DocAiError::Service(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error = Some(if e.is_timeout() {
                        DocAiError::Timeout
                    } else {
                        DocAiError::Service(format!("Request failed: {}", e))
                    });
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, ...
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error.unwrap_or(DocAiError::Timeout))
    }
}

impl DocumentUnderstanding for HttpDocAi {
    type Error = DocAiError;

    fn submit(&self, document: &DocumentRef) -> Result<RawDocument, Self::Error> {
        // Blocking wrapper for async submit
        tokio::runtime::Runtime::new()
            .map_err(|e| DocAiError::Service(format!("Runtime error: {}", e)))?
            .block_on(async { self.submit(document).await })
    }

    fn is_transient(error: &Self::Error) -> bool {
        error.is_transient()
    }
}
