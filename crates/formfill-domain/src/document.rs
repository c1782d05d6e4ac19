//! Document module - references and type tags for source documents

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a filled document, based on UUIDv7
///
/// UUIDv7 provides:
/// - Chronological sortability for version listings
/// - 128-bit uniqueness
/// - No coordination required between concurrent ingest workers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocumentId(u128);

impl DocumentId {
    /// Generate a new UUIDv7-based DocumentId
    ///
    /// # Examples
    ///
    /// ```
    /// use formfill_domain::DocumentId;
    ///
    /// let id = DocumentId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a DocumentId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a DocumentId from a UUID string
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid UUIDv7 string: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Opaque locator for a source document in blob storage
///
/// Created once at ingest call time and never mutated. The storage key is
/// also the input to document type classification, so it normally carries
/// the uploaded file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    /// Blob storage key (typically ends with the original file name)
    pub storage_key: String,

    /// MIME content type (e.g. "application/pdf")
    pub content_type: String,
}

impl DocumentRef {
    /// Create a new document reference
    pub fn new(storage_key: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            storage_key: storage_key.into(),
            content_type: content_type.into(),
        }
    }
}

/// Resolved tax document type
///
/// Once classification has run, the document type is this enum and not a
/// free string. An unrecognized document is `Unknown` - downstream stages
/// treat that explicitly rather than guessing a specific form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// Wage and Tax Statement
    W2,

    /// Interest Income
    Form1099Int,

    /// Miscellaneous Information
    Form1099Misc,

    /// Dividends and Distributions
    Form1099Div,

    /// Nonemployee Compensation
    Form1099Nec,

    /// No classification rule matched
    Unknown,
}

impl DocumentType {
    /// Get the canonical tag for this document type
    pub fn as_tag(&self) -> &'static str {
        match self {
            DocumentType::W2 => "w2",
            DocumentType::Form1099Int => "1099-int",
            DocumentType::Form1099Misc => "1099-misc",
            DocumentType::Form1099Div => "1099-div",
            DocumentType::Form1099Nec => "1099-nec",
            DocumentType::Unknown => "unknown",
        }
    }

    /// Parse a document type from its canonical tag
    pub fn parse_tag(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "w2" | "w-2" => Some(DocumentType::W2),
            "1099-int" => Some(DocumentType::Form1099Int),
            "1099-misc" => Some(DocumentType::Form1099Misc),
            "1099-div" => Some(DocumentType::Form1099Div),
            "1099-nec" => Some(DocumentType::Form1099Nec),
            "unknown" => Some(DocumentType::Unknown),
            _ => None,
        }
    }

    /// Whether the type is a concrete, recognized form
    pub fn is_known(&self) -> bool {
        !matches!(self, DocumentType::Unknown)
    }
}

impl std::str::FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_tag(s).ok_or_else(|| format!("Invalid document type: {}", s))
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}
