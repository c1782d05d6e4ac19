//! Document type classification from storage keys
//!
//! A total, deterministic, side-effect-free function: ordered substring
//! rules over the lower-cased key, first match wins. An unmatched key is
//! `Unknown` - the classifier never guesses a specific form type.

use formfill_domain::{DocumentRef, DocumentType};

/// Ordered classification rules; more specific patterns come first so that
/// "1099-int" is not swallowed by the bare "1099" rule.
const RULES: &[(&str, DocumentType)] = &[
    ("1099-int", DocumentType::Form1099Int),
    ("1099int", DocumentType::Form1099Int),
    ("1099_int", DocumentType::Form1099Int),
    ("1099-div", DocumentType::Form1099Div),
    ("1099div", DocumentType::Form1099Div),
    ("1099_div", DocumentType::Form1099Div),
    ("1099-nec", DocumentType::Form1099Nec),
    ("1099nec", DocumentType::Form1099Nec),
    ("1099_nec", DocumentType::Form1099Nec),
    ("1099-misc", DocumentType::Form1099Misc),
    ("1099misc", DocumentType::Form1099Misc),
    ("1099_misc", DocumentType::Form1099Misc),
    // Bare 1099 with no variant suffix is treated as MISC
    ("1099", DocumentType::Form1099Misc),
    ("w-2", DocumentType::W2),
    ("w2", DocumentType::W2),
];

/// Classify a document by its storage key
pub fn classify(document: &DocumentRef) -> DocumentType {
    classify_key(&document.storage_key)
}

/// Classify a raw storage key / file name
///
/// # Examples
///
/// ```
/// use formfill_extract::classify_key;
/// use formfill_domain::DocumentType;
///
/// assert_eq!(classify_key("test_1099-int_document.pdf"), DocumentType::Form1099Int);
/// assert_eq!(classify_key("scan_0042.pdf"), DocumentType::Unknown);
/// ```
pub fn classify_key(key: &str) -> DocumentType {
    let lowered = key.to_lowercase();
    for (pattern, doc_type) in RULES {
        if lowered.contains(pattern) {
            return *doc_type;
        }
    }
    DocumentType::Unknown
}
