//! Catalog-driven field extraction from per-page markdown
//!
//! Every document type declares an explicit allow-list catalog of the
//! canonical fields it can ever populate. The scanner walks the markdown
//! line by line, anchors on IRS box numbers where it can and on label text
//! otherwise, and records a per-field confidence reflecting which anchor
//! matched. Content that matches no catalog entry is ignored, not guessed.

use crate::money::find_money;
use crate::registry::FieldExtractor;
use formfill_domain::traits::RawDocument;
use formfill_domain::{DocumentType, ExtractionResult, FieldValue};
use tracing::debug;

/// Confidence assigned when a box-number anchor matched
const BOX_CONFIDENCE: f64 = 0.9;

/// Confidence assigned when only label text matched
const LABEL_CONFIDENCE: f64 = 0.75;

/// How a field's raw text is normalized into a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Currency amount; normalized via [`crate::parse_money`]
    Money,

    /// Free text (names, addresses)
    Text,

    /// Digit identifier (SSN/EIN/TIN); passed through as found, but only
    /// accepted when it carries exactly the expected digit count
    Id {
        /// Required number of digits (9 for SSN/EIN/TIN)
        digits: usize,
    },
}

/// One allow-list entry in a document type's extraction catalog
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Canonical semantic name this spec populates
    pub canonical: &'static str,

    /// Value normalization to apply
    pub kind: FieldKind,

    /// IRS box label, when the field has one ("1", "1a", ...)
    pub box_label: Option<&'static str>,

    /// Lower-case label substrings that anchor this field
    pub labels: &'static [&'static str],
}

/// A generic extractor driven by a per-type field catalog
pub struct CatalogExtractor {
    document_type: DocumentType,
    method: &'static str,
    catalog: Vec<FieldSpec>,
}

impl CatalogExtractor {
    /// Build an extractor for the given type and catalog
    pub fn new(
        document_type: DocumentType,
        method: &'static str,
        catalog: Vec<FieldSpec>,
    ) -> Self {
        Self {
            document_type,
            method,
            catalog,
        }
    }

    /// The canonical field names this extractor can ever populate
    pub fn canonical_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.catalog.iter().map(|s| s.canonical)
    }

    fn scan_line(&self, line: &str, result: &mut ExtractionResult) {
        let lowered = line.to_lowercase();

        // Collect all anchors on this line, then take the strongest:
        // box-number matches beat label matches, longer labels beat shorter
        // ones, catalog order breaks remaining ties. One field per line.
        let mut best: Option<(usize, usize, f64, usize)> = None; // (spec idx, value pos, confidence, label len)
        for (idx, spec) in self.catalog.iter().enumerate() {
            if result.fields.contains_key(spec.canonical) {
                continue;
            }

            if let Some(bx) = spec.box_label {
                if let Some(pos) = find_box_anchor(&lowered, bx) {
                    let candidate = (idx, pos, BOX_CONFIDENCE, usize::MAX);
                    if better(&best, &candidate) {
                        best = Some(candidate);
                    }
                    continue;
                }
            }

            for label in spec.labels {
                if let Some(pos) = lowered.find(label) {
                    let candidate = (idx, pos + label.len(), LABEL_CONFIDENCE, label.len());
                    if better(&best, &candidate) {
                        best = Some(candidate);
                    }
                }
            }
        }

        let Some((idx, pos, confidence, _)) = best else {
            return;
        };
        let spec = &self.catalog[idx];
        // Offsets come from the lowercased copy; lowercasing can shift byte
        // positions for non-ASCII input
        let fragment = line.get(pos..).unwrap_or("");

        match parse_value(spec.kind, fragment) {
            Some(value) => {
                debug!(field = spec.canonical, confidence, "extracted field");
                result.put_field(spec.canonical, value, confidence);
            }
            None => {
                result.errors.push(format!(
                    "matched '{}' but could not parse a value from: {}",
                    spec.canonical,
                    fragment.trim()
                ));
            }
        }
    }
}

/// Is `candidate` a stronger anchor than the current best?
fn better(
    best: &Option<(usize, usize, f64, usize)>,
    candidate: &(usize, usize, f64, usize),
) -> bool {
    match best {
        None => true,
        Some(current) => {
            // Higher confidence wins; then longer label; then earlier catalog entry
            (candidate.2, candidate.3, std::cmp::Reverse(candidate.0))
                > (current.2, current.3, std::cmp::Reverse(current.0))
        }
    }
}

/// Find "box <label>" with a boundary after it, so "box 1" never anchors
/// inside "box 10". Returns the byte offset just past the box label.
fn find_box_anchor(lowered: &str, box_label: &str) -> Option<usize> {
    let needle = format!("box {}", box_label);
    for (start, _) in lowered.match_indices(&needle) {
        let end = start + needle.len();
        let boundary_ok = lowered[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_ascii_alphanumeric());
        if boundary_ok {
            return Some(end);
        }
    }
    None
}

/// Normalize the text after an anchor into a field value
fn parse_value(kind: FieldKind, fragment: &str) -> Option<FieldValue> {
    // Dotted leaders, colons and dashes commonly separate label from value
    let cleaned = fragment.trim_start_matches([':', '.', '-', '—', ' ', '\t']);

    match kind {
        FieldKind::Money => find_money(cleaned).map(FieldValue::Amount),
        FieldKind::Text => {
            let text = cleaned.trim();
            if text.is_empty() {
                None
            } else {
                Some(FieldValue::Text(text.to_string()))
            }
        }
        FieldKind::Id { digits } => cleaned
            .split_whitespace()
            .find(|token| {
                token.chars().all(|c| c.is_ascii_digit() || c == '-')
                    && token.chars().filter(char::is_ascii_digit).count() == digits
            })
            .map(|token| FieldValue::Text(token.to_string())),
    }
}

impl FieldExtractor for CatalogExtractor {
    fn document_type(&self) -> DocumentType {
        self.document_type
    }

    fn extract(&self, raw: &RawDocument) -> ExtractionResult {
        let mut result = ExtractionResult::empty(self.document_type, self.method);

        for page in &raw.pages {
            for line in page.markdown.lines() {
                self.scan_line(line, &mut result);
            }
        }

        result
    }
}
