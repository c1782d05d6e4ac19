//! Form definition module - target form templates and mapping results

use crate::value::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Jurisdiction category of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormCategory {
    /// IRS federal forms and schedules
    Federal,

    /// State forms (CA 540, ...)
    State,

    /// City/municipal forms (NYC 1127, ...)
    City,
}

impl fmt::Display for FormCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FormCategory::Federal => "federal",
            FormCategory::State => "state",
            FormCategory::City => "city",
        };
        write!(f, "{}", s)
    }
}

/// How a single canonical value fans out across multiple target fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SplitPolicy {
    /// Assign the same value to every target field
    #[default]
    Duplicate,

    /// Split text on whitespace, one part per target field in order
    /// (e.g. a full name across first/middle/last boxes); trailing targets
    /// with no corresponding part stay empty, surplus parts join into the
    /// last target
    WhitespaceParts,
}

/// One entry in a form's field table
///
/// Declaration order matters: the exact-match phase assigns targets in the
/// order they are listed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSlot {
    /// Canonical semantic name (`wages`, `taxpayer_name`, ...)
    pub canonical: String,

    /// Internal field identifiers on the form template (`f1_13`, ...)
    pub targets: Vec<String>,

    /// Fan-out policy when `targets.len() > 1`
    #[serde(default)]
    pub split: SplitPolicy,
}

impl FieldSlot {
    /// Create a slot with a single target and the default split policy
    pub fn single(canonical: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            canonical: canonical.into(),
            targets: vec![target.into()],
            split: SplitPolicy::Duplicate,
        }
    }
}

/// Static definition of one fillable form
///
/// Loaded once at startup and treated as read-only. Adding a new supported
/// form or jurisdiction means adding one of these to the catalog, not code
/// changes in the mapping engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDefinition {
    /// Form type identifier (`1040`, `schedule_c`, `ca_540`, ...)
    pub form_type: String,

    /// Jurisdiction category
    pub category: FormCategory,

    /// Locator for the blank template artifact
    pub template_ref: String,

    /// Ordered field table: canonical name -> target field ids
    pub field_table: Vec<FieldSlot>,
}

impl FormDefinition {
    /// Look up the slot for a canonical name
    pub fn slot(&self, canonical: &str) -> Option<&FieldSlot> {
        self.field_table.iter().find(|s| s.canonical == canonical)
    }

    /// Whether the form declares a slot for this canonical name
    pub fn has_canonical(&self, canonical: &str) -> bool {
        self.slot(canonical).is_some()
    }

    /// All target field ids declared by the form, in declaration order
    pub fn target_ids(&self) -> impl Iterator<Item = &str> {
        self.field_table
            .iter()
            .flat_map(|s| s.targets.iter().map(String::as_str))
    }
}

/// Result of mapping an input field map onto one form
///
/// A deterministic pure function of `(FormDefinition, input fields)`.
/// Unresolved input keys are reported in `unmapped_fields`, never silently
/// dropped; untouched form fields are reported in `unused_targets`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMappingResult {
    /// Target field id -> assigned value
    pub assignments: BTreeMap<String, FieldValue>,

    /// Input keys that could not be placed on this form
    pub unmapped_fields: Vec<String>,

    /// Declared target ids left empty by both phases
    pub unused_targets: Vec<String>,
}

impl FieldMappingResult {
    /// Whether every input key found a home
    pub fn is_complete(&self) -> bool {
        self.unmapped_fields.is_empty()
    }
}
