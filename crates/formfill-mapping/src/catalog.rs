//! The in-process form catalog
//!
//! A registry of `FormDefinition`s loaded at startup. Supporting a new
//! form or jurisdiction means adding one catalog entry (programmatically or
//! in TOML), not touching the mapping engine.

use formfill_domain::{FieldSlot, FormCategory, FormDefinition, SplitPolicy};
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised by catalog loading/lookup
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A requested form type is not in the catalog
    #[error("Unknown form type: {0}")]
    UnknownForm(String),

    /// A catalog file could not be parsed
    #[error("Catalog parse error: {0}")]
    Parse(String),
}

/// Registry of fillable form definitions, keyed by form type
pub struct FormCatalog {
    forms: HashMap<String, FormDefinition>,
}

/// TOML file shape: a list of `[[forms]]` tables
#[derive(Deserialize)]
struct CatalogFile {
    forms: Vec<FormDefinition>,
}

impl FormCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            forms: HashMap::new(),
        }
    }

    /// The built-in catalog: federal 1040 and Schedule C, California 540,
    /// NYC 1127
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.register(form_1040());
        catalog.register(schedule_c());
        catalog.register(ca_540());
        catalog.register(nyc_1127());
        catalog
    }

    /// Load a catalog from a TOML document
    pub fn from_toml(toml_str: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            toml::from_str(toml_str).map_err(|e| CatalogError::Parse(e.to_string()))?;
        let mut catalog = Self::new();
        for form in file.forms {
            catalog.register(form);
        }
        Ok(catalog)
    }

    /// Register a form definition, replacing any same-typed entry
    pub fn register(&mut self, form: FormDefinition) {
        self.forms.insert(form.form_type.clone(), form);
    }

    /// Look up a form by type
    pub fn get(&self, form_type: &str) -> Option<&FormDefinition> {
        self.forms.get(form_type)
    }

    /// Look up a form by type, erroring when absent
    pub fn require(&self, form_type: &str) -> Result<&FormDefinition, CatalogError> {
        self.get(form_type)
            .ok_or_else(|| CatalogError::UnknownForm(form_type.to_string()))
    }

    /// Number of registered forms
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

impl Default for FormCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn form_1040() -> FormDefinition {
    FormDefinition {
        form_type: "1040".to_string(),
        category: FormCategory::Federal,
        template_ref: "templates/f1040.pdf".to_string(),
        field_table: vec![
            FieldSlot {
                canonical: "taxpayer_name".to_string(),
                targets: vec!["f1_first_name".to_string(), "f1_last_name".to_string()],
                split: SplitPolicy::WhitespaceParts,
            },
            FieldSlot::single("spouse_name", "f1_spouse_name"),
            FieldSlot::single("ssn", "f1_ssn"),
            FieldSlot::single("address", "f1_home_address"),
            FieldSlot::single("wages", "f1_line_1a"),
            FieldSlot::single("interest_income", "f1_line_2b"),
            FieldSlot::single("ordinary_dividends", "f1_line_3b"),
            FieldSlot::single("federal_withholding", "f1_line_25a"),
            FieldSlot::single("phone", "f1_phone"),
            FieldSlot::single("email", "f1_email"),
        ],
    }
}

fn schedule_c() -> FormDefinition {
    FormDefinition {
        form_type: "schedule_c".to_string(),
        category: FormCategory::Federal,
        template_ref: "templates/f1040sc.pdf".to_string(),
        field_table: vec![
            FieldSlot::single("taxpayer_name", "c_proprietor_name"),
            FieldSlot::single("ssn", "c_ssn"),
            FieldSlot::single("employer_name", "c_business_name"),
            FieldSlot::single("address", "c_business_address"),
            FieldSlot::single("gross_receipts", "c_line_1"),
            FieldSlot::single("other_income", "c_line_6"),
        ],
    }
}

fn ca_540() -> FormDefinition {
    FormDefinition {
        form_type: "ca_540".to_string(),
        category: FormCategory::State,
        template_ref: "templates/ca540.pdf".to_string(),
        field_table: vec![
            FieldSlot {
                canonical: "taxpayer_name".to_string(),
                targets: vec!["ca_first_name".to_string(), "ca_last_name".to_string()],
                split: SplitPolicy::WhitespaceParts,
            },
            FieldSlot::single("ssn", "ca_ssn"),
            FieldSlot::single("address", "ca_address"),
            FieldSlot::single("wages", "ca_line_12"),
            FieldSlot::single("state_withholding", "ca_line_71"),
        ],
    }
}

fn nyc_1127() -> FormDefinition {
    FormDefinition {
        form_type: "nyc_1127".to_string(),
        category: FormCategory::City,
        template_ref: "templates/nyc1127.pdf".to_string(),
        field_table: vec![
            FieldSlot::single("taxpayer_name", "nyc_name"),
            FieldSlot::single("ssn", "nyc_ssn"),
            FieldSlot::single("address", "nyc_address"),
            FieldSlot::single("wages", "nyc_line_1"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = FormCatalog::builtin();
        assert_eq!(catalog.len(), 4);
        assert!(catalog.get("1040").is_some());
        assert!(catalog.get("schedule_c").is_some());
        assert!(catalog.get("ca_540").is_some());
        assert!(catalog.get("nyc_1127").is_some());
    }

    #[test]
    fn test_categories() {
        let catalog = FormCatalog::builtin();
        assert_eq!(catalog.get("1040").unwrap().category, FormCategory::Federal);
        assert_eq!(catalog.get("ca_540").unwrap().category, FormCategory::State);
        assert_eq!(catalog.get("nyc_1127").unwrap().category, FormCategory::City);
    }

    #[test]
    fn test_require_unknown_form() {
        let catalog = FormCatalog::builtin();
        let err = catalog.require("form_9999").unwrap_err();
        assert!(matches!(err, CatalogError::UnknownForm(_)));
    }

    #[test]
    fn test_register_replaces() {
        let mut catalog = FormCatalog::new();
        catalog.register(form_1040());
        let mut variant = form_1040();
        variant.template_ref = "templates/f1040_2025.pdf".to_string();
        catalog.register(variant);

        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.get("1040").unwrap().template_ref,
            "templates/f1040_2025.pdf"
        );
    }

    #[test]
    fn test_from_toml() {
        let toml_str = r#"
            [[forms]]
            form_type = "mi_1040"
            category = "state"
            template_ref = "templates/mi1040.pdf"

            [[forms.field_table]]
            canonical = "taxpayer_name"
            targets = ["mi_name"]

            [[forms.field_table]]
            canonical = "wages"
            targets = ["mi_line_10"]
        "#;

        let catalog = FormCatalog::from_toml(toml_str).unwrap();
        let form = catalog.require("mi_1040").unwrap();
        assert_eq!(form.category, FormCategory::State);
        assert_eq!(form.field_table.len(), 2);
        assert_eq!(form.slot("wages").unwrap().targets, vec!["mi_line_10"]);
        // Split policy defaults when omitted
        assert_eq!(form.slot("wages").unwrap().split, SplitPolicy::Duplicate);
    }

    #[test]
    fn test_from_toml_malformed() {
        assert!(matches!(
            FormCatalog::from_toml("not toml at all ["),
            Err(CatalogError::Parse(_))
        ));
    }
}
