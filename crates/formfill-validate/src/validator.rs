//! Per-document-type validation rules

use crate::ValidationConfig;
use formfill_domain::{DocumentType, ExtractionResult, ValidationOutcome};
use tracing::debug;

/// The Validator checks extraction results before form filling
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a Validator with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create a Validator with default configuration
    pub fn default_config() -> Self {
        Self::new(ValidationConfig::default())
    }

    /// Validate an extraction result against its document type's rule set
    ///
    /// Always returns an outcome; a failed service call or an unknown type
    /// produces blocking errors, not a panic or an `Err`.
    pub fn validate(&self, extraction: &ExtractionResult) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::valid();

        if !extraction.success {
            outcome.push_error("extraction did not complete; fields are not trustworthy");
            return outcome;
        }

        match extraction.document_type {
            DocumentType::W2 => self.validate_w2(extraction, &mut outcome),
            DocumentType::Form1099Int => self.validate_1099_int(extraction, &mut outcome),
            DocumentType::Form1099Misc => self.validate_1099_income(
                extraction,
                &["rents", "royalties", "other_income", "gross_proceeds_attorney"],
                &mut outcome,
            ),
            DocumentType::Form1099Div => self.validate_1099_income(
                extraction,
                &["ordinary_dividends", "capital_gain_distributions"],
                &mut outcome,
            ),
            DocumentType::Form1099Nec => self.validate_1099_income(
                extraction,
                &["nonemployee_compensation"],
                &mut outcome,
            ),
            DocumentType::Unknown => {
                outcome.push_error("cannot validate unrecognized document type");
            }
        }

        debug!(
            document_type = %extraction.document_type,
            is_valid = outcome.is_valid,
            errors = outcome.errors.len(),
            warnings = outcome.warnings.len(),
            "validation complete"
        );
        outcome
    }

    fn validate_w2(&self, extraction: &ExtractionResult, outcome: &mut ValidationOutcome) {
        // Box 1 wages: required, non-negative
        match extraction.amount("wages") {
            None => outcome.push_error("W-2 Box 1 wages is missing"),
            Some(wages) if wages < 0.0 => {
                outcome.push_error(format!("W-2 Box 1 wages is negative: {:.2}", wages));
            }
            Some(wages) => {
                self.check_ceiling("wages", wages, outcome);

                // Withholding above the configured share of wages is
                // suspicious but legitimate in edge cases, hence a warning
                if let Some(withholding) = extraction.amount("federal_withholding") {
                    if withholding < 0.0 {
                        outcome.push_error(format!(
                            "W-2 Box 2 federal withholding is negative: {:.2}",
                            withholding
                        ));
                    } else if wages > 0.0
                        && withholding > wages * self.config.withholding_income_ratio
                    {
                        outcome.push_warning(format!(
                            "federal withholding {:.2} exceeds {:.0}% of wages {:.2}",
                            withholding,
                            self.config.withholding_income_ratio * 100.0,
                            wages
                        ));
                    }
                }
            }
        }

        if self.config.warn_on_missing_ssn {
            match extraction.text("ssn") {
                None => outcome.push_warning("W-2 employee SSN is missing"),
                Some(ssn) if ssn.chars().filter(char::is_ascii_digit).count() != 9 => {
                    outcome.push_warning(format!("W-2 SSN '{}' does not have 9 digits", ssn));
                }
                Some(_) => {}
            }
        }

        if self.config.warn_on_missing_issuer && extraction.text("employer_name").is_none() {
            outcome.push_warning("W-2 employer name is missing");
        }
    }

    fn validate_1099_int(&self, extraction: &ExtractionResult, outcome: &mut ValidationOutcome) {
        match extraction.amount("interest_income") {
            None => outcome.push_error("1099-INT Box 1 interest income is missing"),
            Some(interest) if interest < 0.0 => {
                outcome.push_error(format!(
                    "1099-INT Box 1 interest income is negative: {:.2}",
                    interest
                ));
            }
            Some(interest) => {
                self.check_ceiling("interest_income", interest, outcome);

                if let Some(withholding) = extraction.amount("federal_withholding") {
                    if withholding > interest * self.config.withholding_income_ratio {
                        outcome.push_warning(format!(
                            "federal withholding {:.2} is high relative to interest {:.2}",
                            withholding, interest
                        ));
                    }
                }
            }
        }

        self.check_tin(extraction, "payer_tin", outcome);
        if self.config.warn_on_missing_issuer && extraction.text("payer_name").is_none() {
            outcome.push_warning("1099-INT payer name is missing");
        }
    }

    /// Shared rule for the 1099 variants: at least one income box must be
    /// present, and every amount must be non-negative and under the ceiling
    fn validate_1099_income(
        &self,
        extraction: &ExtractionResult,
        income_fields: &[&str],
        outcome: &mut ValidationOutcome,
    ) {
        let present: Vec<&str> = income_fields
            .iter()
            .copied()
            .filter(|f| extraction.amount(f).is_some())
            .collect();

        if present.is_empty() {
            outcome.push_error(format!(
                "{} has no income box populated (expected one of: {})",
                extraction.document_type,
                income_fields.join(", ")
            ));
            return;
        }

        for field in present {
            let amount = extraction.amount(field).unwrap_or_default();
            if amount < 0.0 {
                outcome.push_error(format!("{} is negative: {:.2}", field, amount));
            } else {
                self.check_ceiling(field, amount, outcome);
            }
        }

        self.check_tin(extraction, "payer_tin", outcome);
    }

    fn check_ceiling(&self, field: &str, amount: f64, outcome: &mut ValidationOutcome) {
        if amount > self.config.max_reasonable_amount {
            outcome.push_error(format!(
                "{} amount {:.2} exceeds the plausible ceiling {:.2}",
                field, amount, self.config.max_reasonable_amount
            ));
        }
    }

    fn check_tin(&self, extraction: &ExtractionResult, field: &str, outcome: &mut ValidationOutcome) {
        if let Some(tin) = extraction.text(field) {
            if tin.chars().filter(char::is_ascii_digit).count() != 9 {
                outcome.push_warning(format!("{} '{}' does not have 9 digits", field, tin));
            }
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formfill_domain::FieldValue;

    fn w2_extraction(wages: Option<f64>, withholding: Option<f64>) -> ExtractionResult {
        let mut e = ExtractionResult::empty(DocumentType::W2, "test");
        if let Some(w) = wages {
            e.put_field("wages", FieldValue::Amount(w), 0.9);
        }
        if let Some(w) = withholding {
            e.put_field("federal_withholding", FieldValue::Amount(w), 0.9);
        }
        e.put_field("ssn", FieldValue::Text("123-45-6789".into()), 0.9);
        e.put_field("employer_name", FieldValue::Text("Acme Corp".into()), 0.75);
        e
    }

    #[test]
    fn test_clean_w2_passes() {
        let validator = Validator::default_config();
        let outcome = validator.validate(&w2_extraction(Some(48500.0), Some(6835.0)));

        assert!(outcome.is_valid);
        assert!(outcome.errors.is_empty());
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_missing_wages_blocks() {
        let validator = Validator::default_config();
        let outcome = validator.validate(&w2_extraction(None, Some(100.0)));

        assert!(!outcome.is_valid);
        assert!(outcome.errors[0].contains("Box 1"));
    }

    #[test]
    fn test_negative_wages_blocks() {
        let validator = Validator::default_config();
        let outcome = validator.validate(&w2_extraction(Some(-10.0), None));

        assert!(!outcome.is_valid);
    }

    #[test]
    fn test_excess_withholding_is_warning_not_error() {
        let validator = Validator::default_config();
        // 80% withholding: suspicious, but advisory only
        let outcome = validator.validate(&w2_extraction(Some(10_000.0), Some(8_000.0)));

        assert!(outcome.is_valid);
        assert_eq!(outcome.errors.len(), 0);
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("withholding"));
    }

    #[test]
    fn test_bad_ssn_is_warning() {
        let validator = Validator::default_config();
        let mut e = w2_extraction(Some(100.0), None);
        e.put_field("ssn", FieldValue::Text("12-34".into()), 0.5);
        let outcome = validator.validate(&e);

        assert!(outcome.is_valid);
        assert!(outcome.warnings.iter().any(|w| w.contains("SSN")));
    }

    #[test]
    fn test_permissive_config_silences_warnings() {
        let validator = Validator::new(ValidationConfig::permissive());
        let mut e = ExtractionResult::empty(DocumentType::W2, "test");
        e.put_field("wages", FieldValue::Amount(100.0), 0.9);
        let outcome = validator.validate(&e);

        assert!(outcome.is_valid);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_failed_extraction_blocks() {
        let validator = Validator::default_config();
        let e = ExtractionResult::service_failure(DocumentType::W2, "timeout");
        let outcome = validator.validate(&e);

        assert!(!outcome.is_valid);
    }

    #[test]
    fn test_unknown_type_blocks() {
        let validator = Validator::default_config();
        let e = ExtractionResult::empty(DocumentType::Unknown, "unsupported");
        let outcome = validator.validate(&e);

        assert!(!outcome.is_valid);
        assert!(outcome.errors[0].contains("unrecognized"));
    }

    #[test]
    fn test_1099_int_missing_interest_blocks() {
        let validator = Validator::default_config();
        let e = ExtractionResult::empty(DocumentType::Form1099Int, "test");
        let outcome = validator.validate(&e);

        assert!(!outcome.is_valid);
    }

    #[test]
    fn test_1099_misc_needs_one_income_box() {
        let validator = Validator::default_config();
        let mut e = ExtractionResult::empty(DocumentType::Form1099Misc, "test");
        let outcome = validator.validate(&e);
        assert!(!outcome.is_valid);

        e.put_field("rents", FieldValue::Amount(1200.0), 0.9);
        let outcome = validator.validate(&e);
        assert!(outcome.is_valid);
    }

    #[test]
    fn test_ceiling_blocks_ocr_garbage() {
        let validator = Validator::default_config();
        let outcome = validator.validate(&w2_extraction(Some(48_500_000_000.0), None));

        assert!(!outcome.is_valid);
        assert!(outcome.errors[0].contains("ceiling"));
    }
}
