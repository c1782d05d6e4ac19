//! W-2 extraction catalog

use crate::extractor::{CatalogExtractor, FieldKind, FieldSpec};
use formfill_domain::DocumentType;

/// Build the W-2 extractor
///
/// The catalog is the explicit allow-list of canonical fields a W-2
/// extraction can ever populate; label lists mirror the wording printed on
/// the form, longest variant first.
pub fn w2_extractor() -> CatalogExtractor {
    CatalogExtractor::new(
        DocumentType::W2,
        "w2_markdown",
        vec![
            FieldSpec {
                canonical: "ssn",
                kind: FieldKind::Id { digits: 9 },
                box_label: None,
                labels: &[
                    "employee's social security number",
                    "social security number",
                    "ssn",
                ],
            },
            FieldSpec {
                canonical: "ein",
                kind: FieldKind::Id { digits: 9 },
                box_label: None,
                labels: &["employer identification number", "ein"],
            },
            FieldSpec {
                canonical: "employer_name",
                kind: FieldKind::Text,
                box_label: None,
                labels: &["employer's name, address, and zip code", "employer's name"],
            },
            FieldSpec {
                canonical: "employee_name",
                kind: FieldKind::Text,
                box_label: None,
                labels: &["employee's first name and initial", "employee's name"],
            },
            FieldSpec {
                canonical: "wages",
                kind: FieldKind::Money,
                box_label: Some("1"),
                labels: &["wages, tips, other compensation", "wages"],
            },
            FieldSpec {
                canonical: "federal_withholding",
                kind: FieldKind::Money,
                box_label: Some("2"),
                labels: &["federal income tax withheld"],
            },
            FieldSpec {
                canonical: "social_security_wages",
                kind: FieldKind::Money,
                box_label: Some("3"),
                labels: &["social security wages"],
            },
            FieldSpec {
                canonical: "social_security_withholding",
                kind: FieldKind::Money,
                box_label: Some("4"),
                labels: &["social security tax withheld"],
            },
            FieldSpec {
                canonical: "medicare_wages",
                kind: FieldKind::Money,
                box_label: Some("5"),
                labels: &["medicare wages and tips"],
            },
            FieldSpec {
                canonical: "medicare_withholding",
                kind: FieldKind::Money,
                box_label: Some("6"),
                labels: &["medicare tax withheld"],
            },
            FieldSpec {
                canonical: "social_security_tips",
                kind: FieldKind::Money,
                box_label: Some("7"),
                labels: &["social security tips"],
            },
            FieldSpec {
                canonical: "allocated_tips",
                kind: FieldKind::Money,
                box_label: Some("8"),
                labels: &["allocated tips"],
            },
            FieldSpec {
                canonical: "dependent_care_benefits",
                kind: FieldKind::Money,
                box_label: Some("10"),
                labels: &["dependent care benefits"],
            },
            FieldSpec {
                canonical: "nonqualified_plans",
                kind: FieldKind::Money,
                box_label: Some("11"),
                labels: &["nonqualified plans"],
            },
            FieldSpec {
                canonical: "state_wages",
                kind: FieldKind::Money,
                box_label: Some("16"),
                labels: &["state wages, tips, etc."],
            },
            FieldSpec {
                canonical: "state_withholding",
                kind: FieldKind::Money,
                box_label: Some("17"),
                labels: &["state income tax"],
            },
            FieldSpec {
                canonical: "local_wages",
                kind: FieldKind::Money,
                box_label: Some("18"),
                labels: &["local wages, tips, etc."],
            },
            FieldSpec {
                canonical: "local_withholding",
                kind: FieldKind::Money,
                box_label: Some("19"),
                labels: &["local income tax"],
            },
        ],
    )
}
