//! 1099-family extraction catalogs (INT, MISC, DIV, NEC)
//!
//! The four variants share the payer/recipient block and differ only in
//! their income boxes, so each catalog is the common block plus the
//! variant's own box list.

use crate::extractor::{CatalogExtractor, FieldKind, FieldSpec};
use formfill_domain::DocumentType;

/// Payer/recipient identification block common to all 1099 variants
fn payer_recipient_block() -> Vec<FieldSpec> {
    vec![
        FieldSpec {
            canonical: "payer_name",
            kind: FieldKind::Text,
            box_label: None,
            labels: &["payer's name, street address", "payer's name", "payer name"],
        },
        FieldSpec {
            canonical: "payer_tin",
            kind: FieldKind::Id { digits: 9 },
            box_label: None,
            labels: &["payer's tin", "payer tin"],
        },
        FieldSpec {
            canonical: "recipient_name",
            kind: FieldKind::Text,
            box_label: None,
            labels: &["recipient's name", "recipient name"],
        },
        FieldSpec {
            canonical: "recipient_tin",
            kind: FieldKind::Id { digits: 9 },
            box_label: None,
            labels: &["recipient's tin", "recipient tin"],
        },
    ]
}

/// Build the 1099-INT extractor
pub fn form1099_int_extractor() -> CatalogExtractor {
    let mut catalog = payer_recipient_block();
    catalog.extend(vec![
        FieldSpec {
            canonical: "interest_income",
            kind: FieldKind::Money,
            box_label: Some("1"),
            labels: &["interest income"],
        },
        FieldSpec {
            canonical: "early_withdrawal_penalty",
            kind: FieldKind::Money,
            box_label: Some("2"),
            labels: &["early withdrawal penalty"],
        },
        FieldSpec {
            canonical: "us_savings_bond_interest",
            kind: FieldKind::Money,
            box_label: Some("3"),
            labels: &["interest on u.s. savings bonds and treasury obligations"],
        },
        FieldSpec {
            canonical: "federal_withholding",
            kind: FieldKind::Money,
            box_label: Some("4"),
            labels: &["federal income tax withheld"],
        },
        FieldSpec {
            canonical: "investment_expenses",
            kind: FieldKind::Money,
            box_label: Some("5"),
            labels: &["investment expenses"],
        },
        FieldSpec {
            canonical: "foreign_tax_paid",
            kind: FieldKind::Money,
            box_label: Some("6"),
            labels: &["foreign tax paid"],
        },
        FieldSpec {
            canonical: "tax_exempt_interest",
            kind: FieldKind::Money,
            box_label: Some("8"),
            labels: &["tax-exempt interest"],
        },
    ]);
    CatalogExtractor::new(DocumentType::Form1099Int, "1099_int_markdown", catalog)
}

/// Build the 1099-MISC extractor
pub fn form1099_misc_extractor() -> CatalogExtractor {
    let mut catalog = payer_recipient_block();
    catalog.extend(vec![
        FieldSpec {
            canonical: "rents",
            kind: FieldKind::Money,
            box_label: Some("1"),
            labels: &["rents"],
        },
        FieldSpec {
            canonical: "royalties",
            kind: FieldKind::Money,
            box_label: Some("2"),
            labels: &["royalties"],
        },
        FieldSpec {
            canonical: "other_income",
            kind: FieldKind::Money,
            box_label: Some("3"),
            labels: &["other income"],
        },
        FieldSpec {
            canonical: "federal_withholding",
            kind: FieldKind::Money,
            box_label: Some("4"),
            labels: &["federal income tax withheld"],
        },
        FieldSpec {
            canonical: "fishing_boat_proceeds",
            kind: FieldKind::Money,
            box_label: Some("5"),
            labels: &["fishing boat proceeds"],
        },
        FieldSpec {
            canonical: "medical_payments",
            kind: FieldKind::Money,
            box_label: Some("6"),
            labels: &["medical and health care payments"],
        },
        FieldSpec {
            canonical: "substitute_payments",
            kind: FieldKind::Money,
            box_label: Some("8"),
            labels: &["substitute payments in lieu of dividends or interest"],
        },
        FieldSpec {
            canonical: "gross_proceeds_attorney",
            kind: FieldKind::Money,
            box_label: Some("10"),
            labels: &["gross proceeds paid to an attorney"],
        },
    ]);
    CatalogExtractor::new(DocumentType::Form1099Misc, "1099_misc_markdown", catalog)
}

/// Build the 1099-DIV extractor
pub fn form1099_div_extractor() -> CatalogExtractor {
    let mut catalog = payer_recipient_block();
    catalog.extend(vec![
        FieldSpec {
            canonical: "ordinary_dividends",
            kind: FieldKind::Money,
            box_label: Some("1a"),
            labels: &["total ordinary dividends"],
        },
        FieldSpec {
            canonical: "qualified_dividends",
            kind: FieldKind::Money,
            box_label: Some("1b"),
            labels: &["qualified dividends"],
        },
        FieldSpec {
            canonical: "capital_gain_distributions",
            kind: FieldKind::Money,
            box_label: Some("2a"),
            labels: &["total capital gain distr"],
        },
        FieldSpec {
            canonical: "nondividend_distributions",
            kind: FieldKind::Money,
            box_label: Some("3"),
            labels: &["nondividend distributions"],
        },
        FieldSpec {
            canonical: "federal_withholding",
            kind: FieldKind::Money,
            box_label: Some("4"),
            labels: &["federal income tax withheld"],
        },
        FieldSpec {
            canonical: "section_199a_dividends",
            kind: FieldKind::Money,
            box_label: Some("5"),
            labels: &["section 199a dividends"],
        },
        FieldSpec {
            canonical: "foreign_tax_paid",
            kind: FieldKind::Money,
            box_label: Some("7"),
            labels: &["foreign tax paid"],
        },
    ]);
    CatalogExtractor::new(DocumentType::Form1099Div, "1099_div_markdown", catalog)
}

/// Build the 1099-NEC extractor
pub fn form1099_nec_extractor() -> CatalogExtractor {
    let mut catalog = payer_recipient_block();
    catalog.extend(vec![
        FieldSpec {
            canonical: "nonemployee_compensation",
            kind: FieldKind::Money,
            box_label: Some("1"),
            labels: &["nonemployee compensation"],
        },
        FieldSpec {
            canonical: "federal_withholding",
            kind: FieldKind::Money,
            box_label: Some("4"),
            labels: &["federal income tax withheld"],
        },
        FieldSpec {
            canonical: "state_withholding",
            kind: FieldKind::Money,
            box_label: Some("5"),
            labels: &["state tax withheld"],
        },
    ]);
    CatalogExtractor::new(DocumentType::Form1099Nec, "1099_nec_markdown", catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::FieldExtractor;
    use formfill_domain::traits::RawDocument;

    #[test]
    fn test_1099_int_extraction() {
        let raw = RawDocument::single_page(
            "PAYER'S name: First National Bank\n\
             PAYER'S TIN: 98-7654321\n\
             RECIPIENT'S TIN: 123-45-6789\n\
             Box 1 Interest income: $1,250.00\n\
             Box 4 Federal income tax withheld: $125.00",
            "mock",
        );
        let result = form1099_int_extractor().extract(&raw);

        assert_eq!(result.amount("interest_income"), Some(1250.0));
        assert_eq!(result.amount("federal_withholding"), Some(125.0));
        assert_eq!(result.text("payer_tin"), Some("98-7654321"));
        assert!(result.text("payer_name").unwrap().contains("First National"));
    }

    #[test]
    fn test_1099_misc_extraction() {
        let raw = RawDocument::single_page(
            "Box 1 Rents: $24,000.00\nBox 3 Other income: $500.00",
            "mock",
        );
        let result = form1099_misc_extractor().extract(&raw);

        assert_eq!(result.amount("rents"), Some(24000.0));
        assert_eq!(result.amount("other_income"), Some(500.0));
        assert_eq!(result.amount("royalties"), None);
    }

    #[test]
    fn test_1099_div_letter_boxes() {
        let raw = RawDocument::single_page(
            "Box 1a Total ordinary dividends: $3,200.00\n\
             Box 1b Qualified dividends: $2,900.00",
            "mock",
        );
        let result = form1099_div_extractor().extract(&raw);

        assert_eq!(result.amount("ordinary_dividends"), Some(3200.0));
        assert_eq!(result.amount("qualified_dividends"), Some(2900.0));
    }

    #[test]
    fn test_1099_nec_extraction() {
        let raw = RawDocument::single_page(
            "Box 1 Nonemployee compensation: $62,000.00",
            "mock",
        );
        let result = form1099_nec_extractor().extract(&raw);

        assert_eq!(result.amount("nonemployee_compensation"), Some(62000.0));
    }

    #[test]
    fn test_catalogs_are_allow_lists() {
        // A W-2-style wages line means nothing to a 1099-INT
        let raw = RawDocument::single_page("Wages, tips, other compensation: $48,500.00", "mock");
        let result = form1099_int_extractor().extract(&raw);
        assert!(result.fields.is_empty());
    }
}
