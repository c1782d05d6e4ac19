//! End-to-end tests for the ingest and fill pipelines

use formfill_docai::MockDocAi;
use formfill_engine::{Engine, EngineConfig, FillRequest, IngestRequest};
use formfill_domain::{DocumentRef, DocumentType, FieldValue};
use formfill_store::{MemoryMetadataStore, MemoryObjectStore};
use std::collections::BTreeMap;
use std::sync::Arc;

const SAMPLE_W2: &str = "\
# Form W-2 Wage and Tax Statement (2024)

Employee's social security number: 123-45-6789
Employer identification number (EIN): 12-3456789
Employer's name, address, and ZIP code: Acme Corporation, 1 Industrial Way
Employee's first name and initial: Jane A Smith

Box 1 Wages, tips, other compensation: $48,500.00
Box 2 Federal income tax withheld: $6,835.00
Box 3 Social security wages: $48,500.00
Box 4 Social security tax withheld: $3,007.00
Box 5 Medicare wages and tips: $48,500.00
Box 6 Medicare tax withheld: $703.25
";

fn test_engine(docai: MockDocAi) -> Engine<MockDocAi, MemoryObjectStore, MemoryMetadataStore> {
    let config = EngineConfig {
        submit_timeout_secs: 5,
        submit_retries: 2,
        backoff_base_ms: 1,
    };
    Engine::new(
        docai,
        MemoryObjectStore::new(),
        MemoryMetadataStore::new(),
        config,
    )
}

fn ingest_request(key: &str) -> IngestRequest {
    IngestRequest {
        document: DocumentRef::new(key, "application/pdf"),
        subject_id: "subj-1".to_string(),
        tax_year: 2024,
        document_type: None,
    }
}

#[tokio::test]
async fn test_w2_ingest_end_to_end() {
    let mut docai = MockDocAi::default();
    docai.add_response("uploads/jane_w2_2024.pdf", SAMPLE_W2);
    let engine = test_engine(docai);

    let outcome = engine
        .ingest(ingest_request("uploads/jane_w2_2024.pdf"))
        .await
        .unwrap();

    assert_eq!(outcome.document_type, DocumentType::W2);
    assert!(outcome.extraction.success);
    assert_eq!(outcome.extraction.amount("wages"), Some(48500.0));
    assert_eq!(outcome.extraction.amount("federal_withholding"), Some(6835.0));
    assert!(outcome.extraction.errors.is_empty());
    assert!(outcome.validation.is_valid);
    assert!(outcome.validation.errors.is_empty());
}

#[tokio::test]
async fn test_filename_classification_routes_extraction() {
    let mut docai = MockDocAi::default();
    docai.add_response(
        "uploads/test_1099-int_document.pdf",
        "Box 1 Interest income: $312.50\nBox 4 Federal income tax withheld: $31.00",
    );
    let engine = test_engine(docai);

    let outcome = engine
        .ingest(ingest_request("uploads/test_1099-int_document.pdf"))
        .await
        .unwrap();

    assert_eq!(outcome.document_type, DocumentType::Form1099Int);
    assert_eq!(outcome.extraction.amount("interest_income"), Some(312.5));
    assert_eq!(outcome.extraction.amount("federal_withholding"), Some(31.0));
}

#[tokio::test]
async fn test_unrecognized_document_yields_unknown() {
    let engine = test_engine(MockDocAi::new("some page"));

    let outcome = engine
        .ingest(ingest_request("uploads/receipt_scan.pdf"))
        .await
        .unwrap();

    assert_eq!(outcome.document_type, DocumentType::Unknown);
    assert!(outcome.extraction.fields.is_empty());
    assert!(!outcome.extraction.errors.is_empty());
    // Unknown documents cannot be validated, so the pipeline blocks here
    assert!(!outcome.validation.is_valid);
}

#[tokio::test]
async fn test_fill_with_alias_inference() {
    let engine = test_engine(MockDocAi::default());

    let mut fields = BTreeMap::new();
    fields.insert(
        "primary_name".to_string(),
        FieldValue::Text("Jane Smith".to_string()),
    );
    fields.insert(
        "home_address".to_string(),
        FieldValue::Text("12 Main Street, Springfield".to_string()),
    );
    fields.insert("wages".to_string(), FieldValue::Amount(48500.0));

    let outcome = engine
        .fill(FillRequest {
            form_type: "1040".to_string(),
            subject_id: "subj-1".to_string(),
            tax_year: 2024,
            fields,
        })
        .await
        .unwrap();

    let assignments = &outcome.mapping.assignments;
    assert_eq!(
        assignments.get("f1_first_name"),
        Some(&FieldValue::Text("Jane".to_string()))
    );
    assert_eq!(
        assignments.get("f1_last_name"),
        Some(&FieldValue::Text("Smith".to_string()))
    );
    assert_eq!(
        assignments.get("f1_home_address"),
        Some(&FieldValue::Text("12 Main Street, Springfield".to_string()))
    );
    assert_eq!(
        assignments.get("f1_line_1a"),
        Some(&FieldValue::Amount(48500.0))
    );
    assert!(outcome.mapping.unmapped_fields.is_empty());

    assert_eq!(outcome.version.version, 1);
    assert_eq!(outcome.version.form_type, "1040");
    assert_eq!(outcome.version.tax_year, 2024);
}

#[tokio::test]
async fn test_unmappable_fields_are_reported_not_dropped_silently() {
    let engine = test_engine(MockDocAi::default());

    let mut fields = BTreeMap::new();
    fields.insert(
        "favorite_color".to_string(),
        FieldValue::Text("green".to_string()),
    );

    let outcome = engine
        .fill(FillRequest {
            form_type: "1040".to_string(),
            subject_id: "subj-1".to_string(),
            tax_year: 2024,
            fields,
        })
        .await
        .unwrap();

    assert!(outcome.mapping.assignments.is_empty());
    assert_eq!(outcome.mapping.unmapped_fields, vec!["favorite_color"]);
}

#[tokio::test]
async fn test_repeated_fills_increment_version() {
    let engine = test_engine(MockDocAi::default());

    for expected in 1..=3u32 {
        let mut fields = BTreeMap::new();
        fields.insert("wages".to_string(), FieldValue::Amount(1000.0 * expected as f64));

        let outcome = engine
            .fill(FillRequest {
                form_type: "1040".to_string(),
                subject_id: "subj-1".to_string(),
                tax_year: 2024,
                fields,
            })
            .await
            .unwrap();

        assert_eq!(outcome.version.version, expected);
    }
}

#[tokio::test]
async fn test_concurrent_fills_get_distinct_versions() {
    let engine = Arc::new(test_engine(MockDocAi::default()));

    let mut handles = Vec::new();
    for i in 0..2 {
        let engine = Arc::clone(&engine);
        handles.push(tokio::spawn(async move {
            let mut fields = BTreeMap::new();
            fields.insert("wages".to_string(), FieldValue::Amount(100.0 * i as f64));
            engine
                .fill(FillRequest {
                    form_type: "1040".to_string(),
                    subject_id: "subj-1".to_string(),
                    tax_year: 2024,
                    fields,
                })
                .await
                .unwrap()
        }));
    }

    let mut versions = Vec::new();
    for handle in handles {
        versions.push(handle.await.unwrap().version.version);
    }
    versions.sort_unstable();
    assert_eq!(versions, vec![1, 2]);
}

#[tokio::test]
async fn test_versions_are_scoped_per_subject_form_year() {
    let engine = test_engine(MockDocAi::default());

    let fill = |subject: &str, form: &str, year: u16| FillRequest {
        form_type: form.to_string(),
        subject_id: subject.to_string(),
        tax_year: year,
        fields: BTreeMap::new(),
    };

    assert_eq!(engine.fill(fill("a", "1040", 2024)).await.unwrap().version.version, 1);
    assert_eq!(engine.fill(fill("a", "1040", 2023)).await.unwrap().version.version, 1);
    assert_eq!(engine.fill(fill("b", "1040", 2024)).await.unwrap().version.version, 1);
    assert_eq!(engine.fill(fill("a", "ca_540", 2024)).await.unwrap().version.version, 1);
    assert_eq!(engine.fill(fill("a", "1040", 2024)).await.unwrap().version.version, 2);
}
