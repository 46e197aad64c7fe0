use std::time::Duration;

use tokio_util::sync::CancellationToken;

use digitize::application::ports::{ExtractionEngine, ExtractionEngineError, ExtractionRequest};
use digitize::domain::{FieldDefinition, FieldType, TemplateId};
use digitize::infrastructure::engine::{MockExtractionEngine, fields_from_prompt};

use crate::helpers::png_document;

fn request(fields: Vec<FieldDefinition>) -> ExtractionRequest {
    ExtractionRequest {
        template_id: TemplateId::new(),
        document: png_document(),
        fields,
    }
}

#[test]
fn given_comma_separated_prompt_when_parsing_then_returns_typed_fields() {
    let fields = fields_from_prompt("Extract invoice number, vendor name, and total amount");

    let pairs: Vec<_> = fields
        .iter()
        .map(|f| (f.name.as_str(), f.field_type))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("Invoice Number", FieldType::String),
            ("Vendor Name", FieldType::String),
            ("Total Amount", FieldType::Currency),
        ]
    );
}

#[test]
fn given_capitalised_connectives_when_parsing_prompt_then_splits_fields() {
    let fields = fields_from_prompt("Extract Vendor Name And The Total; Brand");

    let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Vendor Name", "Total", "Brand"]);
}

#[test]
fn given_repeated_names_when_parsing_prompt_then_dedupes_case_insensitively() {
    let fields = fields_from_prompt("email; phone number\nEmail; item count");

    let pairs: Vec<_> = fields
        .iter()
        .map(|f| (f.name.as_str(), f.field_type))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("Email", FieldType::Email),
            ("Phone Number", FieldType::Phone),
            ("Item Count", FieldType::Number),
        ]
    );
}

#[tokio::test]
async fn given_invoice_fields_when_extracting_then_returns_canned_values_in_order() {
    let engine = MockExtractionEngine::default();
    let fields = vec![
        FieldDefinition::new("Invoice Number", FieldType::String),
        FieldDefinition::new("Issue Date", FieldType::Date),
        FieldDefinition::new("Reference", FieldType::String).with_max_length(4),
    ];

    let extracted = engine
        .extract(&request(fields), CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(extracted[0].value, "INV-2024-001");
    assert_eq!(extracted[0].confidence, 0.97);
    assert_eq!(extracted[1].value, "2024-01-15");
    assert_eq!(extracted[2].value, "Samp");
}

#[tokio::test]
async fn given_cancelled_token_when_extracting_then_returns_cancelled() {
    let engine = MockExtractionEngine::new(Duration::from_secs(60));
    let cancel = CancellationToken::new();
    cancel.cancel();

    let error = engine
        .extract(
            &request(vec![FieldDefinition::new("Invoice Number", FieldType::String)]),
            cancel,
        )
        .await
        .unwrap_err();

    assert_eq!(error, ExtractionEngineError::Cancelled);
}
