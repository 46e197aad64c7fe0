use std::sync::Arc;

use digitize::application::services::{DocumentIntake, TemplateService, TemplateServiceError};
use digitize::domain::{
    DraftCommand, FieldDefinition, FieldPatch, FieldType, IntakeChannel, TemplateDraft,
    TemplateId, TemplateSchema,
};
use digitize::infrastructure::engine::MockExtractionEngine;
use digitize::infrastructure::persistence::InMemoryTemplateRepository;

use crate::helpers::png_file;

fn service(repository: InMemoryTemplateRepository) -> TemplateService {
    TemplateService::new(
        Arc::new(repository),
        Arc::new(MockExtractionEngine::default()),
        DocumentIntake::default(),
    )
}

#[tokio::test]
async fn given_seeded_store_when_listing_then_returns_newest_first() {
    let service = service(InMemoryTemplateRepository::with_examples());

    let names: Vec<_> = service
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();

    assert_eq!(
        names,
        vec!["Invoice Scanner", "Receipt Parser", "ID Card Reader"]
    );
}

#[tokio::test]
async fn given_new_template_when_created_then_listed_first_and_retrievable() {
    let service = service(InMemoryTemplateRepository::with_examples());

    let created = service
        .create(TemplateSchema {
            name: "Purchase Order".to_string(),
            fields: vec![FieldDefinition::new("PO Number", FieldType::String)],
            ..TemplateSchema::default()
        })
        .await
        .unwrap();

    let listed = service.list().await.unwrap();
    assert_eq!(listed[0].id, created.id);
    assert_eq!(service.get(created.id).await.unwrap(), created);
}

#[tokio::test]
async fn given_unknown_id_when_getting_then_returns_not_found() {
    let service = service(InMemoryTemplateRepository::new());
    let id = TemplateId::new();

    let error = service.get(id).await.unwrap_err();

    assert!(matches!(error, TemplateServiceError::NotFound(missing) if missing == id));
}

#[tokio::test]
async fn given_invalid_schema_when_creating_then_returns_validation_and_stores_nothing() {
    let service = service(InMemoryTemplateRepository::new());

    let error = service
        .create(TemplateSchema::default())
        .await
        .unwrap_err();

    assert!(matches!(error, TemplateServiceError::Validation(_)));
    assert!(service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn given_draft_when_created_from_draft_then_keeps_named_fields() {
    let service = service(InMemoryTemplateRepository::new());
    let draft = TemplateDraft::new()
        .apply(DraftCommand::SetName("Receipt Parser".to_string()))
        .apply(DraftCommand::AddField);
    let first = draft.fields()[0].id;
    let draft = draft.apply(DraftCommand::UpdateField(
        first,
        FieldPatch {
            name: Some("Store Name".to_string()),
            ..FieldPatch::default()
        },
    ));

    let template = service.create_from_draft(draft).await.unwrap();

    assert_eq!(template.field_names().collect::<Vec<_>>(), vec!["Store Name"]);
}

#[tokio::test]
async fn given_prompt_and_sample_when_suggesting_then_returns_typed_fields() {
    let service = service(InMemoryTemplateRepository::new());

    let fields = service
        .suggest(
            "Extract invoice number, due date and total amount",
            Some((png_file("sample.png"), IntakeChannel::DragAndDrop)),
        )
        .await
        .unwrap();

    let pairs: Vec<_> = fields
        .iter()
        .map(|f| (f.name.as_str(), f.field_type))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("Invoice Number", FieldType::String),
            ("Due Date", FieldType::Date),
            ("Total Amount", FieldType::Currency),
        ]
    );
    assert!(service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn given_blank_prompt_when_suggesting_then_returns_empty_prompt() {
    let service = service(InMemoryTemplateRepository::new());

    let error = service.suggest("   ", None).await.unwrap_err();

    assert!(matches!(error, TemplateServiceError::EmptyPrompt));
}
