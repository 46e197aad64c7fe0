use digitize::domain::{DraftCommand, FieldPatch, FieldType, TemplateDraft};

fn named(name: &str) -> FieldPatch {
    FieldPatch {
        name: Some(name.to_string()),
        ..FieldPatch::default()
    }
}

#[test]
fn given_new_draft_when_created_then_has_one_empty_field() {
    let draft = TemplateDraft::new();

    assert_eq!(draft.fields().len(), 1);
    assert!(draft.fields()[0].name.is_empty());
    assert_eq!(draft.fields()[0].field_type, FieldType::String);
}

#[test]
fn given_single_field_when_removing_it_then_draft_keeps_it() {
    let draft = TemplateDraft::new();
    let only = draft.fields()[0].id;

    let draft = draft.apply(DraftCommand::RemoveField(only));

    assert_eq!(draft.fields().len(), 1);
}

#[test]
fn given_blank_rows_when_converting_to_schema_then_keeps_named_fields_in_order() {
    let draft = TemplateDraft::new()
        .apply(DraftCommand::SetName("Invoice Scanner".to_string()))
        .apply(DraftCommand::AddField)
        .apply(DraftCommand::AddField);
    let ids: Vec<_> = draft.fields().iter().map(|f| f.id).collect();

    let draft = draft
        .apply(DraftCommand::UpdateField(ids[0], named("Invoice Number")))
        .apply(DraftCommand::UpdateField(ids[1], named("   ")))
        .apply(DraftCommand::UpdateField(
            ids[2],
            FieldPatch {
                name: Some("Total Amount".to_string()),
                field_type: Some(FieldType::Currency),
                max_length: Some(Some(12)),
                ..FieldPatch::default()
            },
        ));

    let schema = draft.into_schema();

    let names: Vec<_> = schema.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Invoice Number", "Total Amount"]);
    assert_eq!(schema.fields[1].field_type, FieldType::Currency);
    assert_eq!(schema.fields[1].max_length, Some(12));
    assert_eq!(schema.name, "Invoice Scanner");
}

#[test]
fn given_removed_field_when_adding_again_then_ids_are_not_reused() {
    let draft = TemplateDraft::new().apply(DraftCommand::AddField);
    let second = draft.fields()[1].id;

    let draft = draft
        .apply(DraftCommand::RemoveField(second))
        .apply(DraftCommand::AddField);

    assert_ne!(draft.fields()[1].id, second);
}
