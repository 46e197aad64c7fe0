use chrono::NaiveDate;

use digitize::domain::{FieldDefinition, FieldType, Template, TemplateError, TemplateSchema};

fn schema(name: &str, fields: Vec<FieldDefinition>) -> TemplateSchema {
    TemplateSchema {
        name: name.to_string(),
        fields,
        ..TemplateSchema::default()
    }
}

#[test]
fn given_invoice_schema_when_creating_template_then_fields_keep_entered_order() {
    let template = Template::new(schema(
        "Invoice Scanner",
        vec![
            FieldDefinition::new("Invoice Number", FieldType::String),
            FieldDefinition::new("Total Amount", FieldType::Currency),
        ],
    ))
    .unwrap();

    assert_eq!(template.name, "Invoice Scanner");
    assert_eq!(
        template.field_names().collect::<Vec<_>>(),
        vec!["Invoice Number", "Total Amount"]
    );
    assert_eq!(
        template.field("Total Amount").map(|f| f.field_type),
        Some(FieldType::Currency)
    );
}

#[test]
fn given_blank_name_when_creating_template_then_rejects_empty_name() {
    let result = Template::new(schema("   ", vec![]));

    assert_eq!(result.unwrap_err(), TemplateError::EmptyName);
}

#[test]
fn given_duplicate_field_names_when_creating_template_then_rejects() {
    let result = Template::new(schema(
        "Receipt Parser",
        vec![
            FieldDefinition::new("Total", FieldType::Currency),
            FieldDefinition::new(" Total ", FieldType::Number),
        ],
    ));

    assert_eq!(
        result.unwrap_err(),
        TemplateError::DuplicateFieldName("Total".to_string())
    );
}

#[test]
fn given_blank_field_name_when_creating_template_then_reports_position() {
    let result = Template::new(schema(
        "Receipt Parser",
        vec![
            FieldDefinition::new("Store", FieldType::String),
            FieldDefinition::new("", FieldType::String),
        ],
    ));

    assert_eq!(
        result.unwrap_err(),
        TemplateError::EmptyFieldName { position: 2 }
    );
}

#[test]
fn given_zero_max_length_when_creating_template_then_rejects() {
    let result = Template::new(schema(
        "ID Card Reader",
        vec![FieldDefinition::new("Full Name", FieldType::String).with_max_length(0)],
    ));

    assert_eq!(
        result.unwrap_err(),
        TemplateError::InvalidMaxLength("Full Name".to_string())
    );
}

#[test]
fn given_inverted_active_dates_when_creating_template_then_rejects_range() {
    let from = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let until = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let schema = TemplateSchema {
        active_from: Some(from),
        active_until: Some(until),
        ..schema("Invoice Scanner", vec![])
    };

    assert_eq!(
        Template::new(schema).unwrap_err(),
        TemplateError::InvalidDateRange { from, until }
    );
}
