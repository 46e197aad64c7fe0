use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use tokio::sync::RwLock;

use crate::application::ports::{RepositoryError, TemplateRepository};
use crate::domain::{FieldDefinition, FieldType, Template, TemplateId, TemplateSchema};

/// Templates kept in process memory, newest first.
#[derive(Default)]
pub struct InMemoryTemplateRepository {
    templates: RwLock<Vec<Template>>,
}

impl InMemoryTemplateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with the sample gallery templates.
    pub fn with_examples() -> Self {
        let mut templates = example_templates();
        templates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Self {
            templates: RwLock::new(templates),
        }
    }
}

#[async_trait]
impl TemplateRepository for InMemoryTemplateRepository {
    #[tracing::instrument(skip(self, template), fields(template_id = %template.id.as_uuid()))]
    async fn create(&self, template: &Template) -> Result<(), RepositoryError> {
        let mut templates = self.templates.write().await;
        if templates.iter().any(|t| t.id == template.id) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "template {} already exists",
                template.id.as_uuid()
            )));
        }
        let position = templates
            .iter()
            .position(|t| t.created_at <= template.created_at)
            .unwrap_or(templates.len());
        templates.insert(position, template.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Template>, RepositoryError> {
        Ok(self.templates.read().await.clone())
    }

    async fn get(&self, id: TemplateId) -> Result<Option<Template>, RepositoryError> {
        Ok(self
            .templates
            .read()
            .await
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }
}

fn example_templates() -> Vec<Template> {
    let examples = [
        (
            "Invoice Scanner",
            "Extract key details from invoices including amounts, dates, and vendor information",
            (2024, 1, 15),
            vec![
                FieldDefinition::new("Invoice Number", FieldType::String)
                    .with_description("Unique invoice identifier"),
                FieldDefinition::new("Total Amount", FieldType::Currency)
                    .with_description("Total amount due")
                    .with_format_example("$1,234.56"),
                FieldDefinition::new("Due Date", FieldType::Date)
                    .with_description("Payment due date"),
                FieldDefinition::new("Vendor Name", FieldType::String)
                    .with_description("Name of the vendor/supplier"),
                FieldDefinition::new("Tax Amount", FieldType::Currency)
                    .with_description("Tax amount"),
            ],
        ),
        (
            "Receipt Parser",
            "Parse retail receipts for expense tracking and accounting",
            (2024, 1, 10),
            vec![
                FieldDefinition::new("Store Name", FieldType::String),
                FieldDefinition::new("Total", FieldType::Currency),
                FieldDefinition::new("Date", FieldType::Date),
                FieldDefinition::new("Items", FieldType::String),
                FieldDefinition::new("Payment Method", FieldType::String),
            ],
        ),
        (
            "ID Card Reader",
            "Extract personal information from government issued IDs",
            (2024, 1, 5),
            vec![
                FieldDefinition::new("Full Name", FieldType::String),
                FieldDefinition::new("Date of Birth", FieldType::Date),
                FieldDefinition::new("ID Number", FieldType::String),
                FieldDefinition::new("Address", FieldType::String),
                FieldDefinition::new("Expiry Date", FieldType::Date),
                FieldDefinition::new("Photo", FieldType::String),
            ],
        ),
    ];

    examples
        .into_iter()
        .filter_map(|(name, description, (y, m, d), fields)| {
            let created_at = NaiveDate::from_ymd_opt(y, m, d)
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|dt| Utc.from_utc_datetime(&dt))?;
            let schema = TemplateSchema {
                name: name.to_string(),
                description: description.to_string(),
                fields,
                active_from: None,
                active_until: None,
            };
            Template::with_created_at(schema, created_at).ok()
        })
        .collect()
}
