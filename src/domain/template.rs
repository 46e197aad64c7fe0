use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::FieldDefinition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(Uuid);

impl TemplateId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TemplateId {
    fn default() -> Self {
        Self::new()
    }
}

/// Creation input for a template, as submitted by its author.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TemplateSchema {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    #[serde(default)]
    pub active_from: Option<NaiveDate>,
    #[serde(default)]
    pub active_until: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("template name must not be empty")]
    EmptyName,
    #[error("field {position} has an empty name")]
    EmptyFieldName { position: usize },
    #[error("duplicate field name: {0}")]
    DuplicateFieldName(String),
    #[error("max length of field {0} must be greater than zero")]
    InvalidMaxLength(String),
    #[error("active_from {from} is after active_until {until}")]
    InvalidDateRange { from: NaiveDate, until: NaiveDate },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    pub description: String,
    pub fields: Vec<FieldDefinition>,
    pub active_from: Option<NaiveDate>,
    pub active_until: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Template {
    /// Validates `schema` and stamps a fresh id and timestamps.
    pub fn new(schema: TemplateSchema) -> Result<Self, TemplateError> {
        Self::with_created_at(schema, Utc::now())
    }

    pub fn with_created_at(
        schema: TemplateSchema,
        created_at: DateTime<Utc>,
    ) -> Result<Self, TemplateError> {
        let name = schema.name.trim().to_string();
        if name.is_empty() {
            return Err(TemplateError::EmptyName);
        }

        if let (Some(from), Some(until)) = (schema.active_from, schema.active_until) {
            if from > until {
                return Err(TemplateError::InvalidDateRange { from, until });
            }
        }

        let mut seen = HashSet::with_capacity(schema.fields.len());
        let mut fields = Vec::with_capacity(schema.fields.len());
        for (index, mut field) in schema.fields.into_iter().enumerate() {
            field.name = field.name.trim().to_string();
            if field.name.is_empty() {
                return Err(TemplateError::EmptyFieldName {
                    position: index + 1,
                });
            }
            if field.max_length == Some(0) {
                return Err(TemplateError::InvalidMaxLength(field.name));
            }
            if !seen.insert(field.name.clone()) {
                return Err(TemplateError::DuplicateFieldName(field.name));
            }
            fields.push(field);
        }

        Ok(Self {
            id: TemplateId::new(),
            name,
            description: schema.description.trim().to_string(),
            fields,
            active_from: schema.active_from,
            active_until: schema.active_until,
            created_at,
            updated_at: created_at,
        })
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}
