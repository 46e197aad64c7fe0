use chrono::NaiveDate;

use super::{FieldDefinition, FieldType, TemplateSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DraftFieldId(u64);

impl DraftFieldId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// One row of the create-template form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftField {
    pub id: DraftFieldId,
    pub name: String,
    pub field_type: FieldType,
    pub description: String,
    pub max_length: Option<u32>,
    pub format_example: Option<String>,
}

impl DraftField {
    fn empty(id: DraftFieldId) -> Self {
        Self {
            id,
            name: String::new(),
            field_type: FieldType::String,
            description: String::new(),
            max_length: None,
            format_example: None,
        }
    }
}

/// Partial update for a single draft field. `None` leaves the value as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPatch {
    pub name: Option<String>,
    pub field_type: Option<FieldType>,
    pub description: Option<String>,
    pub max_length: Option<Option<u32>>,
    pub format_example: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftCommand {
    SetName(String),
    SetDescription(String),
    SetActiveFrom(Option<NaiveDate>),
    SetActiveUntil(Option<NaiveDate>),
    AddField,
    RemoveField(DraftFieldId),
    UpdateField(DraftFieldId, FieldPatch),
}

/// State of the create-template form, advanced only through [`TemplateDraft::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDraft {
    pub name: String,
    pub description: String,
    pub active_from: Option<NaiveDate>,
    pub active_until: Option<NaiveDate>,
    fields: Vec<DraftField>,
    next_field_id: u64,
}

impl Default for TemplateDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateDraft {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            active_from: None,
            active_until: None,
            fields: vec![DraftField::empty(DraftFieldId(1))],
            next_field_id: 2,
        }
    }

    pub fn fields(&self) -> &[DraftField] {
        &self.fields
    }

    pub fn apply(mut self, command: DraftCommand) -> Self {
        match command {
            DraftCommand::SetName(name) => self.name = name,
            DraftCommand::SetDescription(description) => self.description = description,
            DraftCommand::SetActiveFrom(date) => self.active_from = date,
            DraftCommand::SetActiveUntil(date) => self.active_until = date,
            DraftCommand::AddField => {
                let id = DraftFieldId(self.next_field_id);
                self.next_field_id += 1;
                self.fields.push(DraftField::empty(id));
            }
            DraftCommand::RemoveField(id) => {
                // The form always keeps at least one row.
                if self.fields.len() > 1 {
                    self.fields.retain(|f| f.id != id);
                }
            }
            DraftCommand::UpdateField(id, patch) => {
                if let Some(field) = self.fields.iter_mut().find(|f| f.id == id) {
                    if let Some(name) = patch.name {
                        field.name = name;
                    }
                    if let Some(field_type) = patch.field_type {
                        field.field_type = field_type;
                    }
                    if let Some(description) = patch.description {
                        field.description = description;
                    }
                    if let Some(max_length) = patch.max_length {
                        field.max_length = max_length;
                    }
                    if let Some(format_example) = patch.format_example {
                        field.format_example = format_example;
                    }
                }
            }
        }
        self
    }

    /// Keeps the rows with a non-blank name, in entered order.
    pub fn into_schema(self) -> TemplateSchema {
        let fields = self
            .fields
            .into_iter()
            .filter(|f| !f.name.trim().is_empty())
            .map(|f| FieldDefinition {
                name: f.name,
                field_type: f.field_type,
                description: Some(f.description).filter(|d| !d.trim().is_empty()),
                max_length: f.max_length,
                format_example: f.format_example.filter(|e| !e.trim().is_empty()),
            })
            .collect();

        TemplateSchema {
            name: self.name,
            description: self.description,
            fields,
            active_from: self.active_from,
            active_until: self.active_until,
        }
    }
}
