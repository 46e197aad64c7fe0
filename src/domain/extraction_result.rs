use std::sync::Arc;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Machine,
    Human,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedField {
    pub name: String,
    pub value: String,
    pub confidence: Option<f32>,
    pub provenance: Provenance,
}

impl ExtractedField {
    pub fn machine(name: impl Into<String>, value: impl Into<String>, confidence: f32) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            confidence: Some(confidence.clamp(0.0, 1.0)),
            provenance: Provenance::Machine,
        }
    }

    pub fn edited_by_human(&self) -> bool {
        self.provenance == Provenance::Human
    }
}

/// Per-document field values. Edits produce a new result that shares every
/// untouched entry with the previous one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionResult {
    fields: Vec<Arc<ExtractedField>>,
}

impl ExtractionResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_fields(fields: impl IntoIterator<Item = ExtractedField>) -> Self {
        Self {
            fields: fields.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, name: &str) -> Option<&ExtractedField> {
        self.fields.iter().find(|f| f.name == name).map(Arc::as_ref)
    }

    pub fn entry(&self, name: &str) -> Option<&Arc<ExtractedField>> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExtractedField> {
        self.fields.iter().map(Arc::as_ref)
    }

    /// Returns a copy with `name` set to `value` and marked as human-edited.
    /// An unknown name is appended.
    pub fn set_field(&self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        let mut fields = self.fields.clone();

        match fields.iter().position(|f| f.name == name) {
            Some(index) => {
                let previous = &fields[index];
                fields[index] = Arc::new(ExtractedField {
                    name: previous.name.clone(),
                    value,
                    confidence: previous.confidence,
                    provenance: Provenance::Human,
                });
            }
            None => fields.push(Arc::new(ExtractedField {
                name: name.to_string(),
                value,
                confidence: None,
                provenance: Provenance::Human,
            })),
        }

        Self { fields }
    }

    /// Returns a copy with entries ordered by `names`. Entries not named keep
    /// their relative order after the named ones.
    pub fn arranged<S: AsRef<str>>(&self, names: &[S]) -> Self {
        let rank = |name: &str| {
            names
                .iter()
                .position(|n| n.as_ref() == name)
                .unwrap_or(usize::MAX)
        };
        let mut fields = self.fields.clone();
        fields.sort_by_key(|f| rank(&f.name));
        Self { fields }
    }

    pub fn reset(&self) -> Self {
        Self::empty()
    }
}
