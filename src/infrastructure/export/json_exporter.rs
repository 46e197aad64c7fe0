use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::application::ports::{ExportError, ExportFormat, ResultExporter};
use crate::domain::{ExtractionResult, Template};

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonExporter;

#[derive(Serialize)]
struct ExportDocument<'a> {
    template_id: Uuid,
    template_name: &'a str,
    exported_at: DateTime<Utc>,
    fields: Vec<ExportField<'a>>,
}

#[derive(Serialize)]
struct ExportField<'a> {
    name: &'a str,
    value: &'a str,
    confidence: Option<f32>,
    edited_by_human: bool,
}

impl ResultExporter for JsonExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn export(
        &self,
        template: &Template,
        result: &ExtractionResult,
    ) -> Result<Vec<u8>, ExportError> {
        let fields: Vec<_> = template
            .field_names()
            .filter_map(|name| result.get(name))
            .map(|f| ExportField {
                name: &f.name,
                value: &f.value,
                confidence: f.confidence,
                edited_by_human: f.edited_by_human(),
            })
            .collect();
        if fields.is_empty() {
            return Err(ExportError::NothingToExport);
        }

        let document = ExportDocument {
            template_id: template.id.as_uuid(),
            template_name: &template.name,
            exported_at: Utc::now(),
            fields,
        };

        serde_json::to_vec_pretty(&document).map_err(|e| ExportError::Serialization(e.to_string()))
    }
}
