use crate::application::ports::{ExportError, ExportFormat, ResultExporter};
use crate::domain::{ExtractionResult, Template};

const HEADER: [&str; 4] = ["field", "value", "confidence", "edited_by_human"];

#[derive(Debug, Default, Clone, Copy)]
pub struct CsvExporter;

impl ResultExporter for CsvExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn content_type(&self) -> &'static str {
        "text/csv"
    }

    fn export(
        &self,
        template: &Template,
        result: &ExtractionResult,
    ) -> Result<Vec<u8>, ExportError> {
        // Rows follow the template, not the order values were entered.
        let rows: Vec<_> = template
            .field_names()
            .filter_map(|name| result.get(name))
            .collect();
        if rows.is_empty() {
            return Err(ExportError::NothingToExport);
        }

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(HEADER)
            .map_err(|e| ExportError::Serialization(e.to_string()))?;

        for field in rows {
            let confidence = field
                .confidence
                .map(|c| format!("{c:.2}"))
                .unwrap_or_default();
            let edited = if field.edited_by_human() { "true" } else { "false" };
            writer
                .write_record([
                    field.name.as_str(),
                    field.value.as_str(),
                    confidence.as_str(),
                    edited,
                ])
                .map_err(|e| ExportError::Serialization(e.to_string()))?;
        }

        writer
            .into_inner()
            .map_err(|e| ExportError::Serialization(e.to_string()))
    }
}
