mod csv_exporter;
mod json_exporter;

use std::sync::Arc;

use crate::application::ports::ResultExporter;

pub use csv_exporter::CsvExporter;
pub use json_exporter::JsonExporter;

/// Every exporter the service ships with.
pub fn default_exporters() -> Vec<Arc<dyn ResultExporter>> {
    vec![Arc::new(JsonExporter), Arc::new(CsvExporter)]
}
