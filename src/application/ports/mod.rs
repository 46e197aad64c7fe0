mod extraction_engine;
mod repository_error;
mod result_exporter;
mod template_repository;
mod workspace_repository;

pub use extraction_engine::{
    EngineField, ExtractionEngine, ExtractionEngineError, ExtractionRequest,
};
pub use repository_error::RepositoryError;
pub use result_exporter::{ExportError, ExportFormat, ResultExporter};
pub use template_repository::TemplateRepository;
pub use workspace_repository::{WorkspaceRepository, WorkspaceStoreError};
