mod document_intake;
mod extraction_worker;
mod in_flight;
mod template_service;
mod workspace_service;

pub use document_intake::{DEFAULT_MAX_SIZE_BYTES, DocumentIntake, IncomingFile, IntakeError};
pub use extraction_worker::{ExtractionMessage, ExtractionWorker, into_result};
pub use in_flight::InFlightExtractions;
pub use template_service::{TemplateService, TemplateServiceError};
pub use workspace_service::{ExportedResult, WorkspaceService, WorkspaceServiceError};
