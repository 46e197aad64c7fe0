mod document;
mod extraction_result;
mod extraction_status;
mod field_definition;
mod template;
mod template_draft;
mod workspace;

pub use document::{Document, DocumentId, ImageFormat, IntakeChannel};
pub use extraction_result::{ExtractedField, ExtractionResult, Provenance};
pub use extraction_status::ExtractionStatus;
pub use field_definition::{FieldDefinition, FieldType};
pub use template::{Template, TemplateError, TemplateId, TemplateSchema};
pub use template_draft::{DraftCommand, DraftField, DraftFieldId, FieldPatch, TemplateDraft};
pub use workspace::{
    ExtractionFailure, Workspace, WorkspaceCommand, WorkspaceError, WorkspaceId,
};
