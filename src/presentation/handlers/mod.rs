mod error;
mod export;
mod health;
mod templates;
mod upload;
mod views;
mod workspaces;

pub use error::{ApiError, ErrorResponse};
pub use export::export_handler;
pub use health::health_handler;
pub use templates::{
    create_template_handler, get_template_handler, list_templates_handler,
    suggest_template_handler,
};
pub use views::{DocumentView, FailureView, FieldValueView, WorkspaceView};
pub use workspaces::{
    cancel_extraction_handler, close_workspace_handler, get_workspace_handler,
    open_workspace_handler, remove_document_handler, reset_workspace_handler,
    set_field_handler, start_extraction_handler, upload_document_handler,
};
