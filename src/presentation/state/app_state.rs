use std::sync::Arc;

use crate::application::services::{TemplateService, WorkspaceService};

#[derive(Clone)]
pub struct AppState {
    pub template_service: Arc<TemplateService>,
    pub workspace_service: Arc<WorkspaceService>,
    /// Upper bound for a single uploaded file; the request body limit adds form overhead on top.
    pub max_upload_bytes: u64,
}
