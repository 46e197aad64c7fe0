use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{
    Document, ExtractedField, ExtractionFailure, ExtractionStatus, IntakeChannel, Workspace,
};

#[derive(Serialize)]
pub struct WorkspaceView {
    pub id: Uuid,
    pub template_id: Uuid,
    pub status: ExtractionStatus,
    pub run: u64,
    pub document: Option<DocumentView>,
    pub fields: Vec<FieldValueView>,
    pub last_error: Option<FailureView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct DocumentView {
    pub id: Uuid,
    pub filename: String,
    pub mime_type: &'static str,
    pub size_bytes: u64,
    pub received_via: IntakeChannel,
}

#[derive(Serialize)]
pub struct FieldValueView {
    pub name: String,
    pub value: String,
    pub confidence: Option<f32>,
    pub edited_by_human: bool,
}

#[derive(Serialize)]
pub struct FailureView {
    pub message: String,
    pub retryable: bool,
}

impl From<&Document> for DocumentView {
    fn from(document: &Document) -> Self {
        Self {
            id: document.id.as_uuid(),
            filename: document.filename.clone(),
            mime_type: document.format.as_mime(),
            size_bytes: document.size_bytes(),
            received_via: document.received_via,
        }
    }
}

impl From<&ExtractedField> for FieldValueView {
    fn from(field: &ExtractedField) -> Self {
        Self {
            name: field.name.clone(),
            value: field.value.clone(),
            confidence: field.confidence,
            edited_by_human: field.edited_by_human(),
        }
    }
}

impl From<&ExtractionFailure> for FailureView {
    fn from(failure: &ExtractionFailure) -> Self {
        Self {
            message: failure.message.clone(),
            retryable: failure.retryable,
        }
    }
}

impl From<&Workspace> for WorkspaceView {
    fn from(workspace: &Workspace) -> Self {
        Self {
            id: workspace.id.as_uuid(),
            template_id: workspace.template_id.as_uuid(),
            status: workspace.status,
            run: workspace.run,
            document: workspace.document.as_ref().map(DocumentView::from),
            fields: workspace.result.iter().map(FieldValueView::from).collect(),
            last_error: workspace.last_error.as_ref().map(FailureView::from),
            created_at: workspace.created_at,
            updated_at: workspace.updated_at,
        }
    }
}
