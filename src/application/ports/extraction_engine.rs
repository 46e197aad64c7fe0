use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::{Document, FieldDefinition, TemplateId};

/// Everything the engine needs to run one template against one document.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    pub template_id: TemplateId,
    pub document: Document,
    pub fields: Vec<FieldDefinition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineField {
    pub name: String,
    pub value: String,
    pub confidence: f32,
}

#[async_trait]
pub trait ExtractionEngine: Send + Sync {
    async fn extract(
        &self,
        request: &ExtractionRequest,
        cancel: CancellationToken,
    ) -> Result<Vec<EngineField>, ExtractionEngineError>;

    async fn suggest_fields(
        &self,
        prompt: &str,
        sample: Option<&Document>,
    ) -> Result<Vec<FieldDefinition>, ExtractionEngineError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionEngineError {
    #[error("invalid document format: {0}")]
    InvalidFormat(String),
    #[error("document too large")]
    TooLarge,
    #[error("extraction engine unavailable: {0}")]
    EngineUnavailable(String),
    #[error("extraction timed out")]
    Timeout,
    #[error("extraction cancelled")]
    Cancelled,
    #[error("invalid engine response: {0}")]
    InvalidResponse(String),
}

impl ExtractionEngineError {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ExtractionEngineError::EngineUnavailable(_) | ExtractionEngineError::Timeout
        )
    }
}
