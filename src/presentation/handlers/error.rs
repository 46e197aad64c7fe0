use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use uuid::Uuid;

use crate::application::ports::{ExportError, ExtractionEngineError};
use crate::application::services::{IntakeError, TemplateServiceError, WorkspaceServiceError};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub retryable: bool,
}

/// Error surfaced to API clients. `retryable` tells the client to offer a retry.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub retryable: bool,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    fn retryable(mut self) -> Self {
        self.retryable = true;
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = %self.message, "Request failed");
        } else {
            tracing::warn!(status = %self.status, error = %self.message, "Request rejected");
        }

        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
                retryable: self.retryable,
            }),
        )
            .into_response()
    }
}

pub fn parse_id(raw: &str, kind: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("Invalid {} ID: {}", kind, raw)))
}

impl From<IntakeError> for ApiError {
    fn from(e: IntakeError) -> Self {
        let status = match e {
            IntakeError::InvalidFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            IntakeError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            IntakeError::Empty => StatusCode::UNPROCESSABLE_ENTITY,
        };
        ApiError::new(status, e.to_string())
    }
}

impl From<ExtractionEngineError> for ApiError {
    fn from(e: ExtractionEngineError) -> Self {
        let message = e.to_string();
        match e {
            ExtractionEngineError::InvalidFormat(_) => {
                ApiError::new(StatusCode::UNSUPPORTED_MEDIA_TYPE, message)
            }
            ExtractionEngineError::TooLarge => ApiError::new(StatusCode::PAYLOAD_TOO_LARGE, message),
            ExtractionEngineError::EngineUnavailable(_) => {
                ApiError::new(StatusCode::SERVICE_UNAVAILABLE, message).retryable()
            }
            ExtractionEngineError::Timeout => {
                ApiError::new(StatusCode::GATEWAY_TIMEOUT, message).retryable()
            }
            ExtractionEngineError::Cancelled => ApiError::new(StatusCode::CONFLICT, message),
            ExtractionEngineError::InvalidResponse(_) => ApiError::new(StatusCode::BAD_GATEWAY, message),
        }
    }
}

impl From<TemplateServiceError> for ApiError {
    fn from(e: TemplateServiceError) -> Self {
        match e {
            TemplateServiceError::Validation(_) | TemplateServiceError::EmptyPrompt => {
                ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
            }
            TemplateServiceError::NotFound(_) => ApiError::new(StatusCode::NOT_FOUND, e.to_string()),
            TemplateServiceError::Intake(inner) => inner.into(),
            TemplateServiceError::Engine(inner) => inner.into(),
            TemplateServiceError::Repository(_) => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        }
    }
}

impl From<WorkspaceServiceError> for ApiError {
    fn from(e: WorkspaceServiceError) -> Self {
        let message = e.to_string();
        match e {
            WorkspaceServiceError::NotFound(_) | WorkspaceServiceError::TemplateNotFound(_) => {
                ApiError::new(StatusCode::NOT_FOUND, message)
            }
            WorkspaceServiceError::UnknownField(_) | WorkspaceServiceError::ValueTooLong { .. } => {
                ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, message)
            }
            WorkspaceServiceError::Intake(inner) => inner.into(),
            WorkspaceServiceError::Conflict(_) => ApiError::new(StatusCode::CONFLICT, message),
            WorkspaceServiceError::QueueUnavailable => {
                ApiError::new(StatusCode::SERVICE_UNAVAILABLE, message).retryable()
            }
            WorkspaceServiceError::Export(ExportError::UnsupportedFormat(_)) => {
                ApiError::bad_request(message)
            }
            WorkspaceServiceError::Export(ExportError::NothingToExport) => {
                ApiError::new(StatusCode::CONFLICT, message)
            }
            WorkspaceServiceError::Export(ExportError::Serialization(_))
            | WorkspaceServiceError::Repository(_) => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        ApiError::new(e.status(), format!("Failed to read multipart: {}", e.body_text()))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        match e {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                ApiError::bad_request(format!("Invalid request body: {}", e.body_text()))
            }
            _ => ApiError::new(e.status(), e.body_text()),
        }
    }
}
