use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::application::ports::ExportFormat;
use crate::domain::WorkspaceId;
use crate::presentation::state::AppState;

use super::error::{ApiError, parse_id};

#[derive(Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>,
}

#[tracing::instrument(skip(state, query))]
pub async fn export_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let id = WorkspaceId::from_uuid(parse_id(&id, "workspace")?);
    let format = query
        .format
        .as_deref()
        .unwrap_or("json")
        .parse::<ExportFormat>()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let exported = state.workspace_service.export(id, format).await?;

    Ok((
        [
            (header::CONTENT_TYPE, exported.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", exported.filename),
            ),
        ],
        exported.bytes,
    ))
}
