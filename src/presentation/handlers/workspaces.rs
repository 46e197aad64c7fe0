use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::domain::{TemplateId, WorkspaceId};
use crate::presentation::state::AppState;

use super::error::{ApiError, parse_id};
use super::upload::read_upload_form;
use super::views::WorkspaceView;

#[derive(Deserialize)]
pub struct OpenWorkspaceRequest {
    pub template_id: String,
}

#[derive(Deserialize)]
pub struct SetFieldRequest {
    pub value: String,
}

fn workspace_id(raw: &str) -> Result<WorkspaceId, ApiError> {
    parse_id(raw, "workspace").map(WorkspaceId::from_uuid)
}

#[tracing::instrument(skip(state, body))]
pub async fn open_workspace_handler(
    State(state): State<AppState>,
    body: Result<Json<OpenWorkspaceRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    let template_id = TemplateId::from_uuid(parse_id(&request.template_id, "template")?);
    let workspace = state.workspace_service.open(template_id).await?;
    Ok((StatusCode::CREATED, Json(WorkspaceView::from(&workspace))))
}

#[tracing::instrument(skip(state))]
pub async fn get_workspace_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let workspace = state.workspace_service.get(workspace_id(&id)?).await?;
    Ok(Json(WorkspaceView::from(&workspace)))
}

#[tracing::instrument(skip(state))]
pub async fn close_workspace_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.workspace_service.close(workspace_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Multipart form: `file` plus optional `channel` (`drag_and_drop` | `file_picker`).
#[tracing::instrument(skip(state, multipart))]
pub async fn upload_document_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let id = workspace_id(&id)?;
    let form = read_upload_form(multipart).await?;
    let file = form
        .file
        .ok_or_else(|| ApiError::bad_request("No file uploaded"))?;

    let workspace = state
        .workspace_service
        .stage_document(id, file, form.channel)
        .await?;
    Ok(Json(WorkspaceView::from(&workspace)))
}

#[tracing::instrument(skip(state))]
pub async fn remove_document_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let workspace = state
        .workspace_service
        .remove_document(workspace_id(&id)?)
        .await?;
    Ok(Json(WorkspaceView::from(&workspace)))
}

#[tracing::instrument(skip(state))]
pub async fn start_extraction_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let workspace = state
        .workspace_service
        .start_extraction(workspace_id(&id)?)
        .await?;
    Ok((StatusCode::ACCEPTED, Json(WorkspaceView::from(&workspace))))
}

#[tracing::instrument(skip(state))]
pub async fn cancel_extraction_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let workspace = state
        .workspace_service
        .cancel_extraction(workspace_id(&id)?)
        .await?;
    Ok(Json(WorkspaceView::from(&workspace)))
}

#[tracing::instrument(skip(state, body))]
pub async fn set_field_handler(
    State(state): State<AppState>,
    Path((id, name)): Path<(String, String)>,
    body: Result<Json<SetFieldRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    let workspace = state
        .workspace_service
        .set_field(workspace_id(&id)?, &name, request.value)
        .await?;
    Ok(Json(WorkspaceView::from(&workspace)))
}

#[tracing::instrument(skip(state))]
pub async fn reset_workspace_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let workspace = state.workspace_service.reset(workspace_id(&id)?).await?;
    Ok(Json(WorkspaceView::from(&workspace)))
}
