use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::domain::{FieldDefinition, Template, TemplateId, TemplateSchema};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::error::{ApiError, parse_id};
use super::upload::read_upload_form;

#[derive(Serialize)]
pub struct TemplateListResponse {
    pub templates: Vec<Template>,
}

#[derive(Serialize)]
pub struct SuggestionResponse {
    pub fields: Vec<FieldDefinition>,
}

#[tracing::instrument(skip(state))]
pub async fn list_templates_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let templates = state.template_service.list().await?;
    Ok(Json(TemplateListResponse { templates }))
}

#[tracing::instrument(skip(state, body))]
pub async fn create_template_handler(
    State(state): State<AppState>,
    body: Result<Json<TemplateSchema>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(schema) = body?;
    let template = state.template_service.create(schema).await?;
    Ok((StatusCode::CREATED, Json(template)))
}

#[tracing::instrument(skip(state))]
pub async fn get_template_handler(
    State(state): State<AppState>,
    Path(template_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = TemplateId::from_uuid(parse_id(&template_id, "template")?);
    let template = state.template_service.get(id).await?;
    Ok(Json(template))
}

/// Multipart form: `prompt` (required) and an optional sample `file`.
#[tracing::instrument(skip(state, multipart))]
pub async fn suggest_template_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = read_upload_form(multipart).await?;
    let prompt = form.prompt.unwrap_or_default();

    tracing::debug!(prompt = %sanitize_prompt(&prompt), "Suggesting template fields");

    let sample = form.file.map(|file| (file, form.channel));
    let fields = state.template_service.suggest(&prompt, sample).await?;
    Ok(Json(SuggestionResponse { fields }))
}
