use axum::extract::Multipart;

use crate::application::services::IncomingFile;
use crate::domain::IntakeChannel;

use super::error::ApiError;

/// Parts of an upload form shared by every endpoint that accepts a file.
#[derive(Default)]
pub struct UploadForm {
    pub file: Option<IncomingFile>,
    pub channel: IntakeChannel,
    pub prompt: Option<String>,
}

/// Reads `file`, `channel` and `prompt` parts; unknown parts are skipped.
pub async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await? {
        let part = field.name().unwrap_or_default().to_string();
        match part.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("unknown").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await?;
                tracing::debug!(
                    filename = %filename,
                    content_type = %content_type,
                    bytes = bytes.len(),
                    "File part received"
                );
                form.file = Some(IncomingFile {
                    filename,
                    content_type,
                    bytes,
                });
            }
            "channel" => {
                let raw = field.text().await?;
                form.channel = IntakeChannel::parse(&raw)
                    .ok_or_else(|| ApiError::bad_request(format!("Unknown channel: {}", raw)))?;
            }
            "prompt" => form.prompt = Some(field.text().await?),
            other => tracing::debug!(part = %other, "Ignoring unknown multipart part"),
        }
    }

    Ok(form)
}
