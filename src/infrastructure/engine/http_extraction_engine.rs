use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::application::ports::{
    EngineField, ExtractionEngine, ExtractionEngineError, ExtractionRequest,
};
use crate::domain::{Document, FieldDefinition, FieldType};

/// Client for a remote extraction engine speaking JSON over HTTP.
pub struct HttpExtractionEngine {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpExtractionEngine {
    pub fn new(base_url: &str, api_key: Option<&str>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(str::to_string),
        }
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ExtractionEngineError>
    where
        B: Serialize + ?Sized,
        R: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.post(&url).json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(error_for_status(status, &text));
        }

        let raw = response.bytes().await.map_err(map_transport_error)?;
        serde_json::from_slice(&raw).map_err(|e| {
            tracing::error!(
                url = %url,
                raw_response = %String::from_utf8_lossy(&raw),
                "Failed to parse engine JSON"
            );
            ExtractionEngineError::InvalidResponse(e.to_string())
        })
    }
}

#[async_trait]
impl ExtractionEngine for HttpExtractionEngine {
    #[tracing::instrument(
        skip(self, request, cancel),
        fields(
            template_id = %request.template_id.as_uuid(),
            document_id = %request.document.id.as_uuid(),
            bytes = request.document.size_bytes()
        )
    )]
    async fn extract(
        &self,
        request: &ExtractionRequest,
        cancel: CancellationToken,
    ) -> Result<Vec<EngineField>, ExtractionEngineError> {
        let body = ExtractWireRequest::from_request(request);

        let response: ExtractWireResponse = tokio::select! {
            _ = cancel.cancelled() => return Err(ExtractionEngineError::Cancelled),
            res = self.post::<_, ExtractWireResponse>("/v1/extract", &body) => res?,
        };

        if let Some(error) = response.error {
            return Err(map_wire_error(&error));
        }

        Ok(response
            .fields
            .into_iter()
            .map(|f| EngineField {
                name: f.name,
                value: f.value,
                confidence: f.confidence.clamp(0.0, 1.0),
            })
            .collect())
    }

    async fn suggest_fields(
        &self,
        prompt: &str,
        sample: Option<&Document>,
    ) -> Result<Vec<FieldDefinition>, ExtractionEngineError> {
        let body = SuggestWireRequest {
            prompt,
            document_bytes: sample.map(|d| general_purpose::STANDARD.encode(&d.bytes)),
            mime_type: sample.map(|d| d.format.as_mime()),
        };

        let response: SuggestWireResponse = self.post("/v1/suggest", &body).await?;
        if let Some(error) = response.error {
            return Err(map_wire_error(&error));
        }

        Ok(response
            .fields
            .into_iter()
            .map(WireSuggestedField::into_definition)
            .collect())
    }
}

fn map_transport_error(e: reqwest::Error) -> ExtractionEngineError {
    if e.is_timeout() {
        ExtractionEngineError::Timeout
    } else {
        ExtractionEngineError::EngineUnavailable(e.to_string())
    }
}

pub fn error_for_status(status: StatusCode, body: &str) -> ExtractionEngineError {
    match status {
        StatusCode::PAYLOAD_TOO_LARGE => ExtractionEngineError::TooLarge,
        StatusCode::UNSUPPORTED_MEDIA_TYPE => ExtractionEngineError::InvalidFormat(body.to_string()),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ExtractionEngineError::Timeout,
        s if s.is_server_error() || s == StatusCode::TOO_MANY_REQUESTS => {
            ExtractionEngineError::EngineUnavailable(format!("engine returned {s}: {body}"))
        }
        s => ExtractionEngineError::InvalidResponse(format!("engine returned {s}: {body}")),
    }
}

pub fn map_wire_error(error: &WireError) -> ExtractionEngineError {
    match error.code.as_str() {
        "InvalidFormat" => ExtractionEngineError::InvalidFormat(error.message.clone()),
        "TooLarge" => ExtractionEngineError::TooLarge,
        "Timeout" => ExtractionEngineError::Timeout,
        _ => ExtractionEngineError::EngineUnavailable(if error.message.is_empty() {
            error.code.clone()
        } else {
            format!("{}: {}", error.code, error.message)
        }),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractWireRequest<'a> {
    pub template_id: Uuid,
    pub document_bytes: String,
    pub mime_type: &'static str,
    pub fields: Vec<WireFieldSpec<'a>>,
}

impl<'a> ExtractWireRequest<'a> {
    pub fn from_request(request: &'a ExtractionRequest) -> Self {
        Self {
            template_id: request.template_id.as_uuid(),
            document_bytes: general_purpose::STANDARD.encode(&request.document.bytes),
            mime_type: request.document.format.as_mime(),
            fields: request
                .fields
                .iter()
                .map(|f| WireFieldSpec {
                    name: &f.name,
                    field_type: f.field_type.as_str(),
                    description: f.description.as_deref(),
                    max_length: f.max_length,
                    format_example: f.format_example.as_deref(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireFieldSpec<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub field_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_example: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct ExtractWireResponse {
    #[serde(default)]
    pub fields: Vec<WireFieldValue>,
    #[serde(default)]
    pub error: Option<WireError>,
}

#[derive(Debug, Deserialize)]
pub struct WireFieldValue {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub confidence: f32,
}

#[derive(Debug, Deserialize)]
pub struct WireError {
    pub code: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SuggestWireRequest<'a> {
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    document_bytes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mime_type: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestWireResponse {
    #[serde(default)]
    pub fields: Vec<WireSuggestedField>,
    #[serde(default)]
    pub error: Option<WireError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSuggestedField {
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub max_length: Option<u32>,
    #[serde(default)]
    pub format_example: Option<String>,
}

impl WireSuggestedField {
    pub fn into_definition(self) -> FieldDefinition {
        let field_type = self
            .field_type
            .as_deref()
            .and_then(|t| t.parse::<FieldType>().ok())
            .unwrap_or_default();
        FieldDefinition {
            name: self.name,
            field_type,
            description: self.description,
            max_length: self.max_length,
            format_example: self.format_example,
        }
    }
}
