use std::collections::HashSet;
use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{
    EngineField, ExtractionEngine, ExtractionEngineError, ExtractionRequest,
};
use crate::domain::{Document, FieldDefinition, FieldType};

const KNOWN_CONFIDENCE: f32 = 0.97;
const TYPED_CONFIDENCE: f32 = 0.72;

static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[,;\n]|\band\b").unwrap());
static LEADING_ARTICLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^the\s+").unwrap());

/// Stand-in engine: waits, then answers with canned invoice values.
pub struct MockExtractionEngine {
    delay: Duration,
}

impl MockExtractionEngine {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for MockExtractionEngine {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

#[async_trait]
impl ExtractionEngine for MockExtractionEngine {
    #[tracing::instrument(
        skip(self, request, cancel),
        fields(
            template_id = %request.template_id.as_uuid(),
            document_id = %request.document.id.as_uuid(),
            delay_ms = self.delay.as_millis() as u64
        )
    )]
    async fn extract(
        &self,
        request: &ExtractionRequest,
        cancel: CancellationToken,
    ) -> Result<Vec<EngineField>, ExtractionEngineError> {
        tokio::select! {
            _ = cancel.cancelled() => return Err(ExtractionEngineError::Cancelled),
            _ = tokio::time::sleep(self.delay) => {}
        }

        Ok(request.fields.iter().map(sample_field).collect())
    }

    async fn suggest_fields(
        &self,
        prompt: &str,
        _sample: Option<&Document>,
    ) -> Result<Vec<FieldDefinition>, ExtractionEngineError> {
        Ok(fields_from_prompt(prompt))
    }
}

fn sample_field(definition: &FieldDefinition) -> EngineField {
    let (value, confidence) = match known_value(&definition.name) {
        Some(value) => (value.to_string(), KNOWN_CONFIDENCE),
        None => (typed_value(definition), TYPED_CONFIDENCE),
    };

    let value = match definition.max_length {
        Some(max) => value.chars().take(max as usize).collect(),
        None => value,
    };

    EngineField {
        name: definition.name.clone(),
        value,
        confidence,
    }
}

fn known_value(name: &str) -> Option<&'static str> {
    match name.to_lowercase().as_str() {
        "invoice number" => Some("INV-2024-001"),
        "total amount" => Some("$1,234.56"),
        "due date" => Some("2024-02-15"),
        "vendor name" => Some("Acme Corporation"),
        "tax amount" => Some("$123.45"),
        _ => None,
    }
}

fn typed_value(definition: &FieldDefinition) -> String {
    match definition.field_type {
        FieldType::String => definition
            .format_example
            .clone()
            .unwrap_or_else(|| format!("Sample {}", definition.name)),
        FieldType::Number => "42".to_string(),
        FieldType::Date => "2024-01-15".to_string(),
        FieldType::Email => "billing@example.com".to_string(),
        FieldType::Phone => "+1 555 0100".to_string(),
        FieldType::Currency => "$0.00".to_string(),
    }
}

/// Turns "Extract invoice number, vendor name, and total amount" into three
/// typed field definitions.
pub fn fields_from_prompt(prompt: &str) -> Vec<FieldDefinition> {
    let body = strip_leading_verb(prompt.trim());

    let mut seen = HashSet::new();
    SEPARATOR
        .split(body)
        .map(|part| LEADING_ARTICLE.replace(part.trim(), ""))
        .map(|part| part.trim_end_matches('.').trim().to_string())
        .filter(|part| !part.is_empty())
        .map(|part| title_case(&part))
        .filter(|name| seen.insert(name.to_lowercase()))
        .map(|name| {
            let field_type = infer_type(&name);
            FieldDefinition::new(name, field_type)
        })
        .collect()
}

fn strip_leading_verb(prompt: &str) -> &str {
    for verb in ["extract ", "find ", "get "] {
        if let Some(head) = prompt.get(..verb.len()) {
            if head.eq_ignore_ascii_case(verb) {
                return prompt[verb.len()..].trim_start();
            }
        }
    }
    prompt
}

fn title_case(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn infer_type(name: &str) -> FieldType {
    let lower = name.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));

    if has(&["amount", "total", "price", "cost", "tax"]) {
        FieldType::Currency
    } else if has(&["date", "expiry", "birth"]) {
        FieldType::Date
    } else if has(&["email", "e-mail"]) {
        FieldType::Email
    } else if has(&["phone", "mobile", "fax"]) {
        FieldType::Phone
    } else if has(&["count", "quantity", "qty"]) {
        FieldType::Number
    } else {
        FieldType::String
    }
}
