use std::collections::HashSet;
use std::sync::Arc;

use crate::application::ports::{
    ExtractionEngine, ExtractionEngineError, RepositoryError, TemplateRepository,
};
use crate::domain::{
    FieldDefinition, IntakeChannel, Template, TemplateDraft, TemplateError, TemplateId,
    TemplateSchema,
};

use super::{DocumentIntake, IncomingFile, IntakeError};

pub struct TemplateService {
    repository: Arc<dyn TemplateRepository>,
    engine: Arc<dyn ExtractionEngine>,
    intake: DocumentIntake,
}

impl TemplateService {
    pub fn new(
        repository: Arc<dyn TemplateRepository>,
        engine: Arc<dyn ExtractionEngine>,
        intake: DocumentIntake,
    ) -> Self {
        Self {
            repository,
            engine,
            intake,
        }
    }

    #[tracing::instrument(skip(self, schema), fields(name = %schema.name, fields = schema.fields.len()))]
    pub async fn create(&self, schema: TemplateSchema) -> Result<Template, TemplateServiceError> {
        let template = Template::new(schema)?;
        self.repository.create(&template).await?;

        tracing::info!(template_id = %template.id.as_uuid(), "Template created");
        Ok(template)
    }

    pub async fn create_from_draft(
        &self,
        draft: TemplateDraft,
    ) -> Result<Template, TemplateServiceError> {
        self.create(draft.into_schema()).await
    }

    pub async fn list(&self) -> Result<Vec<Template>, TemplateServiceError> {
        Ok(self.repository.list().await?)
    }

    pub async fn get(&self, id: TemplateId) -> Result<Template, TemplateServiceError> {
        self.repository
            .get(id)
            .await?
            .ok_or(TemplateServiceError::NotFound(id))
    }

    /// Proposes fields for a new template from a free-text prompt and an
    /// optional sample image. Nothing is persisted.
    #[tracing::instrument(skip(self, prompt, sample), fields(has_sample = sample.is_some()))]
    pub async fn suggest(
        &self,
        prompt: &str,
        sample: Option<(IncomingFile, IntakeChannel)>,
    ) -> Result<Vec<FieldDefinition>, TemplateServiceError> {
        if prompt.trim().is_empty() {
            return Err(TemplateServiceError::EmptyPrompt);
        }

        let document = sample
            .map(|(file, channel)| self.intake.accept(file, channel))
            .transpose()?;

        let proposed = self
            .engine
            .suggest_fields(prompt.trim(), document.as_ref())
            .await?;

        let mut seen = HashSet::new();
        let fields: Vec<FieldDefinition> = proposed
            .into_iter()
            .filter(|f| !f.name.trim().is_empty())
            .filter(|f| seen.insert(f.name.trim().to_string()))
            .collect();

        tracing::debug!(fields = fields.len(), "Template fields suggested");
        Ok(fields)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TemplateServiceError {
    #[error("invalid template: {0}")]
    Validation(#[from] TemplateError),
    #[error("template not found: {}", .0.as_uuid())]
    NotFound(TemplateId),
    #[error("prompt must not be empty")]
    EmptyPrompt,
    #[error("sample document rejected: {0}")]
    Intake(#[from] IntakeError),
    #[error("engine: {0}")]
    Engine(#[from] ExtractionEngineError),
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
}
