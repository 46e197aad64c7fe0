use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use uuid::Uuid;

use crate::application::ports::{
    ExportError, ExportFormat, ExtractionRequest, RepositoryError, ResultExporter,
    TemplateRepository, WorkspaceRepository, WorkspaceStoreError,
};
use crate::domain::{
    ExtractionFailure, IntakeChannel, Template, TemplateId, Workspace, WorkspaceCommand,
    WorkspaceError, WorkspaceId,
};

use super::{DocumentIntake, ExtractionMessage, InFlightExtractions, IncomingFile, IntakeError};

/// Serialized export of one workspace's result.
#[derive(Debug, Clone)]
pub struct ExportedResult {
    pub format: ExportFormat,
    pub content_type: &'static str,
    pub filename: String,
    pub bytes: Vec<u8>,
}

pub struct WorkspaceService {
    templates: Arc<dyn TemplateRepository>,
    workspaces: Arc<dyn WorkspaceRepository>,
    exporters: Vec<Arc<dyn ResultExporter>>,
    intake: DocumentIntake,
    sender: mpsc::Sender<ExtractionMessage>,
    in_flight: Arc<InFlightExtractions>,
}

impl WorkspaceService {
    pub fn new(
        templates: Arc<dyn TemplateRepository>,
        workspaces: Arc<dyn WorkspaceRepository>,
        exporters: Vec<Arc<dyn ResultExporter>>,
        intake: DocumentIntake,
        sender: mpsc::Sender<ExtractionMessage>,
        in_flight: Arc<InFlightExtractions>,
    ) -> Self {
        Self {
            templates,
            workspaces,
            exporters,
            intake,
            sender,
            in_flight,
        }
    }

    #[tracing::instrument(skip(self), fields(template_id = %template_id.as_uuid()))]
    pub async fn open(&self, template_id: TemplateId) -> Result<Workspace, WorkspaceServiceError> {
        self.template(template_id).await?;

        let workspace = Workspace::new(template_id);
        self.workspaces.create(&workspace).await?;

        tracing::info!(workspace_id = %workspace.id.as_uuid(), "Workspace opened");
        Ok(workspace)
    }

    pub async fn get(&self, id: WorkspaceId) -> Result<Workspace, WorkspaceServiceError> {
        self.workspaces
            .get(id)
            .await?
            .ok_or(WorkspaceServiceError::NotFound(id.as_uuid()))
    }

    /// Discards the workspace, cancelling its extraction if one is running.
    #[tracing::instrument(skip(self), fields(workspace_id = %id.as_uuid()))]
    pub async fn close(&self, id: WorkspaceId) -> Result<(), WorkspaceServiceError> {
        self.in_flight.cancel(id).await;
        if !self.workspaces.delete(id).await? {
            return Err(WorkspaceServiceError::NotFound(id.as_uuid()));
        }
        tracing::info!("Workspace closed");
        Ok(())
    }

    #[tracing::instrument(skip(self, file), fields(workspace_id = %id.as_uuid(), channel = %channel))]
    pub async fn stage_document(
        &self,
        id: WorkspaceId,
        file: IncomingFile,
        channel: IntakeChannel,
    ) -> Result<Workspace, WorkspaceServiceError> {
        let document = self.intake.accept(file, channel)?;
        self.apply(id, WorkspaceCommand::StageDocument(document))
            .await
    }

    pub async fn remove_document(&self, id: WorkspaceId) -> Result<Workspace, WorkspaceServiceError> {
        self.apply(id, WorkspaceCommand::RemoveDocument).await
    }

    /// Marks the workspace pending and hands the job to the extraction worker.
    #[tracing::instrument(skip(self), fields(workspace_id = %id.as_uuid()))]
    pub async fn start_extraction(
        &self,
        id: WorkspaceId,
    ) -> Result<Workspace, WorkspaceServiceError> {
        let current = self.get(id).await?;
        let template = self.template(current.template_id).await?;

        let workspace = self.apply(id, WorkspaceCommand::BeginExtraction).await?;
        let document = workspace
            .document
            .clone()
            .ok_or(WorkspaceServiceError::Conflict(WorkspaceError::NoDocument))?;

        let cancel = self.in_flight.register(id, workspace.run).await;
        let msg = ExtractionMessage {
            workspace_id: id,
            run: workspace.run,
            request: ExtractionRequest {
                template_id: template.id,
                document,
                fields: template.fields,
            },
            cancel,
        };

        if let Err(e) = self.sender.try_send(msg) {
            let reason = match e {
                TrySendError::Full(_) => "extraction queue is full",
                TrySendError::Closed(_) => "extraction worker is not running",
            };
            tracing::error!(reason, "Failed to enqueue extraction");

            self.in_flight.finish(id, workspace.run).await;
            self.apply(
                id,
                WorkspaceCommand::FailExtraction {
                    run: workspace.run,
                    failure: ExtractionFailure {
                        message: reason.to_string(),
                        retryable: true,
                    },
                },
            )
            .await?;
            return Err(WorkspaceServiceError::QueueUnavailable);
        }

        tracing::info!(run = workspace.run, "Extraction enqueued");
        Ok(workspace)
    }

    #[tracing::instrument(skip(self), fields(workspace_id = %id.as_uuid()))]
    pub async fn cancel_extraction(
        &self,
        id: WorkspaceId,
    ) -> Result<Workspace, WorkspaceServiceError> {
        let workspace = self.apply(id, WorkspaceCommand::CancelExtraction).await?;
        self.in_flight.cancel(id).await;
        tracing::info!("Extraction cancelled");
        Ok(workspace)
    }

    /// Human correction of a single field.
    #[tracing::instrument(skip(self, value), fields(workspace_id = %id.as_uuid()))]
    pub async fn set_field(
        &self,
        id: WorkspaceId,
        name: &str,
        value: String,
    ) -> Result<Workspace, WorkspaceServiceError> {
        let workspace = self.get(id).await?;
        let template = self.template(workspace.template_id).await?;

        let definition = template
            .field(name)
            .ok_or_else(|| WorkspaceServiceError::UnknownField(name.to_string()))?;

        if let Some(max) = definition.max_length {
            if value.chars().count() > max as usize {
                return Err(WorkspaceServiceError::ValueTooLong {
                    name: name.to_string(),
                    max,
                });
            }
        }

        self.apply(
            id,
            WorkspaceCommand::SetField {
                name: name.to_string(),
                value,
                field_order: template.field_names().map(str::to_string).collect(),
            },
        )
        .await
    }

    pub async fn reset(&self, id: WorkspaceId) -> Result<Workspace, WorkspaceServiceError> {
        self.apply(id, WorkspaceCommand::Reset).await
    }

    #[tracing::instrument(skip(self), fields(workspace_id = %id.as_uuid(), format = %format))]
    pub async fn export(
        &self,
        id: WorkspaceId,
        format: ExportFormat,
    ) -> Result<ExportedResult, WorkspaceServiceError> {
        let workspace = self.get(id).await?;
        let template = self.template(workspace.template_id).await?;

        let exporter = self
            .exporters
            .iter()
            .find(|e| e.format() == format)
            .ok_or_else(|| ExportError::UnsupportedFormat(format.to_string()))?;

        let bytes = exporter.export(&template, &workspace.result)?;

        Ok(ExportedResult {
            format,
            content_type: exporter.content_type(),
            filename: format!("{}.{}", slug(&template.name), format.as_str()),
            bytes,
        })
    }

    async fn template(&self, id: TemplateId) -> Result<Template, WorkspaceServiceError> {
        self.templates
            .get(id)
            .await?
            .ok_or(WorkspaceServiceError::TemplateNotFound(id.as_uuid()))
    }

    async fn apply(
        &self,
        id: WorkspaceId,
        command: WorkspaceCommand,
    ) -> Result<Workspace, WorkspaceServiceError> {
        let name = command.name();
        let workspace = self.workspaces.apply(id, command).await?;
        tracing::debug!(
            command = name,
            status = %workspace.status,
            "Workspace transition"
        );
        Ok(workspace)
    }
}

fn slug(name: &str) -> String {
    let slug: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    let trimmed = slug
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if trimmed.is_empty() {
        "extraction".to_string()
    } else {
        trimmed
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WorkspaceServiceError {
    #[error("workspace not found: {0}")]
    NotFound(Uuid),
    #[error("template not found: {0}")]
    TemplateNotFound(Uuid),
    #[error("template has no field named {0}")]
    UnknownField(String),
    #[error("value for {name} exceeds {max} characters")]
    ValueTooLong { name: String, max: u32 },
    #[error("document rejected: {0}")]
    Intake(#[from] IntakeError),
    #[error("{0}")]
    Conflict(WorkspaceError),
    #[error("extraction queue unavailable")]
    QueueUnavailable,
    #[error("export: {0}")]
    Export(#[from] ExportError),
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<WorkspaceStoreError> for WorkspaceServiceError {
    fn from(e: WorkspaceStoreError) -> Self {
        match e {
            WorkspaceStoreError::NotFound(id) => WorkspaceServiceError::NotFound(id),
            WorkspaceStoreError::Transition(e) => WorkspaceServiceError::Conflict(e),
            WorkspaceStoreError::Repository(e) => WorkspaceServiceError::Repository(e),
        }
    }
}
