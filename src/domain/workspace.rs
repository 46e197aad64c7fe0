use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{Document, ExtractionResult, ExtractionStatus, TemplateId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkspaceId(Uuid);

impl WorkspaceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for WorkspaceId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionFailure {
    pub message: String,
    pub retryable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkspaceCommand {
    StageDocument(Document),
    RemoveDocument,
    BeginExtraction,
    CompleteExtraction { run: u64, result: ExtractionResult },
    FailExtraction { run: u64, failure: ExtractionFailure },
    CancelExtraction,
    /// `field_order` is the template's field names; the result stays in that order.
    SetField {
        name: String,
        value: String,
        field_order: Vec<String>,
    },
    Reset,
}

impl WorkspaceCommand {
    pub fn name(&self) -> &'static str {
        match self {
            WorkspaceCommand::StageDocument(_) => "stage_document",
            WorkspaceCommand::RemoveDocument => "remove_document",
            WorkspaceCommand::BeginExtraction => "begin_extraction",
            WorkspaceCommand::CompleteExtraction { .. } => "complete_extraction",
            WorkspaceCommand::FailExtraction { .. } => "fail_extraction",
            WorkspaceCommand::CancelExtraction => "cancel_extraction",
            WorkspaceCommand::SetField { .. } => "set_field",
            WorkspaceCommand::Reset => "reset",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkspaceError {
    #[error("an extraction is already in flight")]
    ExtractionInFlight,
    #[error("no extraction is in flight")]
    NotInFlight,
    #[error("no document has been staged")]
    NoDocument,
    #[error("extraction run {0} is no longer current")]
    StaleRun(u64),
}

/// Extraction session for one template. Every change goes through [`Workspace::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub template_id: TemplateId,
    pub document: Option<Document>,
    pub result: ExtractionResult,
    pub status: ExtractionStatus,
    pub last_error: Option<ExtractionFailure>,
    /// Incremented by every accepted `BeginExtraction`.
    pub run: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Workspace {
    pub fn new(template_id: TemplateId) -> Self {
        let now = Utc::now();
        Self {
            id: WorkspaceId::new(),
            template_id,
            document: None,
            result: ExtractionResult::empty(),
            status: ExtractionStatus::Idle,
            last_error: None,
            run: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == ExtractionStatus::Pending
    }

    pub fn apply(&self, command: WorkspaceCommand) -> Result<Workspace, WorkspaceError> {
        let mut next = self.clone();

        match command {
            WorkspaceCommand::StageDocument(document) => {
                self.ensure_not_pending()?;
                next.document = Some(document);
            }
            WorkspaceCommand::RemoveDocument => {
                self.ensure_not_pending()?;
                next.document = None;
            }
            WorkspaceCommand::BeginExtraction => {
                self.ensure_not_pending()?;
                if self.document.is_none() {
                    return Err(WorkspaceError::NoDocument);
                }
                next.status = ExtractionStatus::Pending;
                next.last_error = None;
                next.run = self.run + 1;
            }
            WorkspaceCommand::CompleteExtraction { run, result } => {
                self.ensure_current_run(run)?;
                next.status = ExtractionStatus::Ready;
                next.result = result;
            }
            WorkspaceCommand::FailExtraction { run, failure } => {
                self.ensure_current_run(run)?;
                next.status = ExtractionStatus::Failed;
                next.last_error = Some(failure);
            }
            WorkspaceCommand::CancelExtraction => {
                self.ensure_pending()?;
                next.status = ExtractionStatus::Idle;
            }
            WorkspaceCommand::SetField {
                name,
                value,
                field_order,
            } => {
                self.ensure_not_pending()?;
                next.result = self.result.set_field(&name, value).arranged(&field_order);
            }
            WorkspaceCommand::Reset => {
                self.ensure_not_pending()?;
                next.result = self.result.reset();
                next.status = ExtractionStatus::Idle;
                next.last_error = None;
            }
        }

        next.updated_at = Utc::now();
        Ok(next)
    }

    fn ensure_not_pending(&self) -> Result<(), WorkspaceError> {
        if self.is_pending() {
            return Err(WorkspaceError::ExtractionInFlight);
        }
        Ok(())
    }

    fn ensure_pending(&self) -> Result<(), WorkspaceError> {
        if !self.is_pending() {
            return Err(WorkspaceError::NotInFlight);
        }
        Ok(())
    }

    fn ensure_current_run(&self, run: u64) -> Result<(), WorkspaceError> {
        self.ensure_pending()?;
        if run != self.run {
            return Err(WorkspaceError::StaleRun(run));
        }
        Ok(())
    }
}
