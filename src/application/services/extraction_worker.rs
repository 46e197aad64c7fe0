use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::application::ports::{
    EngineField, ExtractionEngine, ExtractionEngineError, ExtractionRequest,
    WorkspaceRepository, WorkspaceStoreError,
};
use crate::domain::{
    ExtractedField, ExtractionFailure, ExtractionResult, FieldDefinition, WorkspaceCommand,
    WorkspaceError, WorkspaceId,
};

use super::InFlightExtractions;

pub struct ExtractionMessage {
    pub workspace_id: WorkspaceId,
    pub run: u64,
    pub request: ExtractionRequest,
    pub cancel: CancellationToken,
}

pub struct ExtractionWorker {
    receiver: mpsc::Receiver<ExtractionMessage>,
    context: JobContext,
}

#[derive(Clone)]
struct JobContext {
    engine: Arc<dyn ExtractionEngine>,
    workspaces: Arc<dyn WorkspaceRepository>,
    in_flight: Arc<InFlightExtractions>,
    timeout: Duration,
}

impl ExtractionWorker {
    pub fn new(
        receiver: mpsc::Receiver<ExtractionMessage>,
        engine: Arc<dyn ExtractionEngine>,
        workspaces: Arc<dyn WorkspaceRepository>,
        in_flight: Arc<InFlightExtractions>,
        timeout: Duration,
    ) -> Self {
        Self {
            receiver,
            context: JobContext {
                engine,
                workspaces,
                in_flight,
                timeout,
            },
        }
    }

    pub async fn run(mut self) {
        tracing::info!("Extraction worker started");
        while let Some(msg) = self.receiver.recv().await {
            let span = tracing::info_span!(
                "extraction_job",
                workspace_id = %msg.workspace_id.as_uuid(),
                template_id = %msg.request.template_id.as_uuid(),
                document_id = %msg.request.document.id.as_uuid(),
                run = msg.run,
            );
            let context = self.context.clone();
            // Jobs for different workspaces run concurrently.
            tokio::spawn(async move { context.process(msg).await }.instrument(span));
        }
        tracing::info!("Extraction worker stopped: channel closed");
    }
}

impl JobContext {
    async fn process(&self, msg: ExtractionMessage) {
        let outcome = tokio::select! {
            biased;
            _ = msg.cancel.cancelled() => Err(ExtractionEngineError::Cancelled),
            res = tokio::time::timeout(
                self.timeout,
                self.engine.extract(&msg.request, msg.cancel.clone()),
            ) => res.unwrap_or(Err(ExtractionEngineError::Timeout)),
        };

        self.in_flight.finish(msg.workspace_id, msg.run).await;

        let command = match outcome {
            Ok(fields) => {
                let result = into_result(&msg.request.fields, fields);
                tracing::info!(fields = result.len(), "Extraction completed");
                WorkspaceCommand::CompleteExtraction {
                    run: msg.run,
                    result,
                }
            }
            Err(ExtractionEngineError::Cancelled) => {
                tracing::info!("Extraction cancelled");
                return;
            }
            Err(e) => {
                if e == ExtractionEngineError::Timeout {
                    msg.cancel.cancel();
                }
                tracing::error!(error = %e, retryable = e.is_retryable(), "Extraction failed");
                WorkspaceCommand::FailExtraction {
                    run: msg.run,
                    failure: ExtractionFailure {
                        message: e.to_string(),
                        retryable: e.is_retryable(),
                    },
                }
            }
        };

        match self.workspaces.apply(msg.workspace_id, command).await {
            Ok(_) => {}
            Err(WorkspaceStoreError::Transition(
                WorkspaceError::NotInFlight | WorkspaceError::StaleRun(_),
            )) => {
                tracing::debug!("Discarding outcome of a run that is no longer current");
            }
            Err(WorkspaceStoreError::NotFound(_)) => {
                tracing::debug!("Workspace closed before extraction finished");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to record extraction outcome");
            }
        }
    }
}

/// Orders engine output by the template's fields. Names the template does not
/// declare are dropped.
pub fn into_result(fields: &[FieldDefinition], engine_fields: Vec<EngineField>) -> ExtractionResult {
    for extra in engine_fields
        .iter()
        .filter(|e| !fields.iter().any(|f| f.name == e.name))
    {
        tracing::warn!(field = %extra.name, "Engine returned a field the template does not declare");
    }

    let extracted = fields.iter().filter_map(|definition| {
        engine_fields
            .iter()
            .find(|e| e.name == definition.name)
            .map(|e| ExtractedField::machine(&e.name, &e.value, e.confidence))
    });

    ExtractionResult::from_fields(extracted)
}
