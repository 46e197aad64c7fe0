use std::collections::HashMap;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::domain::WorkspaceId;

/// Cancellation tokens of the extractions currently running, one per workspace.
#[derive(Default)]
pub struct InFlightExtractions {
    tokens: Mutex<HashMap<WorkspaceId, (u64, CancellationToken)>>,
}

impl InFlightExtractions {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, workspace_id: WorkspaceId, run: u64) -> CancellationToken {
        let token = CancellationToken::new();
        let previous = self
            .tokens
            .lock()
            .await
            .insert(workspace_id, (run, token.clone()));
        if let Some((_, stale)) = previous {
            stale.cancel();
        }
        token
    }

    /// Returns whether a running extraction was signalled.
    pub async fn cancel(&self, workspace_id: WorkspaceId) -> bool {
        match self.tokens.lock().await.remove(&workspace_id) {
            Some((_, token)) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Forgets the token of `run`. A newer run for the same workspace is left alone.
    pub async fn finish(&self, workspace_id: WorkspaceId, run: u64) {
        let mut tokens = self.tokens.lock().await;
        if tokens.get(&workspace_id).is_some_and(|(r, _)| *r == run) {
            tokens.remove(&workspace_id);
        }
    }

    pub async fn is_running(&self, workspace_id: WorkspaceId) -> bool {
        self.tokens.lock().await.contains_key(&workspace_id)
    }
}
