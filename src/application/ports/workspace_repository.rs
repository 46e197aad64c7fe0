use async_trait::async_trait;

use crate::domain::{Workspace, WorkspaceCommand, WorkspaceError, WorkspaceId};

use super::RepositoryError;

#[async_trait]
pub trait WorkspaceRepository: Send + Sync {
    async fn create(&self, workspace: &Workspace) -> Result<(), RepositoryError>;

    async fn get(&self, id: WorkspaceId) -> Result<Option<Workspace>, RepositoryError>;

    /// Applies `command` to the stored workspace atomically and returns the new state.
    async fn apply(
        &self,
        id: WorkspaceId,
        command: WorkspaceCommand,
    ) -> Result<Workspace, WorkspaceStoreError>;

    /// Returns whether a workspace was removed.
    async fn delete(&self, id: WorkspaceId) -> Result<bool, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum WorkspaceStoreError {
    #[error("workspace not found: {0}")]
    NotFound(uuid::Uuid),
    #[error(transparent)]
    Transition(#[from] WorkspaceError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
