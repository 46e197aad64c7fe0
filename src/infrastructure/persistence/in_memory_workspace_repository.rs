use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{RepositoryError, WorkspaceRepository, WorkspaceStoreError};
use crate::domain::{Workspace, WorkspaceCommand, WorkspaceId};

#[derive(Default)]
pub struct InMemoryWorkspaceRepository {
    workspaces: RwLock<HashMap<WorkspaceId, Workspace>>,
}

impl InMemoryWorkspaceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WorkspaceRepository for InMemoryWorkspaceRepository {
    async fn create(&self, workspace: &Workspace) -> Result<(), RepositoryError> {
        let mut workspaces = self.workspaces.write().await;
        if workspaces.contains_key(&workspace.id) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "workspace {} already exists",
                workspace.id.as_uuid()
            )));
        }
        workspaces.insert(workspace.id, workspace.clone());
        Ok(())
    }

    async fn get(&self, id: WorkspaceId) -> Result<Option<Workspace>, RepositoryError> {
        Ok(self.workspaces.read().await.get(&id).cloned())
    }

    #[tracing::instrument(skip(self, command), fields(workspace_id = %id.as_uuid(), command = command.name()))]
    async fn apply(
        &self,
        id: WorkspaceId,
        command: WorkspaceCommand,
    ) -> Result<Workspace, WorkspaceStoreError> {
        let mut workspaces = self.workspaces.write().await;
        let current = workspaces
            .get(&id)
            .ok_or(WorkspaceStoreError::NotFound(id.as_uuid()))?;

        let next = current.apply(command)?;
        workspaces.insert(id, next.clone());
        Ok(next)
    }

    async fn delete(&self, id: WorkspaceId) -> Result<bool, RepositoryError> {
        Ok(self.workspaces.write().await.remove(&id).is_some())
    }
}
