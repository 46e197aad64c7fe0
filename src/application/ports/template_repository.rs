use async_trait::async_trait;

use crate::domain::{Template, TemplateId};

use super::RepositoryError;

#[async_trait]
pub trait TemplateRepository: Send + Sync {
    async fn create(&self, template: &Template) -> Result<(), RepositoryError>;

    /// Most recently created first.
    async fn list(&self) -> Result<Vec<Template>, RepositoryError>;

    async fn get(&self, id: TemplateId) -> Result<Option<Template>, RepositoryError>;
}
