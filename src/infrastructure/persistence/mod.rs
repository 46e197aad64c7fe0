mod in_memory_template_repository;
mod in_memory_workspace_repository;

pub use in_memory_template_repository::InMemoryTemplateRepository;
pub use in_memory_workspace_repository::InMemoryWorkspaceRepository;
