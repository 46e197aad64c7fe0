#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
}
