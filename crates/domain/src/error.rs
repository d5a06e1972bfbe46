use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("{0} id must not be empty")]
    EmptyIdentifier(&'static str),
    #[error("star rating must be between 1 and 5, got {0}")]
    StarsOutOfRange(i64),
}
