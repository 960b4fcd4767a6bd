use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors returned by the alias store.
///
/// `NotFound` deliberately does not distinguish "never existed" from
/// "expired", so callers cannot probe TTL timing through error messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("alias not found or expired: {0}")]
    NotFound(String),
}
