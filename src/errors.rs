use thiserror::Error;

/// Error type that captures storage and gateway failures.
///
/// Codec and mutation paths never produce errors: malformed input is coerced
/// and invalid mutations are no-ops.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Data file not found")]
    NotFound,
    #[error("Storage error: {0}")]
    Storage(String),
}
