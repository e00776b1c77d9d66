use crate::id::{LocationId, StageId};

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when loading or querying static game data.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The catalog JSON could not be parsed.
    #[error("invalid catalog data: {0}")]
    Parse(#[from] serde_json::Error),

    /// No stage with the requested ID exists in the catalog.
    #[error("stage not found: {0}")]
    StageNotFound(StageId),

    /// No location with the requested ID exists in the catalog.
    #[error("location not found: {0}")]
    LocationNotFound(LocationId),

    /// A generic validation error with a descriptive message.
    #[error("validation error: {0}")]
    Validation(String),
}
