use thiserror::Error;

/// A comment body that cannot be classified.
///
/// Callers must treat this as "decision undetermined" and never fall back to a
/// default decision.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("comment body contains a NUL character")]
    NulByte,
}

/// Failure to decode externally supplied evaluation input.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("invalid comment JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("comment {index} is invalid: {source}")]
    InvalidComment {
        index: usize,
        source: serde_json::Error,
    },
    #[error("comment {index} is neither a GitHub comment (\"user\") nor an {{author, body}} record")]
    UnrecognizedComment { index: usize },
    #[error("unknown item state {0:?}, expected \"open\" or \"closed\"")]
    UnknownItemState(String),
}
