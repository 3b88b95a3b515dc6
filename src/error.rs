use thiserror::Error;

/// Everything that can go wrong between generating a dataset and scoring a
/// learner against it.
///
/// All variants are local validation failures; nothing here is retried.
#[derive(Debug, Error)]
pub enum SortError {
    /// A value outside `0..=9` was handed to the digit codec.
    #[error("invalid digit {0}: digits must be in 0..=9")]
    InvalidDigit(u8),

    /// A row (or a learner output) does not have the dataset's fixed width.
    #[error("shape mismatch at row {row}: expected width {expected}, found {found}")]
    ShapeMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A query line is not a comma-separated list of non-negative integers.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// `predict` was called before the learner was fitted or loaded.
    #[error("learner has not been trained")]
    Untrained,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SortError>;
