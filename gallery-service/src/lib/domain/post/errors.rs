use thiserror::Error;

/// Error for Title validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TitleError {
    #[error("Title is required")]
    Empty,

    #[error("Title must be less than {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for Description validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DescriptionError {
    #[error("Description is required")]
    Empty,

    #[error("Description must be less than {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all post-related operations
#[derive(Debug, Clone, Error)]
pub enum PostError {
    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] TitleError),

    #[error("Invalid description: {0}")]
    InvalidDescription(#[from] DescriptionError),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
