use thiserror::Error;

/// Errors returned by table construction, conversion and rendering.
#[derive(Debug, Error)]
pub enum EdaError {
    #[error("column '{column}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),

    #[error("column '{column}' is declared {expected} but row {row} holds {found}")]
    TypeMismatch {
        column: String,
        expected: String,
        row: usize,
        found: String,
    },

    #[error("name '{name}' is not defined in the display context")]
    NameResolution { name: String },

    #[error("invalid JSON records: {0}")]
    InvalidRecords(String),

    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EdaError>;
