use thiserror::Error as ThisError;

///
/// QueryError
/// Rejections raised by the list query engine before any work is done.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum QueryError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl QueryError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

///
/// LoadError
/// Failures while reading a record collection from disk.
///

#[derive(Debug, ThisError)]
pub enum LoadError {
    #[error("failed to read records: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON records: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed CSV at line {line}: {message}")]
    Csv { line: usize, message: String },

    #[error("invalid record collection: {0}")]
    Invalid(String),

    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
}
