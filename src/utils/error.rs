use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Event payload missing, or missing its `uid`
    MalformedEvent(String),
    /// Store rejected or timed out the profile write
    WriteFailure(String),
    DatabaseError(String),
    Config(String),
    Unauthorized(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MalformedEvent(msg) => write!(f, "Malformed event: {}", msg),
            AppError::WriteFailure(msg) => write!(f, "Write failure: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
