//! Error handling for EduGames
//!
//! This module defines the main error type used throughout the application
//! and the taxonomy the API surface maps onto stable status codes.

use thiserror::Error;

/// Main error type for EduGames application
#[derive(Error, Debug)]
pub enum GameBotError {
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Store temporarily unavailable: {0}")]
    TransientStore(String),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: i64 },

    #[error("Game not found: {game_id}")]
    GameNotFound { game_id: String },

    #[error("PRO request not found: {request_id}")]
    ProRequestNotFound { request_id: i64 },

    #[error("User {user_id} already has PRO access")]
    AlreadyPrivileged { user_id: i64 },

    #[error("User {user_id} already has a pending PRO request")]
    DuplicatePending { user_id: i64 },

    #[error("PRO request {request_id} was already {status}")]
    AlreadyDecided { request_id: i64, status: String },

    #[error("Could not generate a unique game id after {attempts} attempts")]
    IdGenerationFailed { attempts: u32 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<sqlx::Error> for GameBotError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => {
                GameBotError::TransientStore("timed out waiting for a database connection".to_string())
            }
            sqlx::Error::PoolClosed => {
                GameBotError::TransientStore("database pool is closed".to_string())
            }
            sqlx::Error::Io(e) => GameBotError::TransientStore(e.to_string()),
            // string_data_right_truncation
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("22001") => {
                GameBotError::InvalidInput("Value is too long".to_string())
            }
            other => GameBotError::Database(other),
        }
    }
}

/// Result type alias for EduGames operations
pub type Result<T> = std::result::Result<T, GameBotError>;

/// Externally visible error classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Unauthorized,
    Forbidden,
    TransientStore,
    IdGeneration,
    Internal,
}

impl ErrorKind {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Conflict => "CONFLICT",
            ErrorKind::Unauthorized => "UNAUTHORIZED",
            ErrorKind::Forbidden => "FORBIDDEN",
            ErrorKind::TransientStore => "TRANSIENT_STORE_ERROR",
            ErrorKind::IdGeneration => "ID_GENERATION_FAILED",
            ErrorKind::Internal => "INTERNAL_ERROR",
        }
    }
}

impl GameBotError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameBotError::InvalidInput(_) => ErrorKind::Validation,
            GameBotError::UserNotFound { .. }
            | GameBotError::GameNotFound { .. }
            | GameBotError::ProRequestNotFound { .. } => ErrorKind::NotFound,
            GameBotError::AlreadyPrivileged { .. }
            | GameBotError::DuplicatePending { .. }
            | GameBotError::AlreadyDecided { .. } => ErrorKind::Conflict,
            GameBotError::Unauthorized(_) => ErrorKind::Unauthorized,
            GameBotError::PermissionDenied(_) => ErrorKind::Forbidden,
            GameBotError::TransientStore(_) => ErrorKind::TransientStore,
            GameBotError::IdGenerationFailed { .. } => ErrorKind::IdGeneration,
            GameBotError::Database(_)
            | GameBotError::Migration(_)
            | GameBotError::Telegram(_)
            | GameBotError::Config(_)
            | GameBotError::Serialization(_)
            | GameBotError::Io(_)
            | GameBotError::UrlParse(_) => ErrorKind::Internal,
        }
    }

    /// Message that is safe to show to API callers and chat users.
    ///
    /// Internal errors never expose store or transport details.
    pub fn public_message(&self) -> String {
        match self.kind() {
            ErrorKind::Internal => "Internal server error".to_string(),
            ErrorKind::TransientStore => "Service temporarily unavailable, please retry".to_string(),
            ErrorKind::IdGeneration => "Could not allocate a game id, please retry".to_string(),
            _ => self.to_string(),
        }
    }

    /// Check if retrying the whole operation may succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            GameBotError::TransientStore(_) => true,
            GameBotError::Telegram(_) => true,
            GameBotError::Io(_) => true,
            GameBotError::IdGenerationFailed { .. } => true,
            _ => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            GameBotError::Database(_) => ErrorSeverity::Critical,
            GameBotError::Migration(_) => ErrorSeverity::Critical,
            GameBotError::Config(_) => ErrorSeverity::Critical,
            GameBotError::IdGenerationFailed { .. } => ErrorSeverity::Error,
            GameBotError::TransientStore(_) => ErrorSeverity::Warning,
            GameBotError::PermissionDenied(_) => ErrorSeverity::Warning,
            GameBotError::Unauthorized(_) => ErrorSeverity::Warning,
            _ if self.kind() != ErrorKind::Internal => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_is_transient() {
        let err: GameBotError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, GameBotError::TransientStore(_)));
        assert_eq!(err.kind(), ErrorKind::TransientStore);
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_row_not_found_is_internal() {
        let err: GameBotError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.public_message(), "Internal server error");
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_database_error_keeps_its_source() {
        use std::error::Error as _;

        let err = GameBotError::Database(sqlx::Error::RowNotFound);
        let source = err.source().expect("sqlx cause is exposed");
        assert_eq!(source.to_string(), sqlx::Error::RowNotFound.to_string());
    }

    #[test]
    fn test_conflicts() {
        let errors = [
            GameBotError::AlreadyPrivileged { user_id: 1 },
            GameBotError::DuplicatePending { user_id: 1 },
            GameBotError::AlreadyDecided { request_id: 7, status: "approved".to_string() },
        ];
        for err in errors {
            assert_eq!(err.kind(), ErrorKind::Conflict);
            assert_eq!(err.kind().code(), "CONFLICT");
            assert!(!err.is_recoverable());
        }
    }

    #[test]
    fn test_public_message_keeps_domain_text() {
        let err = GameBotError::GameNotFound { game_id: "ab12cd34".to_string() };
        assert_eq!(err.public_message(), "Game not found: ab12cd34");
        assert_eq!(err.severity(), ErrorSeverity::Info);
    }
}
