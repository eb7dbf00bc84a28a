//! Error types and handling
//!
//! Every failure the provisioner can hit maps onto one of these variants.
//! The CLI prints a single `[FAIL]` line for any of them and exits with code 1.

use thiserror::Error;

/// Provisioning error types
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// Required setting missing or invalid; raised before any database access
    #[error("Configuration error: {0}")]
    Config(String),

    /// Operator input rejected (blank tenant name, partial GHL credentials, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Connection, constraint, or commit failure
    #[error("Database error: {0}")]
    Database(String),

    /// Failure applying the bundled schema
    #[error("Migration error: {0}")]
    Migration(String),

    /// Terminal read/write failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProvisionError {
    pub fn config(msg: impl Into<String>) -> Self {
        ProvisionError::Config(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ProvisionError::Validation(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        ProvisionError::Database(msg.into())
    }

    /// Process exit code reported for this error
    pub fn exit_code(&self) -> i32 {
        1
    }
}

impl From<sqlx::Error> for ProvisionError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                if db_err.message().contains("UNIQUE constraint failed") {
                    ProvisionError::Database(format!("Record already exists: {}", db_err))
                } else {
                    ProvisionError::Database(db_err.to_string())
                }
            }
            _ => ProvisionError::Database(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for ProvisionError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        ProvisionError::Migration(err.to_string())
    }
}

/// Repository failures carry their context chain into the message.
impl From<anyhow::Error> for ProvisionError {
    fn from(err: anyhow::Error) -> Self {
        ProvisionError::Database(format!("{:#}", err))
    }
}

/// Result type alias for provisioning operations
pub type ProvisionResult<T> = Result<T, ProvisionError>;
