use thiserror::Error;

/// Result type for database operations
pub type Result<T> = std::result::Result<T, Error>;

/// SQLSTATE for unique constraint violations
const UNIQUE_VIOLATION: &str = "23505";

/// Error types for the relational store
#[derive(Debug, Error)]
pub enum Error {
    /// Row doesn't exist or isn't visible to the caller
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unique constraint violation
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Connection error - database unreachable or authentication failure
    #[error("Connection error: {0}")]
    Connection(String),

    /// Pool error - connection pool issues
    #[error("Pool error: {0}")]
    Pool(String),

    /// Database error - SQL errors, constraint violations
    #[error("Database error: {0}")]
    Database(String),
}

impl From<tokio_postgres::Error> for Error {
    fn from(err: tokio_postgres::Error) -> Self {
        if let Some(db_error) = err.as_db_error() {
            if db_error.code().code() == UNIQUE_VIOLATION {
                let target = db_error
                    .constraint()
                    .unwrap_or("unique constraint")
                    .to_string();
                return Error::Conflict(target);
            }

            return Error::Database(format!("{}: {}", db_error.code().code(), db_error.message()));
        }

        Error::Database(format!("{:?}", err))
    }
}

impl From<deadpool_postgres::PoolError> for Error {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Error::Pool(err.to_string())
    }
}

impl From<deadpool_postgres::BuildError> for Error {
    fn from(err: deadpool_postgres::BuildError) -> Self {
        Error::Connection(err.to_string())
    }
}
