use std::error::Error;
use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by storage backends regardless of the underlying database.
///
/// Missing keys or fields are never reported through this type; backends answer
/// them with `false`, `0` or an empty list instead.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be reached or the connection broke mid-command.
    #[error("storage unavailable: {message}")]
    Unavailable {
        /// Human-readable summary.
        message: String,
        /// Underlying backend failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// The backend answered with something the adapter cannot interpret.
    #[error("storage protocol error: {message}")]
    Protocol {
        /// Human-readable summary.
        message: String,
        /// Underlying backend failure, when there is one.
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }

    /// Construct a protocol error, optionally keeping the backend failure as source.
    pub fn protocol(
        message: String,
        source: Option<Box<dyn Error + Send + Sync + 'static>>,
    ) -> Self {
        StorageError::Protocol { message, source }
    }
}
