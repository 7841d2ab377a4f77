//! Error types shared by the Redis storage implementation.

use redis::RedisError;
use thiserror::Error;

/// Convenient result alias returning [`RedisDaoError`] failures.
pub type RedisResult<T> = Result<T, RedisDaoError>;

/// Failures that can occur while interacting with Redis.
#[derive(Debug, Error)]
pub enum RedisDaoError {
    /// The configured URL could not be parsed.
    #[error("invalid Redis URL `{url}`")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// Parser failure.
        #[source]
        source: RedisError,
    },
    /// Opening the managed connection failed.
    #[error("failed to connect to Redis")]
    Connect {
        /// Driver failure.
        #[source]
        source: RedisError,
    },
    /// A command was rejected or its reply could not be decoded.
    #[error("Redis command {command} failed for `{key}`")]
    Command {
        /// Redis command name.
        command: &'static str,
        /// Key the command ran against.
        key: String,
        /// Driver failure.
        #[source]
        source: RedisError,
    },
    /// PING did not succeed.
    #[error("Redis ping failed")]
    HealthPing {
        /// Driver failure.
        #[source]
        source: RedisError,
    },
}

impl RedisDaoError {
    /// Whether the failure comes from the connection rather than from the reply.
    pub fn is_transport(&self) -> bool {
        let source = match self {
            RedisDaoError::InvalidUrl { .. } => return false,
            RedisDaoError::Connect { .. } => return true,
            RedisDaoError::Command { source, .. } | RedisDaoError::HealthPing { source } => source,
        };
        source.is_io_error()
            || source.is_connection_dropped()
            || source.is_connection_refusal()
            || source.is_timeout()
    }
}
