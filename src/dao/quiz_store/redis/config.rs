use redis::{ConnectionInfo, IntoConnectionInfo};

use super::error::{RedisDaoError, RedisResult};

/// Runtime configuration describing how to reach Redis.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// `redis://host:port/db` URL.
    pub url: String,
    /// Password injected into the connection, if any.
    pub password: Option<String>,
}

impl RedisConfig {
    /// Construct a configuration from an explicit `redis://` URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            password: None,
        }
    }

    /// Attach a password, overriding any password embedded in the URL.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub(super) fn connection_info(&self) -> RedisResult<ConnectionInfo> {
        let mut info = self
            .url
            .as_str()
            .into_connection_info()
            .map_err(|source| RedisDaoError::InvalidUrl {
                url: self.url.clone(),
                source,
            })?;

        if let Some(password) = self.password.as_ref().filter(|value| !value.is_empty()) {
            info.redis.password = Some(password.clone());
        }

        Ok(info)
    }
}
