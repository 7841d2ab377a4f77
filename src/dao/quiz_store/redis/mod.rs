mod config;
mod error;
mod store;

pub use config::RedisConfig;
pub use error::RedisDaoError;
pub use store::RedisQuizStore;

use crate::dao::storage::StorageError;

impl From<RedisDaoError> for StorageError {
    fn from(err: RedisDaoError) -> Self {
        if err.is_transport() {
            StorageError::unavailable(err.to_string(), err)
        } else {
            StorageError::protocol(err.to_string(), Some(Box::new(err)))
        }
    }
}
