//! Store whose every call fails as if Redis had gone away.

use std::io;

use futures::{FutureExt, future::BoxFuture};

use super::QuizStore;
use crate::dao::storage::{StorageError, StorageResult};

/// Answers every primitive with [`StorageError::Unavailable`].
#[derive(Clone, Copy, Default)]
pub struct FailingQuizStore;

fn refused<T: Send + 'static>(command: &str) -> BoxFuture<'static, StorageResult<T>> {
    let err = StorageError::unavailable(
        format!("{command} failed"),
        io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"),
    );
    futures::future::ready(Err(err)).boxed()
}

impl QuizStore for FailingQuizStore {
    fn set_field_if_absent(
        &self,
        _key: String,
        _field: &'static str,
    ) -> BoxFuture<'static, StorageResult<bool>> {
        refused("HSETNX")
    }

    fn get_flag(&self, _key: String, _field: &'static str) -> BoxFuture<'static, StorageResult<bool>> {
        refused("HGET")
    }

    fn delete_field(
        &self,
        _key: String,
        _field: &'static str,
    ) -> BoxFuture<'static, StorageResult<u64>> {
        refused("HDEL")
    }

    fn delete_key(&self, _key: String) -> BoxFuture<'static, StorageResult<u64>> {
        refused("DEL")
    }

    fn increment_member(
        &self,
        _key: String,
        _member: String,
        _delta: i64,
    ) -> BoxFuture<'static, StorageResult<i64>> {
        refused("ZINCRBY")
    }

    fn set_member(
        &self,
        _key: String,
        _member: String,
        _score: i64,
    ) -> BoxFuture<'static, StorageResult<()>> {
        refused("ZADD")
    }

    fn rev_range_with_scores(
        &self,
        _key: String,
        _limit: usize,
    ) -> BoxFuture<'static, StorageResult<Vec<(String, i64)>>> {
        refused("ZREVRANGE")
    }

    fn cardinality(&self, _key: String) -> BoxFuture<'static, StorageResult<u64>> {
        refused("ZCARD")
    }

    fn members(&self, _key: String) -> BoxFuture<'static, StorageResult<Vec<String>>> {
        refused("ZRANGE")
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        refused("PING")
    }
}
