use futures::future::BoxFuture;
use redis::{AsyncCommands, Client, RedisError, aio::ConnectionManager};

use super::{
    config::RedisConfig,
    error::{RedisDaoError, RedisResult},
};
use crate::dao::{
    quiz_store::QuizStore,
    storage::{StorageError, StorageResult},
};

const FLAG_SET: &str = "1";

/// [`QuizStore`] backed by Redis hashes and sorted sets.
///
/// The managed connection is multiplexed and reconnects on its own, so a clone
/// per command is cheap and never blocks other in-flight requests.
#[derive(Clone)]
pub struct RedisQuizStore {
    connection: ConnectionManager,
}

impl RedisQuizStore {
    /// Open a managed connection and make sure the server answers.
    pub async fn connect(config: RedisConfig) -> RedisResult<Self> {
        let client = Client::open(config.connection_info()?)
            .map_err(|source| RedisDaoError::Connect { source })?;
        let connection = ConnectionManager::new(client)
            .await
            .map_err(|source| RedisDaoError::Connect { source })?;

        let store = Self { connection };
        store.ping().await?;
        Ok(store)
    }

    async fn ping(&self) -> RedisResult<()> {
        let mut connection = self.connection.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut connection)
            .await
            .map_err(|source| RedisDaoError::HealthPing { source })?;
        Ok(())
    }

    async fn hset_nx(&self, key: String, field: &'static str) -> RedisResult<bool> {
        let mut connection = self.connection.clone();
        connection
            .hset_nx(&key, field, FLAG_SET)
            .await
            .map_err(command_error("HSETNX", &key))
    }

    async fn hget_flag(&self, key: String, field: &'static str) -> RedisResult<bool> {
        let mut connection = self.connection.clone();
        let value: Option<String> = connection
            .hget(&key, field)
            .await
            .map_err(command_error("HGET", &key))?;
        Ok(value.as_deref() == Some(FLAG_SET))
    }

    async fn hdel(&self, key: String, field: &'static str) -> RedisResult<u64> {
        let mut connection = self.connection.clone();
        connection
            .hdel(&key, field)
            .await
            .map_err(command_error("HDEL", &key))
    }

    async fn del(&self, key: String) -> RedisResult<u64> {
        let mut connection = self.connection.clone();
        connection
            .del(&key)
            .await
            .map_err(command_error("DEL", &key))
    }

    async fn zincr(&self, key: String, member: String, delta: i64) -> RedisResult<i64> {
        let mut connection = self.connection.clone();
        let score: f64 = connection
            .zincr(&key, &member, delta)
            .await
            .map_err(command_error("ZINCRBY", &key))?;
        Ok(score_to_int(score))
    }

    async fn zadd(&self, key: String, member: String, score: i64) -> RedisResult<()> {
        let mut connection = self.connection.clone();
        let _: i64 = connection
            .zadd(&key, &member, score)
            .await
            .map_err(command_error("ZADD", &key))?;
        Ok(())
    }

    async fn zrevrange_withscores(
        &self,
        key: String,
        limit: usize,
    ) -> RedisResult<Vec<(String, i64)>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let stop = isize::try_from(limit).unwrap_or(isize::MAX) - 1;
        let mut connection = self.connection.clone();
        let entries: Vec<(String, f64)> = connection
            .zrevrange_withscores(&key, 0, stop)
            .await
            .map_err(command_error("ZREVRANGE", &key))?;
        Ok(entries
            .into_iter()
            .map(|(member, score)| (member, score_to_int(score)))
            .collect())
    }

    async fn zcard(&self, key: String) -> RedisResult<u64> {
        let mut connection = self.connection.clone();
        connection
            .zcard(&key)
            .await
            .map_err(command_error("ZCARD", &key))
    }

    async fn zrange_all(&self, key: String) -> RedisResult<Vec<String>> {
        let mut connection = self.connection.clone();
        connection
            .zrange(&key, 0, -1)
            .await
            .map_err(command_error("ZRANGE", &key))
    }
}

fn command_error(command: &'static str, key: &str) -> impl FnOnce(RedisError) -> RedisDaoError {
    let key = key.to_owned();
    move |source| RedisDaoError::Command {
        command,
        key,
        source,
    }
}

/// Sorted-set scores travel as doubles; every score this crate writes is integral.
fn score_to_int(score: f64) -> i64 {
    score.round() as i64
}

impl QuizStore for RedisQuizStore {
    fn set_field_if_absent(
        &self,
        key: String,
        field: &'static str,
    ) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.hset_nx(key, field).await.map_err(StorageError::from) })
    }

    fn get_flag(&self, key: String, field: &'static str) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.hget_flag(key, field).await.map_err(StorageError::from) })
    }

    fn delete_field(
        &self,
        key: String,
        field: &'static str,
    ) -> BoxFuture<'static, StorageResult<u64>> {
        let store = self.clone();
        Box::pin(async move { store.hdel(key, field).await.map_err(StorageError::from) })
    }

    fn delete_key(&self, key: String) -> BoxFuture<'static, StorageResult<u64>> {
        let store = self.clone();
        Box::pin(async move { store.del(key).await.map_err(StorageError::from) })
    }

    fn increment_member(
        &self,
        key: String,
        member: String,
        delta: i64,
    ) -> BoxFuture<'static, StorageResult<i64>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .zincr(key, member, delta)
                .await
                .map_err(StorageError::from)
        })
    }

    fn set_member(
        &self,
        key: String,
        member: String,
        score: i64,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .zadd(key, member, score)
                .await
                .map_err(StorageError::from)
        })
    }

    fn rev_range_with_scores(
        &self,
        key: String,
        limit: usize,
    ) -> BoxFuture<'static, StorageResult<Vec<(String, i64)>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .zrevrange_withscores(key, limit)
                .await
                .map_err(StorageError::from)
        })
    }

    fn cardinality(&self, key: String) -> BoxFuture<'static, StorageResult<u64>> {
        let store = self.clone();
        Box::pin(async move { store.zcard(key).await.map_err(StorageError::from) })
    }

    fn members(&self, key: String) -> BoxFuture<'static, StorageResult<Vec<String>>> {
        let store = self.clone();
        Box::pin(async move { store.zrange_all(key).await.map_err(StorageError::from) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.ping().await.map_err(StorageError::from) })
    }
}
