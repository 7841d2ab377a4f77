//! In-process [`QuizStore`] backed by a concurrent map.
//!
//! Every primitive runs under the shard lock of a single key, which gives the
//! same per-key atomicity the quiz components rely on from Redis. Ordering of
//! ranked reads follows Redis: ties on score are broken by member name.

use std::{cmp::Ordering, sync::Arc};

use dashmap::DashMap;
use futures::{FutureExt, future::BoxFuture};
use indexmap::IndexMap;

use super::QuizStore;
use crate::dao::storage::{StorageError, StorageResult};

const FLAG_SET: &str = "1";

enum Entry {
    Hash(IndexMap<String, String>),
    Ranked(IndexMap<String, i64>),
}

/// Volatile store used by tests and by single-node deployments without Redis.
#[derive(Clone, Default)]
pub struct MemoryQuizStore {
    entries: Arc<DashMap<String, Entry>>,
}

impl MemoryQuizStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_hash<T>(
        &self,
        key: String,
        op: impl FnOnce(&mut IndexMap<String, String>) -> T,
    ) -> StorageResult<T> {
        let mut entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(|| Entry::Hash(IndexMap::new()));
        match entry.value_mut() {
            Entry::Hash(fields) => Ok(op(fields)),
            Entry::Ranked(_) => Err(wrong_type(&key)),
        }
    }

    fn with_ranked<T>(
        &self,
        key: String,
        op: impl FnOnce(&mut IndexMap<String, i64>) -> T,
    ) -> StorageResult<T> {
        let mut entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(|| Entry::Ranked(IndexMap::new()));
        match entry.value_mut() {
            Entry::Ranked(members) => Ok(op(members)),
            Entry::Hash(_) => Err(wrong_type(&key)),
        }
    }

    /// Snapshot a ranked collection; a missing key reads as empty.
    fn ranked_snapshot(&self, key: &str) -> StorageResult<Vec<(String, i64)>> {
        match self.entries.get(key) {
            None => Ok(Vec::new()),
            Some(entry) => match entry.value() {
                Entry::Ranked(members) => Ok(members
                    .iter()
                    .map(|(member, score)| (member.clone(), *score))
                    .collect()),
                Entry::Hash(_) => Err(wrong_type(key)),
            },
        }
    }
}

fn wrong_type(key: &str) -> StorageError {
    StorageError::protocol(
        format!("WRONGTYPE operation against key `{key}` holding the wrong kind of value"),
        None,
    )
}

fn by_score_then_member(a: &(String, i64), b: &(String, i64)) -> Ordering {
    a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0))
}

impl QuizStore for MemoryQuizStore {
    fn set_field_if_absent(
        &self,
        key: String,
        field: &'static str,
    ) -> BoxFuture<'static, StorageResult<bool>> {
        let result = self.with_hash(key, |fields| {
            if fields.contains_key(field) {
                false
            } else {
                fields.insert(field.to_owned(), FLAG_SET.to_owned());
                true
            }
        });
        async move { result }.boxed()
    }

    fn get_flag(&self, key: String, field: &'static str) -> BoxFuture<'static, StorageResult<bool>> {
        let result = match self.entries.get(&key) {
            None => Ok(false),
            Some(entry) => match entry.value() {
                Entry::Hash(fields) => Ok(fields.get(field).is_some_and(|value| value == FLAG_SET)),
                Entry::Ranked(_) => Err(wrong_type(&key)),
            },
        };
        async move { result }.boxed()
    }

    fn delete_field(
        &self,
        key: String,
        field: &'static str,
    ) -> BoxFuture<'static, StorageResult<u64>> {
        let result = match self.entries.get_mut(&key) {
            None => Ok(0),
            Some(mut entry) => match entry.value_mut() {
                Entry::Hash(fields) => Ok(u64::from(fields.shift_remove(field).is_some())),
                Entry::Ranked(_) => Err(wrong_type(&key)),
            },
        };
        // Redis drops a hash once its last field is gone.
        self.entries
            .remove_if(&key, |_, entry| matches!(entry, Entry::Hash(fields) if fields.is_empty()));
        async move { result }.boxed()
    }

    fn delete_key(&self, key: String) -> BoxFuture<'static, StorageResult<u64>> {
        let removed = u64::from(self.entries.remove(&key).is_some());
        async move { Ok(removed) }.boxed()
    }

    fn increment_member(
        &self,
        key: String,
        member: String,
        delta: i64,
    ) -> BoxFuture<'static, StorageResult<i64>> {
        let result = self.with_ranked(key, |members| {
            let score = members.entry(member).or_insert(0);
            *score = score.saturating_add(delta);
            *score
        });
        async move { result }.boxed()
    }

    fn set_member(
        &self,
        key: String,
        member: String,
        score: i64,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let result = self.with_ranked(key, |members| {
            members.insert(member, score);
        });
        async move { result }.boxed()
    }

    fn rev_range_with_scores(
        &self,
        key: String,
        limit: usize,
    ) -> BoxFuture<'static, StorageResult<Vec<(String, i64)>>> {
        let result = self.ranked_snapshot(&key).map(|mut members| {
            members.sort_by(|a, b| by_score_then_member(b, a));
            members.truncate(limit);
            members
        });
        async move { result }.boxed()
    }

    fn cardinality(&self, key: String) -> BoxFuture<'static, StorageResult<u64>> {
        let result = self
            .ranked_snapshot(&key)
            .map(|members| members.len() as u64);
        async move { result }.boxed()
    }

    fn members(&self, key: String) -> BoxFuture<'static, StorageResult<Vec<String>>> {
        let result = self.ranked_snapshot(&key).map(|mut members| {
            members.sort_by(by_score_then_member);
            members.into_iter().map(|(member, _)| member).collect()
        });
        async move { result }.boxed()
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        async { Ok(()) }.boxed()
    }
}
