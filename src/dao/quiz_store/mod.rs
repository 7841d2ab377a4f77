#[cfg(test)]
pub(crate) mod failing;
pub mod memory;
/// Redis-backed store.
#[cfg(feature = "redis-store")]
pub mod redis;

use futures::future::BoxFuture;

use crate::dao::storage::StorageResult;

/// Upper bound used when materialising a full leaderboard.
pub const LEADERBOARD_READ_LIMIT: usize = 100_000_000;

/// Atomic single-key primitives the quiz components need from the external store.
///
/// Implementations must answer missing keys and fields with neutral values
/// (`false`, `0`, empty lists). Only transport or protocol failures are errors.
pub trait QuizStore: Send + Sync {
    /// Set `field` of hash `key` to `"1"` unless it already exists; `true` when newly set.
    fn set_field_if_absent(
        &self,
        key: String,
        field: &'static str,
    ) -> BoxFuture<'static, StorageResult<bool>>;
    /// Read `field` of hash `key` as a flag; absent means `false`.
    fn get_flag(&self, key: String, field: &'static str) -> BoxFuture<'static, StorageResult<bool>>;
    /// Remove `field` from hash `key`, returning how many fields were removed.
    fn delete_field(
        &self,
        key: String,
        field: &'static str,
    ) -> BoxFuture<'static, StorageResult<u64>>;
    /// Remove `key` entirely, returning how many keys were removed.
    fn delete_key(&self, key: String) -> BoxFuture<'static, StorageResult<u64>>;
    /// Add `delta` to the score of `member` in ranked collection `key`, creating it at `delta`.
    fn increment_member(
        &self,
        key: String,
        member: String,
        delta: i64,
    ) -> BoxFuture<'static, StorageResult<i64>>;
    /// Set the score of `member` in ranked collection `key`, creating or overwriting it.
    fn set_member(
        &self,
        key: String,
        member: String,
        score: i64,
    ) -> BoxFuture<'static, StorageResult<()>>;
    /// Highest-scored members first, at most `limit` of them.
    fn rev_range_with_scores(
        &self,
        key: String,
        limit: usize,
    ) -> BoxFuture<'static, StorageResult<Vec<(String, i64)>>>;
    /// Number of members in ranked collection `key`.
    fn cardinality(&self, key: String) -> BoxFuture<'static, StorageResult<u64>>;
    /// Every member of ranked collection `key` in the store's natural order.
    fn members(&self, key: String) -> BoxFuture<'static, StorageResult<Vec<String>>>;
    /// Round-trip to the backend to check it is reachable.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}
