use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    dao::{
        keys::player_data_key,
        quiz_store::{LEADERBOARD_READ_LIMIT, QuizStore},
        storage::StorageResult,
    },
    state::quiz::QuizId,
};

/// Points available for an instant answer, before the time penalty.
pub const BASE_POINTS: i64 = 10_000;
/// Flat bonus added to every correct answer.
pub const CORRECT_BONUS: i64 = 1_000;

/// Score added for a correct answer that took `time_taken` units.
///
/// Not clamped: answers slower than 11000 units subtract from the score.
pub fn score_delta(time_taken: u64) -> i64 {
    let time_taken = i64::try_from(time_taken).unwrap_or(i64::MAX);
    BASE_POINTS.saturating_sub(time_taken).saturating_add(CORRECT_BONUS)
}

/// One leaderboard row; `rank` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    /// Player name.
    pub name: String,
    /// Accumulated score; may be negative.
    pub score: i64,
    /// Position, starting at 1.
    pub rank: u64,
}

/// Ranked view returned after an answer is recorded.
///
/// The count and the rows come from separate reads and may disagree under
/// concurrent writers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardSnapshot {
    /// Number of registered players.
    pub player_count: u64,
    /// Every player, best score first.
    pub entries: Vec<RankedEntry>,
}

/// Player membership and scores of each quiz, kept in a ranked collection.
#[derive(Clone)]
pub struct LeaderboardEngine {
    store: Arc<dyn QuizStore>,
}

impl LeaderboardEngine {
    /// Build an engine over `store`.
    pub fn new(store: Arc<dyn QuizStore>) -> Self {
        Self { store }
    }

    /// Register `name` with a score of zero; a rejoin wipes earlier progress.
    pub async fn join(&self, quiz_id: &QuizId, name: &str) -> StorageResult<()> {
        self.store
            .set_member(player_data_key(quiz_id.as_str()), name.to_owned(), 0)
            .await?;
        info!(%quiz_id, name, "player registered");
        Ok(())
    }

    /// Apply a correct answer to the score, then read back the ranked view.
    pub async fn record_answer(
        &self,
        quiz_id: &QuizId,
        name: &str,
        is_correct: bool,
        time_taken: u64,
    ) -> StorageResult<LeaderboardSnapshot> {
        if is_correct {
            let delta = score_delta(time_taken);
            let score = self
                .store
                .increment_member(player_data_key(quiz_id.as_str()), name.to_owned(), delta)
                .await?;
            debug!(%quiz_id, name, delta, score, "score updated");
        }

        let entries = self.leaderboard(quiz_id).await?;
        let player_count = self
            .store
            .cardinality(player_data_key(quiz_id.as_str()))
            .await?;
        Ok(LeaderboardSnapshot {
            player_count,
            entries,
        })
    }

    /// Every player, best score first.
    pub async fn leaderboard(&self, quiz_id: &QuizId) -> StorageResult<Vec<RankedEntry>> {
        let rows = self
            .store
            .rev_range_with_scores(player_data_key(quiz_id.as_str()), LEADERBOARD_READ_LIMIT)
            .await?;
        Ok(rows
            .into_iter()
            .zip(1..)
            .map(|((name, score), rank)| RankedEntry { name, score, rank })
            .collect())
    }

    /// Player names in the store's natural order.
    pub async fn players(&self, quiz_id: &QuizId) -> StorageResult<Vec<String>> {
        self.store.members(player_data_key(quiz_id.as_str())).await
    }

    /// Delete every player entry of the quiz.
    pub async fn reset(&self, quiz_id: &QuizId) -> StorageResult<u64> {
        let removed = self
            .store
            .delete_key(player_data_key(quiz_id.as_str()))
            .await?;
        debug!(%quiz_id, removed, "player data reset");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::{
        quiz_store::{failing::FailingQuizStore, memory::MemoryQuizStore},
        storage::StorageError,
    };

    fn engine() -> LeaderboardEngine {
        LeaderboardEngine::new(Arc::new(MemoryQuizStore::new()))
    }

    fn quiz() -> QuizId {
        QuizId::new("quiz_20000")
    }

    fn entry(name: &str, score: i64, rank: u64) -> RankedEntry {
        RankedEntry {
            name: name.into(),
            score,
            rank,
        }
    }

    #[test]
    fn faster_answers_score_more() {
        assert_eq!(score_delta(0), 11_000);
        assert_eq!(score_delta(500), 10_500);
        assert_eq!(score_delta(11_000), 0);
        assert_eq!(score_delta(12_000), -1_000);
    }

    #[tokio::test]
    async fn correct_answers_accumulate() {
        let engine = engine();
        engine.join(&quiz(), "Alice").await.unwrap();

        let snapshot = engine.record_answer(&quiz(), "Alice", true, 500).await.unwrap();
        assert_eq!(snapshot.entries, vec![entry("Alice", 10_500, 1)]);

        let snapshot = engine.record_answer(&quiz(), "Alice", true, 200).await.unwrap();
        assert_eq!(snapshot.entries, vec![entry("Alice", 21_300, 1)]);
        assert_eq!(snapshot.player_count, 1);
    }

    #[tokio::test]
    async fn wrong_answers_leave_scores_untouched() {
        let engine = engine();
        engine.join(&quiz(), "Alice").await.unwrap();
        let snapshot = engine.record_answer(&quiz(), "Alice", false, 10).await.unwrap();
        assert_eq!(snapshot.entries, vec![entry("Alice", 0, 1)]);
    }

    #[tokio::test]
    async fn slow_correct_answer_lowers_score() {
        let engine = engine();
        engine.join(&quiz(), "Alice").await.unwrap();
        let snapshot = engine
            .record_answer(&quiz(), "Alice", true, 12_500)
            .await
            .unwrap();
        assert_eq!(snapshot.entries, vec![entry("Alice", -1_500, 1)]);
    }

    #[tokio::test]
    async fn answer_without_join_creates_the_player() {
        let engine = engine();
        let snapshot = engine.record_answer(&quiz(), "Bob", true, 1_000).await.unwrap();
        assert_eq!(snapshot.player_count, 1);
        assert_eq!(snapshot.entries, vec![entry("Bob", 10_000, 1)]);
    }

    #[tokio::test]
    async fn leaderboard_ranks_by_descending_score() {
        let engine = engine();
        engine.join(&quiz(), "Bob").await.unwrap();
        engine.join(&quiz(), "Alice").await.unwrap();
        engine.record_answer(&quiz(), "Alice", true, 500).await.unwrap();
        engine.record_answer(&quiz(), "Alice", true, 200).await.unwrap();
        let snapshot = engine.record_answer(&quiz(), "Bob", true, 2_000).await.unwrap();

        assert_eq!(snapshot.player_count, 2);
        assert_eq!(
            snapshot.entries,
            vec![entry("Alice", 21_300, 1), entry("Bob", 9_000, 2)]
        );
    }

    #[tokio::test]
    async fn rejoin_resets_score() {
        let engine = engine();
        engine.join(&quiz(), "Alice").await.unwrap();
        engine.record_answer(&quiz(), "Alice", true, 100).await.unwrap();
        engine.join(&quiz(), "Alice").await.unwrap();
        assert_eq!(
            engine.leaderboard(&quiz()).await.unwrap(),
            vec![entry("Alice", 0, 1)]
        );
    }

    #[tokio::test]
    async fn reset_drops_every_player() {
        let engine = engine();
        engine.join(&quiz(), "Alice").await.unwrap();
        engine.join(&quiz(), "Bob").await.unwrap();
        assert_eq!(engine.reset(&quiz()).await.unwrap(), 1);
        assert!(engine.players(&quiz()).await.unwrap().is_empty());
        assert_eq!(engine.reset(&quiz()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn quizzes_do_not_share_players() {
        let engine = engine();
        engine.join(&quiz(), "Alice").await.unwrap();
        engine.join(&QuizId::new("quiz_60000"), "Bob").await.unwrap();
        assert_eq!(engine.players(&quiz()).await.unwrap(), vec!["Alice"]);
    }

    #[tokio::test]
    async fn store_failures_are_returned_not_swallowed() {
        let engine = LeaderboardEngine::new(Arc::new(FailingQuizStore));
        assert!(matches!(
            engine.join(&quiz(), "Alice").await,
            Err(StorageError::Unavailable { .. })
        ));
        assert!(
            engine
                .record_answer(&quiz(), "Alice", true, 500)
                .await
                .is_err()
        );
        // Wrong answers still read the leaderboard back.
        assert!(
            engine
                .record_answer(&quiz(), "Alice", false, 500)
                .await
                .is_err()
        );
    }
}
