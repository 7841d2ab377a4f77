//! Quiz lifecycle flags and the transitions between them.

use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    dao::{
        keys::{ACTIVE_FIELD, STARTED_FIELD, flags_key},
        quiz_store::QuizStore,
        storage::StorageResult,
    },
    state::{
        leaderboard::LeaderboardEngine,
        quiz::{QuizAction, QuizId, QuizStatus},
    },
};

/// Result of applying a lifecycle action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// `activate`/`start` set its flag.
    Set,
    /// `activate`/`start` found its flag already set; nothing changed.
    AlreadySet,
    /// `finish`/`destroy` ran; carries the number of fields or keys removed (0 is normal).
    Removed(u64),
}

/// Per-quiz `active`/`started` flags and the transitions between them.
///
/// The two flags are independent: a quiz can be started without having been
/// activated. Nothing is cached in-process, every call goes to the store.
#[derive(Clone)]
pub struct QuizStateMachine {
    store: Arc<dyn QuizStore>,
    leaderboard: LeaderboardEngine,
}

impl QuizStateMachine {
    /// Build a state machine over `store`, resetting player data through `leaderboard`.
    pub fn new(store: Arc<dyn QuizStore>, leaderboard: LeaderboardEngine) -> Self {
        Self { store, leaderboard }
    }

    /// Dispatch a lifecycle action.
    pub async fn apply(&self, quiz_id: &QuizId, action: QuizAction) -> StorageResult<Transition> {
        let transition = match action {
            QuizAction::Activate => flag_transition(self.activate(quiz_id).await?),
            QuizAction::Start => flag_transition(self.start(quiz_id).await?),
            QuizAction::Finish => Transition::Removed(self.finish(quiz_id).await?),
            QuizAction::Destroy => Transition::Removed(self.destroy(quiz_id).await?),
        };
        info!(%quiz_id, %action, ?transition, "quiz lifecycle action applied");
        Ok(transition)
    }

    /// Set `active` if unset and wipe the leaderboard; `false` when it was already active.
    pub async fn activate(&self, quiz_id: &QuizId) -> StorageResult<bool> {
        let activated = self
            .store
            .set_field_if_absent(flags_key(quiz_id.as_str()), ACTIVE_FIELD)
            .await?;
        if activated {
            self.leaderboard.reset(quiz_id).await?;
        }
        Ok(activated)
    }

    /// Set `started` if unset; `false` when it was already started.
    pub async fn start(&self, quiz_id: &QuizId) -> StorageResult<bool> {
        self.store
            .set_field_if_absent(flags_key(quiz_id.as_str()), STARTED_FIELD)
            .await
    }

    /// Clear `started`, returning how many fields were removed.
    pub async fn finish(&self, quiz_id: &QuizId) -> StorageResult<u64> {
        self.store
            .delete_field(flags_key(quiz_id.as_str()), STARTED_FIELD)
            .await
    }

    /// Drop both flags and every player, returning how many flag keys were removed.
    pub async fn destroy(&self, quiz_id: &QuizId) -> StorageResult<u64> {
        let removed = self.store.delete_key(flags_key(quiz_id.as_str())).await?;
        self.leaderboard.reset(quiz_id).await?;
        Ok(removed)
    }

    /// Read both flags and the current members; a quiz that never existed reads as all-false.
    pub async fn status(&self, quiz_id: &QuizId) -> StorageResult<QuizStatus> {
        let key = flags_key(quiz_id.as_str());
        let active = self.store.get_flag(key.clone(), ACTIVE_FIELD).await?;
        let started = self.store.get_flag(key, STARTED_FIELD).await?;
        let players = self.leaderboard.players(quiz_id).await?;
        debug!(%quiz_id, active, started, players = players.len(), "quiz status read");
        Ok(QuizStatus {
            active,
            started,
            players,
        })
    }
}

fn flag_transition(newly_set: bool) -> Transition {
    if newly_set {
        Transition::Set
    } else {
        Transition::AlreadySet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::{
        quiz_store::{failing::FailingQuizStore, memory::MemoryQuizStore},
        storage::StorageError,
    };

    fn machine() -> (QuizStateMachine, LeaderboardEngine) {
        let store: Arc<dyn QuizStore> = Arc::new(MemoryQuizStore::new());
        let leaderboard = LeaderboardEngine::new(store.clone());
        (QuizStateMachine::new(store, leaderboard.clone()), leaderboard)
    }

    fn quiz() -> QuizId {
        QuizId::new("quiz_20000")
    }

    #[tokio::test]
    async fn second_activation_is_rejected() {
        let (sm, _) = machine();
        assert_eq!(
            sm.apply(&quiz(), QuizAction::Activate).await.unwrap(),
            Transition::Set
        );
        assert_eq!(
            sm.apply(&quiz(), QuizAction::Activate).await.unwrap(),
            Transition::AlreadySet
        );
        assert!(sm.status(&quiz()).await.unwrap().active);
    }

    #[tokio::test]
    async fn start_does_not_require_activation() {
        let (sm, _) = machine();
        assert!(sm.start(&quiz()).await.unwrap());
        let status = sm.status(&quiz()).await.unwrap();
        assert!(status.started);
        assert!(!status.active);
    }

    #[tokio::test]
    async fn finish_allows_restart() {
        let (sm, _) = machine();
        assert!(sm.start(&quiz()).await.unwrap());
        assert!(!sm.start(&quiz()).await.unwrap());
        assert_eq!(sm.finish(&quiz()).await.unwrap(), 1);
        assert_eq!(sm.finish(&quiz()).await.unwrap(), 0);
        assert!(sm.start(&quiz()).await.unwrap());
    }

    #[tokio::test]
    async fn activation_wipes_previous_players() {
        let (sm, leaderboard) = machine();
        leaderboard.join(&quiz(), "alice").await.unwrap();
        assert!(sm.activate(&quiz()).await.unwrap());
        assert!(sm.status(&quiz()).await.unwrap().players.is_empty());
    }

    #[tokio::test]
    async fn failed_activation_keeps_players() {
        let (sm, leaderboard) = machine();
        assert!(sm.activate(&quiz()).await.unwrap());
        leaderboard.join(&quiz(), "alice").await.unwrap();
        assert!(!sm.activate(&quiz()).await.unwrap());
        assert_eq!(sm.status(&quiz()).await.unwrap().players, vec!["alice"]);
    }

    #[tokio::test]
    async fn destroy_resets_to_never_existed() {
        let (sm, leaderboard) = machine();
        sm.activate(&quiz()).await.unwrap();
        sm.start(&quiz()).await.unwrap();
        leaderboard.join(&quiz(), "alice").await.unwrap();

        assert_eq!(sm.destroy(&quiz()).await.unwrap(), 1);
        assert_eq!(
            sm.status(&quiz()).await.unwrap(),
            QuizStatus {
                active: false,
                started: false,
                players: vec![],
            }
        );
        assert_eq!(sm.destroy(&quiz()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn store_failures_surface_from_every_action() {
        let store: Arc<dyn QuizStore> = Arc::new(FailingQuizStore);
        let sm = QuizStateMachine::new(store.clone(), LeaderboardEngine::new(store));

        for action in [
            QuizAction::Activate,
            QuizAction::Start,
            QuizAction::Finish,
            QuizAction::Destroy,
        ] {
            let err = sm.apply(&quiz(), action).await.unwrap_err();
            assert!(matches!(err, StorageError::Unavailable { .. }), "{action}");
        }
        assert!(sm.status(&quiz()).await.is_err());
    }
}
