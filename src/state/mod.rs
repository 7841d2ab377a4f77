/// Player membership and scoring.
pub mod leaderboard;
/// Quiz codes, ids, actions and status.
pub mod quiz;
/// Session token strategies.
pub mod session;
/// Quiz lifecycle flags.
pub mod state_machine;

use std::sync::Arc;

use crate::{
    config::{AppConfig, TokenStrategy},
    dao::quiz_store::QuizStore,
};

use self::{
    leaderboard::LeaderboardEngine,
    session::{CodeDerivedSessionTokens, RandomSessionTokens, SessionTokens},
    state_machine::QuizStateMachine,
};

/// Handle to the application state shared by every route.
pub type SharedState = Arc<AppState>;

/// Central application state: configuration plus the components built over the injected store.
///
/// No quiz data lives here; every request goes to the store.
pub struct AppState {
    config: AppConfig,
    store: Arc<dyn QuizStore>,
    quizzes: QuizStateMachine,
    leaderboard: LeaderboardEngine,
    tokens: Arc<dyn SessionTokens>,
}

impl AppState {
    /// Wire the components over `store`, picking the session token strategy from `config`.
    pub fn new(config: AppConfig, store: Arc<dyn QuizStore>) -> SharedState {
        let tokens: Arc<dyn SessionTokens> = match config.session_tokens {
            TokenStrategy::Random => Arc::new(RandomSessionTokens),
            TokenStrategy::CodeDerived => Arc::new(CodeDerivedSessionTokens),
        };
        Self::with_tokens(config, store, tokens)
    }

    /// Same as [`AppState::new`] with an explicit token strategy.
    pub fn with_tokens(
        config: AppConfig,
        store: Arc<dyn QuizStore>,
        tokens: Arc<dyn SessionTokens>,
    ) -> SharedState {
        let leaderboard = LeaderboardEngine::new(store.clone());
        let quizzes = QuizStateMachine::new(store.clone(), leaderboard.clone());
        Arc::new(Self {
            config,
            store,
            quizzes,
            leaderboard,
            tokens,
        })
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Store handle, used directly only for health probes.
    pub fn store(&self) -> &Arc<dyn QuizStore> {
        &self.store
    }

    /// Quiz lifecycle component.
    pub fn quizzes(&self) -> &QuizStateMachine {
        &self.quizzes
    }

    /// Membership and scoring component.
    pub fn leaderboard(&self) -> &LeaderboardEngine {
        &self.leaderboard
    }

    /// Session token strategy.
    pub fn tokens(&self) -> &dyn SessionTokens {
        self.tokens.as_ref()
    }
}
