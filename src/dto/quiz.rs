//! DTOs of the host-facing lifecycle and status routes.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::state::quiz::QuizStatus;

/// Lifecycle request; `action` is one of `activate`, `start`, `finish`, `destroy`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ManageQuizRequest {
    /// Numeric quiz code.
    pub code: u64,
    /// Lifecycle action name.
    pub action: String,
}

/// Outcome of a lifecycle request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ManageQuizResponse {
    /// Quiz id (`quiz_<code>`).
    pub id: String,
    /// Set when the flag was already set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Fields or keys removed by `finish`/`destroy`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed: Option<u64>,
}

/// Query of the status route.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuizStatusQuery {
    /// Quiz id as returned by activation or join (`quiz_<code>`).
    pub id: String,
}

/// Current flags and players of a quiz.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuizStatusResponse {
    /// Whether the quiz accepts players.
    pub is_active: bool,
    /// Whether the quiz is running.
    pub is_started: bool,
    /// Registered player names.
    pub players: Vec<String>,
}

impl From<QuizStatus> for QuizStatusResponse {
    fn from(status: QuizStatus) -> Self {
        Self {
            is_active: status.active,
            is_started: status.started,
            players: status.players,
        }
    }
}
