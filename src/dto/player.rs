//! DTOs of the student-facing join and answer routes.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::state::leaderboard::{LeaderboardSnapshot, RankedEntry};

/// Join request; older clients send capitalised keys.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct JoinRequest {
    /// Numeric quiz code.
    #[serde(alias = "Code")]
    pub code: u64,
    /// Player name; must not be empty.
    #[serde(alias = "Name")]
    #[validate(length(min = 1))]
    pub name: String,
}

/// Handles a player needs for the rest of the quiz.
#[derive(Debug, Serialize, ToSchema)]
pub struct JoinResponse {
    /// Quiz id to send with every answer.
    pub id: String,
    /// Session token to echo back.
    pub session: String,
    /// Where the question set for this quiz is served.
    pub qurl: String,
}

/// A single answer submitted by a player.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RecordAnswerRequest {
    /// Quiz id returned by the join.
    #[validate(length(min = 1))]
    pub id: String,
    /// Session token returned by the join.
    pub session: String,
    /// Question being answered.
    pub ques_id: String,
    /// Player name.
    #[validate(length(min = 1))]
    pub name: String,
    /// Whether the answer was right.
    pub is_correct: bool,
    /// Time spent answering; faster answers score more.
    pub time_taken: u64,
}

/// Leaderboard row.
#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardEntry {
    /// Player name.
    pub name: String,
    /// Accumulated score.
    pub score: i64,
    /// 1-based position.
    pub rank: u64,
}

impl From<RankedEntry> for LeaderboardEntry {
    fn from(entry: RankedEntry) -> Self {
        Self {
            name: entry.name,
            score: entry.score,
            rank: entry.rank,
        }
    }
}

/// Echo of the submission with the freshly read leaderboard.
#[derive(Debug, Serialize, ToSchema)]
pub struct RecordAnswerResponse {
    /// Echoed quiz id.
    pub id: String,
    /// Echoed session token.
    pub session: String,
    /// Echoed question id.
    pub ques_id: String,
    /// Number of registered players.
    pub player_count: u64,
    /// Every player, best score first.
    pub leaderboard: Vec<LeaderboardEntry>,
}

impl RecordAnswerResponse {
    /// Combine the request echo with a leaderboard snapshot.
    pub fn new(request: RecordAnswerRequest, snapshot: LeaderboardSnapshot) -> Self {
        Self {
            id: request.id,
            session: request.session,
            ques_id: request.ques_id,
            player_count: snapshot.player_count,
            leaderboard: snapshot.entries.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_must_be_non_empty_but_have_no_upper_bound() {
        let join = |name: String| JoinRequest { code: 20_000, name };
        assert!(join(String::new()).validate().is_err());
        assert!(join("A".repeat(500)).validate().is_ok());

        let request: JoinRequest =
            serde_json::from_str(r#"{"Code": 20000, "Name": "Alice"}"#).unwrap();
        assert_eq!(request.code, 20_000);
        assert_eq!(request.name, "Alice");
    }
}
