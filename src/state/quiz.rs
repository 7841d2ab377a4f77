use std::{fmt, str::FromStr};

use serde::Serialize;
use thiserror::Error;

/// Codes below this value must be a multiple of [`CODE_STRIDE`] to be admitted.
pub const OPEN_CODE_FLOOR: u64 = 50_000;
/// Stride of the reserved code range below [`OPEN_CODE_FLOOR`].
pub const CODE_STRIDE: u64 = 10_000;

/// Externally supplied quiz code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuizCode(u64);

/// Raised when a code falls outside the admitted ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("quiz code {0} is not eligible")]
pub struct IneligibleCode(pub u64);

impl QuizCode {
    /// Admit `code` when it is a multiple of 10000 or at least 50000.
    pub fn admit(code: u64) -> Result<Self, IneligibleCode> {
        if code % CODE_STRIDE == 0 || code >= OPEN_CODE_FLOOR {
            Ok(Self(code))
        } else {
            Err(IneligibleCode(code))
        }
    }

    /// Raw numeric value.
    pub fn value(self) -> u64 {
        self.0
    }

    /// Derived `quiz_<code>` handle.
    pub fn quiz_id(self) -> QuizId {
        QuizId(format!("quiz_{}", self.0))
    }
}

impl fmt::Display for QuizCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Primary handle for lifecycle and leaderboard operations.
///
/// Ids coming back from clients are taken as-is; there is no "unknown quiz"
/// signal, reads against an id that never existed just come back empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct QuizId(String);

impl QuizId {
    /// Wrap an id received from a client.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuizId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<QuizId> for String {
    fn from(value: QuizId) -> Self {
        value.0
    }
}

/// Lifecycle actions a host can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizAction {
    /// Open the quiz for players and wipe previous scores.
    Activate,
    /// Mark the quiz as running.
    Start,
    /// Stop the running quiz; it can be started again later.
    Finish,
    /// Forget the quiz and all of its players.
    Destroy,
}

/// Raised when an action name is not one of the four lifecycle actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized quiz action `{0}`")]
pub struct UnknownAction(pub String);

impl FromStr for QuizAction {
    type Err = UnknownAction;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "activate" => Ok(QuizAction::Activate),
            "start" => Ok(QuizAction::Start),
            "finish" => Ok(QuizAction::Finish),
            "destroy" => Ok(QuizAction::Destroy),
            other => Err(UnknownAction(other.to_owned())),
        }
    }
}

impl fmt::Display for QuizAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuizAction::Activate => "activate",
            QuizAction::Start => "start",
            QuizAction::Finish => "finish",
            QuizAction::Destroy => "destroy",
        };
        f.write_str(name)
    }
}

/// Flags and members of a quiz as currently seen in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizStatus {
    /// Accepting players.
    pub active: bool,
    /// Running.
    pub started: bool,
    /// Registered player names, lowest score first.
    pub players: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admits_multiples_of_ten_thousand_and_open_range() {
        assert!(QuizCode::admit(0).is_ok());
        assert!(QuizCode::admit(20_000).is_ok());
        assert!(QuizCode::admit(50_000).is_ok());
        assert!(QuizCode::admit(50_001).is_ok());
        assert_eq!(QuizCode::admit(12_345), Err(IneligibleCode(12_345)));
        assert_eq!(QuizCode::admit(49_999), Err(IneligibleCode(49_999)));
    }

    #[test]
    fn quiz_id_is_prefixed_code() {
        let code = QuizCode::admit(20_000).unwrap();
        assert_eq!(code.quiz_id().as_str(), "quiz_20000");
    }

    #[test]
    fn actions_parse_from_wire_names() {
        for action in [
            QuizAction::Activate,
            QuizAction::Start,
            QuizAction::Finish,
            QuizAction::Destroy,
        ] {
            assert_eq!(action.to_string().parse::<QuizAction>(), Ok(action));
        }
        assert_eq!(
            "pause".parse::<QuizAction>(),
            Err(UnknownAction("pause".into()))
        );
    }
}
