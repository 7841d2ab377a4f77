use uuid::Uuid;

use crate::state::quiz::QuizCode;

/// Multiplier used by clients that still expect code-derived tokens.
const LEGACY_TOKEN_FACTOR: u64 = 1232;

/// Issues the token a joining client echoes back with each answer.
pub trait SessionTokens: Send + Sync {
    /// Produce a token for a join on `code`.
    fn issue(&self, code: QuizCode) -> String;
}

/// Random per-join tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSessionTokens;

impl SessionTokens for RandomSessionTokens {
    fn issue(&self, _code: QuizCode) -> String {
        format!("session_{}", Uuid::new_v4().simple())
    }
}

/// Deterministic `session_id_<code * 1232>` tokens; every join on a code gets the same one.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeDerivedSessionTokens;

impl SessionTokens for CodeDerivedSessionTokens {
    fn issue(&self, code: QuizCode) -> String {
        format!(
            "session_id_{}",
            code.value().wrapping_mul(LEGACY_TOKEN_FACTOR)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_derived_tokens_match_legacy_clients() {
        let code = QuizCode::admit(20_000).unwrap();
        assert_eq!(
            CodeDerivedSessionTokens.issue(code),
            "session_id_24640000"
        );
    }

    #[test]
    fn random_tokens_differ_between_joins() {
        let code = QuizCode::admit(20_000).unwrap();
        let first = RandomSessionTokens.issue(code);
        let second = RandomSessionTokens.issue(code);
        assert!(first.starts_with("session_"));
        assert_ne!(first, second);
    }
}
