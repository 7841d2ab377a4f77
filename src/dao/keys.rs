//! Key layout used in the external store.
//!
//! The shapes are kept byte-compatible with already deployed databases.

/// Hash field set while a quiz is accepting players.
pub const ACTIVE_FIELD: &str = "active";
/// Hash field set while a quiz is running.
pub const STARTED_FIELD: &str = "start";

/// Key of the flags hash for a quiz id (`quiz_<code>`).
pub fn flags_key(quiz_id: &str) -> String {
    quiz_id.to_owned()
}

/// Key of the ranked player collection for a quiz id.
pub fn player_data_key(quiz_id: &str) -> String {
    format!("Quiz:{quiz_id}:playerData")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_data_key_is_namespaced_by_quiz() {
        assert_eq!(player_data_key("quiz_20000"), "Quiz:quiz_20000:playerData");
        assert_eq!(flags_key("quiz_20000"), "quiz_20000");
    }
}
