//! Student-side operations: joining a quiz and submitting answers.

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{
    dto::player::{JoinRequest, JoinResponse, RecordAnswerRequest, RecordAnswerResponse},
    error::ServiceError,
    state::{
        SharedState,
        quiz::{QuizCode, QuizId},
    },
};

/// Response of a join plus the detached registration task.
pub struct JoinOutcome {
    /// Payload sent back to the player.
    pub response: JoinResponse,
    /// Registers the player; callers may drop it, the task keeps running.
    pub registration: JoinHandle<()>,
}

/// Admit the code, build the join response and register the player in the background.
///
/// Registration happens after the response is built and its failure is only
/// logged; the client has already been told where to fetch the questions.
pub async fn join_quiz(state: &SharedState, request: JoinRequest) -> Result<JoinOutcome, ServiceError> {
    let code = QuizCode::admit(request.code).inspect_err(|err| {
        warn!(code = request.code, error = %err, "join rejected");
    })?;
    let quiz_id = code.quiz_id();
    let session = state.tokens().issue(code);
    info!(%quiz_id, name = %request.name, "player joining");

    let response = JoinResponse {
        id: quiz_id.to_string(),
        session,
        qurl: state.config().questions_url(&quiz_id),
    };

    let leaderboard = state.leaderboard().clone();
    let name = request.name;
    let registration = tokio::spawn(async move {
        if let Err(err) = leaderboard.join(&quiz_id, &name).await {
            warn!(%quiz_id, name = %name, error = %err, "failed to register player");
        }
    });

    Ok(JoinOutcome {
        response,
        registration,
    })
}

/// Score the answer and return the leaderboard as read right after.
pub async fn record_answer(
    state: &SharedState,
    request: RecordAnswerRequest,
) -> Result<RecordAnswerResponse, ServiceError> {
    let quiz_id = QuizId::new(request.id.clone());
    let snapshot = state
        .leaderboard()
        .record_answer(&quiz_id, &request.name, request.is_correct, request.time_taken)
        .await?;
    debug!(
        %quiz_id,
        name = %request.name,
        question = %request.ques_id,
        correct = request.is_correct,
        players = snapshot.player_count,
        "answer recorded"
    );
    Ok(RecordAnswerResponse::new(request, snapshot))
}
