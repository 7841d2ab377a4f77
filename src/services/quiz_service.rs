//! Host-side operations: lifecycle actions and status reads.

use tracing::{debug, warn};

use crate::{
    dto::quiz::{ManageQuizRequest, ManageQuizResponse, QuizStatusResponse},
    error::ServiceError,
    state::{
        SharedState,
        quiz::{QuizAction, QuizCode, QuizId},
        state_machine::Transition,
    },
};

/// Admit the code, parse the action and apply it.
///
/// A repeated `activate`/`start` is not an error: it comes back as
/// [`Transition::AlreadySet`] with the message filled in.
pub async fn manage_quiz(
    state: &SharedState,
    request: ManageQuizRequest,
) -> Result<(Transition, ManageQuizResponse), ServiceError> {
    let code = QuizCode::admit(request.code).inspect_err(|err| {
        warn!(code = request.code, action = %request.action, error = %err, "lifecycle request rejected");
    })?;
    let action = request.action.parse::<QuizAction>()?;
    let quiz_id = code.quiz_id();

    let transition = state.quizzes().apply(&quiz_id, action).await?;
    let response = match transition {
        Transition::Set => ManageQuizResponse {
            id: quiz_id.into(),
            error: None,
            removed: None,
        },
        Transition::AlreadySet => ManageQuizResponse {
            id: quiz_id.into(),
            error: Some(already_applied(action).into()),
            removed: None,
        },
        Transition::Removed(count) => ManageQuizResponse {
            id: quiz_id.into(),
            error: None,
            removed: Some(count),
        },
    };
    Ok((transition, response))
}

fn already_applied(action: QuizAction) -> &'static str {
    match action {
        QuizAction::Activate => "Already activated!",
        QuizAction::Start => "Already started!",
        QuizAction::Finish | QuizAction::Destroy => "Already applied!",
    }
}

/// Read the flags and players of `id`; unknown ids read as inactive and empty.
pub async fn quiz_status(state: &SharedState, id: String) -> Result<QuizStatusResponse, ServiceError> {
    if id.trim().is_empty() {
        return Err(ServiceError::InvalidInput("quiz id must not be empty".into()));
    }
    let quiz_id = QuizId::new(id);
    let status = state.quizzes().status(&quiz_id).await?;
    debug!(%quiz_id, "status served");
    Ok(status.into())
}
