use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::quiz::{ManageQuizRequest, ManageQuizResponse, QuizStatusQuery, QuizStatusResponse},
    error::AppError,
    services::quiz_service,
    state::{SharedState, state_machine::Transition},
};

/// Host routes driving the quiz lifecycle.
///
/// The four lifecycle paths share one handler; the `action` field of the body decides.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/v1/activate", post(manage_quiz))
        .route("/api/v1/start", post(manage_quiz))
        .route("/api/v1/finish", post(manage_quiz))
        .route("/api/v1/destroy", post(manage_quiz))
        .route("/api/v1/status", get(quiz_status))
}

/// Apply a lifecycle action (`activate`, `start`, `finish` or `destroy`).
///
/// Also mounted on `/api/v1/start`, `/api/v1/finish` and `/api/v1/destroy`.
#[utoipa::path(
    post,
    path = "/api/v1/activate",
    tag = "quiz",
    request_body = ManageQuizRequest,
    responses(
        (status = 201, description = "Flag set", body = ManageQuizResponse),
        (status = 200, description = "Finish or destroy applied", body = ManageQuizResponse),
        (status = 409, description = "Flag was already set", body = ManageQuizResponse),
        (status = 400, description = "Unknown action or malformed body"),
        (status = 404, description = "Quiz code not eligible")
    )
)]
pub async fn manage_quiz(
    State(state): State<SharedState>,
    payload: Result<Json<ManageQuizRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ManageQuizResponse>), AppError> {
    let Json(request) = payload?;
    let (transition, response) = quiz_service::manage_quiz(&state, request).await?;
    let status = match transition {
        Transition::Set => StatusCode::CREATED,
        Transition::AlreadySet => StatusCode::CONFLICT,
        Transition::Removed(_) => StatusCode::OK,
    };
    Ok((status, Json(response)))
}

/// Read the flags and player names of a quiz.
#[utoipa::path(
    get,
    path = "/api/v1/status",
    tag = "quiz",
    params(QuizStatusQuery),
    responses(
        (status = 200, description = "Current quiz status", body = QuizStatusResponse),
        (status = 400, description = "Missing or empty id")
    )
)]
pub async fn quiz_status(
    State(state): State<SharedState>,
    query: Result<Query<QuizStatusQuery>, QueryRejection>,
) -> Result<Json<QuizStatusResponse>, AppError> {
    let Query(query) = query?;
    Ok(Json(quiz_service::quiz_status(&state, query.id).await?))
}
