use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::post,
};
use validator::Validate;

use crate::{
    dto::player::{JoinRequest, JoinResponse, RecordAnswerRequest, RecordAnswerResponse},
    error::AppError,
    services::player_service,
    state::SharedState,
};

/// Student routes: joining and answering.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/v1/join", post(join_quiz))
        .route("/api/v1/record", post(record_answer))
}

/// Join a quiz; the player is registered right after the response is produced.
#[utoipa::path(
    post,
    path = "/api/v1/join",
    tag = "player",
    request_body = JoinRequest,
    responses(
        (status = 201, description = "Joined", body = JoinResponse),
        (status = 404, description = "Quiz code not eligible")
    )
)]
pub async fn join_quiz(
    State(state): State<SharedState>,
    payload: Result<Json<JoinRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<JoinResponse>), AppError> {
    let Json(request) = payload?;
    request.validate()?;
    let outcome = player_service::join_quiz(&state, request).await?;
    Ok((StatusCode::CREATED, Json(outcome.response)))
}

/// Record an answer and return the updated leaderboard.
#[utoipa::path(
    post,
    path = "/api/v1/record",
    tag = "player",
    request_body = RecordAnswerRequest,
    responses((status = 200, description = "Answer recorded", body = RecordAnswerResponse))
)]
pub async fn record_answer(
    State(state): State<SharedState>,
    payload: Result<Json<RecordAnswerRequest>, JsonRejection>,
) -> Result<Json<RecordAnswerResponse>, AppError> {
    let Json(request) = payload?;
    request.validate()?;
    Ok(Json(player_service::record_answer(&state, request).await?))
}
