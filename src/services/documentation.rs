use utoipa::OpenApi;

#[derive(OpenApi)]
/// OpenAPI document of every live quiz route.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::quiz::manage_quiz,
        crate::routes::quiz::quiz_status,
        crate::routes::player::join_quiz,
        crate::routes::player::record_answer,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::health::HealthStatus,
            crate::dto::quiz::ManageQuizRequest,
            crate::dto::quiz::ManageQuizResponse,
            crate::dto::quiz::QuizStatusResponse,
            crate::dto::player::JoinRequest,
            crate::dto::player::JoinResponse,
            crate::dto::player::RecordAnswerRequest,
            crate::dto::player::RecordAnswerResponse,
            crate::dto::player::LeaderboardEntry,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "quiz", description = "Quiz lifecycle driven by the host"),
        (name = "player", description = "Joining and answering as a student"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/healthcheck",
            "/api/v1/activate",
            "/api/v1/status",
            "/api/v1/join",
            "/api/v1/record",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
