use axum::Router;

use crate::state::SharedState;

/// Swagger UI.
pub mod docs;
/// Store health probe.
pub mod health;
/// Join and answer routes.
pub mod player;
/// Lifecycle and status routes.
pub mod quiz;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(quiz::router())
        .merge(player::router());

    api_router.merge(docs::router()).with_state(state)
}
