use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Ping the store and report whether requests can currently be served.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    match state.store().health_check().await {
        Ok(()) => HealthResponse::healthy(),
        Err(err) => {
            warn!(error = %err, "storage health check failed");
            HealthResponse::store_unreachable(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::quiz_store::{failing::FailingQuizStore, memory::MemoryQuizStore},
        dto::health::HealthStatus,
        state::AppState,
    };

    #[tokio::test]
    async fn unreachable_store_degrades_health() {
        let state = AppState::new(AppConfig::default(), Arc::new(FailingQuizStore));
        let health = health_status(&state).await;
        assert_eq!(health.status, HealthStatus::Degraded);
        assert!(health.reason.is_some_and(|reason| reason.contains("PING")));

        let state = AppState::new(AppConfig::default(), Arc::new(MemoryQuizStore::new()));
        assert_eq!(health_status(&state).await.status, HealthStatus::Ok);
    }
}
