use serde::Serialize;
use utoipa::ToSchema;

/// Coarse service health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// The store answers.
    Ok,
    /// The store probe failed.
    Degraded,
}

/// Payload of the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Overall status.
    pub status: HealthStatus,
    /// Why the store probe failed, when it did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl HealthResponse {
    /// The store answered its probe.
    pub fn healthy() -> Self {
        Self {
            status: HealthStatus::Ok,
            reason: None,
        }
    }

    /// The store probe failed with `reason`.
    pub fn store_unreachable(reason: String) -> Self {
        Self {
            status: HealthStatus::Degraded,
            reason: Some(reason),
        }
    }
}
