use axum::Json;

use crate::api::types::HealthResponse;

/// GET /api/health - Static liveness check; exercises no dependencies.
pub async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
