use serde::{Deserialize, Serialize};

/// POST /api/query request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextQueryRequest {
    pub text: String,
}

/// GET /api/health response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
