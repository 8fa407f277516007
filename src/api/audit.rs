use axum::extract::State;
use axum::Json;

use crate::audit::QueryRecord;
use crate::server::state::AppState;

/// GET /api/audit - Audit records, oldest first.
///
/// Read-only view for the evaluation harness: the normalized text each query
/// was filtered on, the verdict, and how the request ended.
pub async fn handler(State(state): State<AppState>) -> Json<Vec<QueryRecord>> {
    Json(state.audit.records())
}
