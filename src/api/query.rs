use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::types::TextQueryRequest;
use crate::error::VoxgateError;
use crate::normalize::{self, Query};
use crate::server::state::AppState;

/// POST /api/query - Run a text query through the filter pipeline.
///
/// Returns plain text: either the canned block message or the generator's
/// response. Payload validation happens before any filter logic.
pub async fn handler(
    State(state): State<AppState>,
    Json(request): Json<TextQueryRequest>,
) -> Response {
    if request.text.trim().is_empty() {
        return VoxgateError::InvalidInput("text must not be empty".to_string()).into();
    }

    let query = Query::Text(request.text);
    let normalized = match normalize::normalize(state.transcriber.as_ref(), &query).await {
        Ok(n) => n,
        Err(e) => return e.into(),
    };
    let response = state
        .pipeline
        .handle(query.modality(), &normalized.text)
        .await;

    response.text.into_response()
}
