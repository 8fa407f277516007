use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Response};

use crate::error::VoxgateError;
use crate::normalize::{self, Query};
use crate::server::state::AppState;

/// POST /api/query/audio - Run an audio query through the filter pipeline.
///
/// The upload is materialized as a temp file scoped to this request (RAII
/// cleanup on every exit path), transcribed, and the transcript goes through
/// the same pipeline as a text query. Normalization failures surface as a
/// gateway error with no partial response.
pub async fn handler(State(state): State<AppState>, multipart: Multipart) -> Response {
    match process(state, multipart).await {
        Ok(text) => text.into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Audio query failed");
            err.into()
        }
    }
}

async fn process(state: AppState, mut multipart: Multipart) -> crate::error::Result<String> {
    let mut audio_bytes: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        VoxgateError::InvalidInput(format!("malformed multipart payload: {e}"))
    })? {
        if field.name() == Some("audio_file") {
            let bytes = field.bytes().await.map_err(|e| {
                VoxgateError::InvalidInput(format!("failed to read audio field: {e}"))
            })?;
            audio_bytes = Some(bytes.to_vec());
            break;
        }
    }

    let audio_bytes = audio_bytes.ok_or_else(|| {
        VoxgateError::InvalidInput("missing 'audio_file' multipart field".to_string())
    })?;

    if audio_bytes.is_empty() {
        return Err(VoxgateError::InvalidInput(
            "uploaded audio file is empty".to_string(),
        ));
    }

    // NamedTempFile removes itself on drop, including on error returns.
    let tmp = tempfile::Builder::new()
        .prefix("voxgate-audio-")
        .suffix(".wav")
        .tempfile()?;
    tokio::fs::write(tmp.path(), &audio_bytes).await?;

    let query = Query::Audio(tmp.path().to_path_buf());
    let normalized = normalize::normalize(state.transcriber.as_ref(), &query).await?;
    let response = state
        .pipeline
        .handle(query.modality(), &normalized.text)
        .await;

    Ok(response.text)
}
