pub mod router;
pub mod state;

use std::sync::Arc;

use crate::audit::AuditLog;
use crate::backend::ollama::OllamaBackend;
use crate::config::VoxgateConfig;
use crate::dirs;
use crate::error::{Result, VoxgateError};
use crate::filter::KeywordFilter;
use crate::normalize::whisper::WhisperHttp;
use crate::pipeline::Pipeline;

/// Start the HTTP server with the given configuration.
pub async fn start(config: VoxgateConfig) -> Result<()> {
    dirs::ensure_dirs()?;

    // Denylist is loaded once here and immutable for the process lifetime.
    let filter = KeywordFilter::new(&config.denylist);
    tracing::info!(phrases = filter.len(), "Loaded denylist");

    let audit = Arc::new(AuditLog::new(config.audit_capacity));
    let generator = Arc::new(OllamaBackend::new(&config.generator));
    let transcriber = Arc::new(WhisperHttp::new(&config.transcriber));

    let pipeline = Arc::new(Pipeline::new(
        filter,
        generator,
        audit.clone(),
        config.blocked_message.clone(),
        config.apology_message.clone(),
    ));

    let bind_addr = config.bind_address();
    let app_state = state::AppState::new(pipeline, transcriber, audit, Arc::new(config));

    let app = router::build(app_state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| VoxgateError::Server(format!("Failed to bind to {bind_addr}: {e}")))?;

    tracing::info!("Server listening on {bind_addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| VoxgateError::Server(format!("Server error: {e}")))?;

    Ok(())
}
