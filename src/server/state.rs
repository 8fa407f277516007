use std::sync::Arc;

use crate::audit::AuditLog;
use crate::config::VoxgateConfig;
use crate::normalize::Transcriber;
use crate::pipeline::Pipeline;

/// Shared application state accessible to all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub transcriber: Arc<dyn Transcriber>,
    pub audit: Arc<AuditLog>,
    pub config: Arc<VoxgateConfig>,
}

impl AppState {
    pub fn new(
        pipeline: Arc<Pipeline>,
        transcriber: Arc<dyn Transcriber>,
        audit: Arc<AuditLog>,
        config: Arc<VoxgateConfig>,
    ) -> Self {
        Self {
            pipeline,
            transcriber,
            audit,
            config,
        }
    }
}
