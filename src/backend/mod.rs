//! Response generation
//!
//! The generator is the collaborator invoked only after the filter allows a
//! query. It may be slow (model inference) and may fail; the pipeline owns
//! recovery, so implementations just propagate errors.

pub mod ollama;

use async_trait::async_trait;

use crate::error::Result;

/// Chat-completion collaborator.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Human-readable name for logs.
    fn name(&self) -> &str;

    /// Generate a free-form response to a single user query.
    /// No retry policy: one failed call is a failed request.
    async fn generate(&self, text: &str) -> Result<String>;
}
