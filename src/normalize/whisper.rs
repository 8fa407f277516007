//! HTTP speech-to-text collaborator
//!
//! Client for an OpenAI-compatible transcription endpoint
//! (`POST {base_url}/v1/audio/transcriptions`), as served by whisper-server
//! and similar local deployments. The audio file is uploaded as multipart
//! form data; the response is JSON with a `text` field.

use std::path::Path;
use std::sync::OnceLock;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::TranscriberConfig;
use crate::error::{Result, VoxgateError};

use super::Transcriber;

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Whisper-style HTTP transcription backend.
pub struct WhisperHttp {
    base_url: String,
    model: String,
    // Shared handle, built once on first use; race-safe under concurrent
    // first requests.
    client: OnceLock<reqwest::Client>,
}

impl WhisperHttp {
    pub fn new(config: &TranscriberConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            client: OnceLock::new(),
        }
    }

    fn client(&self) -> &reqwest::Client {
        self.client.get_or_init(reqwest::Client::new)
    }
}

#[async_trait]
impl Transcriber for WhisperHttp {
    fn name(&self) -> &str {
        "whisper-http"
    }

    async fn transcribe(&self, audio: &Path) -> Result<String> {
        let bytes = tokio::fs::read(audio).await.map_err(|e| {
            VoxgateError::Normalization(format!(
                "failed to read audio file {}: {e}",
                audio.display()
            ))
        })?;

        let file_name = audio
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio.wav".to_string());

        let form = reqwest::multipart::Form::new()
            .text("model", self.model.clone())
            .part(
                "file",
                reqwest::multipart::Part::bytes(bytes).file_name(file_name),
            );

        let url = format!("{}/v1/audio/transcriptions", self.base_url);
        tracing::debug!(url = %url, model = %self.model, "Requesting transcription");

        let response = self.client().post(&url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VoxgateError::Normalization(format!(
                "transcription server returned {status}: {body}"
            )));
        }

        let parsed: TranscriptionResponse = response.json().await?;
        Ok(parsed.text)
    }
}
