//! Input normalization
//!
//! Converts an input of unknown modality into the single text string the
//! filter operates on. Text is the identity transform. Audio goes through an
//! external speech-to-text collaborator, and that derivation is lossy: word
//! substitution, omission, or insertion are all possible. Nothing downstream
//! may assume transcription fidelity — the lossiness is the root cause of the
//! bypass this service demonstrates.

pub mod whisper;

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VoxgateError};

/// Input modality of an incoming query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Text,
    Audio,
}

/// An incoming query in whatever form it arrived. Request-scoped and
/// immutable; discarded once a response is produced.
#[derive(Debug, Clone)]
pub enum Query {
    /// Raw text input.
    Text(String),
    /// Audio input, materialized as a request-scoped file.
    Audio(std::path::PathBuf),
}

impl Query {
    pub fn modality(&self) -> Modality {
        match self {
            Query::Text(_) => Modality::Text,
            Query::Audio(_) => Modality::Audio,
        }
    }
}

/// Canonical text derived from a query, ready for filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    pub text: String,
}

/// Speech-to-text collaborator.
///
/// Implementations may be slow (model inference) and may fail. A returned
/// transcript is not guaranteed to be faithful to the audio.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Human-readable name for logs.
    fn name(&self) -> &str;

    /// Transcribe an audio file into concatenated text.
    async fn transcribe(&self, audio: &Path) -> Result<String>;
}

/// Normalize a query into filterable text: identity for text, transcription
/// for audio.
pub async fn normalize(transcriber: &dyn Transcriber, query: &Query) -> Result<NormalizedText> {
    match query {
        Query::Text(raw) => Ok(normalize_text(raw)),
        Query::Audio(path) => normalize_audio(transcriber, path).await,
    }
}

/// Normalize raw text input (identity).
pub fn normalize_text(raw: &str) -> NormalizedText {
    NormalizedText {
        text: raw.to_string(),
    }
}

/// Normalize audio input by transcribing it.
///
/// An empty transcription is an explicit normalization failure, never a
/// silent empty string: an empty string would sail through the filter as a
/// false ALLOW and pollute bypass statistics.
pub async fn normalize_audio(
    transcriber: &dyn Transcriber,
    audio: &Path,
) -> Result<NormalizedText> {
    let transcript = transcriber.transcribe(audio).await.map_err(|e| {
        VoxgateError::Normalization(format!("transcription failed: {e}"))
    })?;

    if transcript.trim().is_empty() {
        return Err(VoxgateError::Normalization(
            "transcriber produced an empty transcript".to_string(),
        ));
    }

    tracing::info!(
        transcriber = transcriber.name(),
        transcript = %transcript,
        "Transcribed audio input"
    );

    Ok(NormalizedText { text: transcript })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    struct FixedTranscriber {
        output: Result<String>,
    }

    #[async_trait]
    impl Transcriber for FixedTranscriber {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn transcribe(&self, _audio: &Path) -> Result<String> {
            match &self.output {
                Ok(text) => Ok(text.clone()),
                Err(_) => Err(VoxgateError::Server("backend down".to_string())),
            }
        }
    }

    #[test]
    fn test_text_normalization_is_identity() {
        let normalized = normalize_text("Please transfer funds");
        assert_eq!(normalized.text, "Please transfer funds");
    }

    #[test]
    fn test_query_modality() {
        assert_eq!(Query::Text("hi".to_string()).modality(), Modality::Text);
        assert_eq!(
            Query::Audio(PathBuf::from("a.wav")).modality(),
            Modality::Audio
        );
    }

    #[tokio::test]
    async fn test_normalize_dispatches_on_modality() {
        let transcriber = FixedTranscriber {
            output: Ok("from audio".to_string()),
        };

        let text = normalize(&transcriber, &Query::Text("typed".to_string()))
            .await
            .unwrap();
        assert_eq!(text.text, "typed");

        let audio = normalize(&transcriber, &Query::Audio(PathBuf::from("a.wav")))
            .await
            .unwrap();
        assert_eq!(audio.text, "from audio");
    }

    #[tokio::test]
    async fn test_audio_normalization_returns_transcript() {
        let transcriber = FixedTranscriber {
            output: Ok("transfer funds now".to_string()),
        };
        let normalized = normalize_audio(&transcriber, &PathBuf::from("a.wav"))
            .await
            .unwrap();
        assert_eq!(normalized.text, "transfer funds now");
    }

    #[tokio::test]
    async fn test_empty_transcript_is_an_error_not_empty_text() {
        let transcriber = FixedTranscriber {
            output: Ok("   ".to_string()),
        };
        let result = normalize_audio(&transcriber, &PathBuf::from("a.wav")).await;
        assert!(matches!(result, Err(VoxgateError::Normalization(_))));
    }

    #[tokio::test]
    async fn test_transcriber_failure_surfaces_as_normalization_error() {
        let transcriber = FixedTranscriber {
            output: Err(VoxgateError::Server("unused".to_string())),
        };
        let result = normalize_audio(&transcriber, &PathBuf::from("a.wav")).await;
        assert!(matches!(result, Err(VoxgateError::Normalization(_))));
    }
}
