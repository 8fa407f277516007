#[derive(Debug, thiserror::Error)]
pub enum VoxgateError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Normalization failed: {0}")]
    Normalization(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, VoxgateError>;

impl From<VoxgateError> for axum::response::Response {
    fn from(err: VoxgateError) -> Self {
        use axum::http::StatusCode;
        use axum::response::IntoResponse;

        let (status, message) = match &err {
            VoxgateError::InvalidInput(_) => (StatusCode::BAD_REQUEST, err.to_string()),
            // The speech-to-text collaborator is an upstream dependency;
            // its failures surface as a gateway error with no internal detail.
            VoxgateError::Normalization(_) => (
                StatusCode::BAD_GATEWAY,
                "Failed to process audio input".to_string(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::Response;

    #[test]
    fn test_invalid_input_maps_to_400() {
        let resp: Response = VoxgateError::InvalidInput("missing text".into()).into();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_normalization_maps_to_502() {
        let resp: Response = VoxgateError::Normalization("empty transcription".into()).into();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_other_errors_map_to_500() {
        let resp: Response = VoxgateError::Server("boom".into()).into();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
