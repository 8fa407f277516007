use serde::{Deserialize, Serialize};

use crate::dirs;
use crate::error::Result;

/// User-configurable settings for the Voxgate server and CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoxgateConfig {
    /// Host address for the HTTP server (default: 127.0.0.1)
    #[serde(default = "default_host")]
    pub host: String,

    /// Port for the HTTP server (default: 8642)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Phrases that trigger a BLOCK verdict. Matching is case-insensitive
    /// substring containment; the first phrase found (in list order) is
    /// reported as the matched keyword.
    #[serde(default = "default_denylist")]
    pub denylist: Vec<String>,

    /// Canned refusal returned when the filter blocks a query.
    #[serde(default = "default_blocked_message")]
    pub blocked_message: String,

    /// Fixed apology returned when the response generator fails.
    #[serde(default = "default_apology_message")]
    pub apology_message: String,

    /// Maximum number of audit records kept in memory.
    #[serde(default = "default_audit_capacity")]
    pub audit_capacity: usize,

    /// Response generator (chat completion) collaborator.
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Speech-to-text collaborator.
    #[serde(default)]
    pub transcriber: TranscriberConfig,
}

/// Settings for the chat-completion backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Base URL of an Ollama-compatible server.
    #[serde(default = "default_generator_url")]
    pub base_url: String,

    /// Model name passed to the chat endpoint.
    #[serde(default = "default_generator_model")]
    pub model: String,
}

/// Settings for the speech-to-text backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriberConfig {
    /// Base URL of an OpenAI-compatible transcription server
    /// (e.g. whisper-server).
    #[serde(default = "default_transcriber_url")]
    pub base_url: String,

    /// Model name passed to the transcription endpoint.
    #[serde(default = "default_transcriber_model")]
    pub model: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8642
}

fn default_denylist() -> Vec<String> {
    // The variant list with "withdraw money" is reachable by editing
    // config.toml; nothing outside this function hard-codes phrases.
    vec![
        "transfer funds".to_string(),
        "send money".to_string(),
        "wire funds".to_string(),
        "move money".to_string(),
    ]
}

fn default_blocked_message() -> String {
    "Blocked by naive security filter: Malicious keywords detected.".to_string()
}

fn default_apology_message() -> String {
    "I'm sorry, I couldn't process your request at the moment due to an internal error."
        .to_string()
}

fn default_audit_capacity() -> usize {
    1000
}

fn default_generator_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_generator_model() -> String {
    "llama3.2:latest".to_string()
}

fn default_transcriber_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_transcriber_model() -> String {
    "whisper-base".to_string()
}

impl Default for VoxgateConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            denylist: default_denylist(),
            blocked_message: default_blocked_message(),
            apology_message: default_apology_message(),
            audit_capacity: default_audit_capacity(),
            generator: GeneratorConfig::default(),
            transcriber: TranscriberConfig::default(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: default_generator_url(),
            model: default_generator_model(),
        }
    }
}

impl Default for TranscriberConfig {
    fn default() -> Self {
        Self {
            base_url: default_transcriber_url(),
            model: default_transcriber_model(),
        }
    }
}

impl VoxgateConfig {
    /// Load configuration from the default config file path.
    /// Returns default config if the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&dirs::config_path())
    }

    /// Load configuration from an explicit path.
    /// Returns default config if the file does not exist.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|e| {
                crate::error::VoxgateError::Config(format!(
                    "Failed to read config file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            let config: VoxgateConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save the current configuration to the default config file path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&dirs::config_path())
    }

    /// Save the current configuration to an explicit path.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the server bind address string (e.g., "127.0.0.1:8642").
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VoxgateConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8642);
        assert_eq!(config.denylist.len(), 4);
        assert!(config.denylist.contains(&"transfer funds".to_string()));
    }

    #[test]
    fn test_bind_address() {
        let config = VoxgateConfig::default();
        assert_eq!(config.bind_address(), "127.0.0.1:8642");
    }

    #[test]
    fn test_config_deserialize_with_custom_denylist() {
        let toml_str = r#"
            host = "0.0.0.0"
            port = 8080
            denylist = ["transfer funds", "withdraw money"]
        "#;
        let config: VoxgateConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.denylist, vec!["transfer funds", "withdraw money"]);
        // Unspecified fields fall back to defaults
        assert_eq!(config.generator.base_url, "http://localhost:11434");
    }

    #[test]
    fn test_config_serialize() {
        let config = VoxgateConfig::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        assert!(serialized.contains("denylist"));
        assert!(serialized.contains("blocked_message"));
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = VoxgateConfig::default();
        config.port = 9999;
        config.denylist = vec!["transfer funds".to_string(), "withdraw money".to_string()];
        config.save_to(&path).unwrap();

        let loaded = VoxgateConfig::load_from(&path).unwrap();
        assert_eq!(loaded.port, 9999);
        assert_eq!(loaded.denylist.len(), 2);
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = VoxgateConfig::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(loaded.port, 8642);
    }
}
