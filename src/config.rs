//! Layered configuration for llm-sim.
//!
//! Settings come from `.llm-sim/config.toml` in the project directory, then
//! environment variables, then CLI flags, each layer overriding the previous.
//!
//! # Configuration File Format
//!
//! ```toml
//! [model]
//! name = "gemini-3-pro-preview"
//! endpoint = "https://generativelanguage.googleapis.com"
//! # request_timeout_secs = 120
//!
//! [progress]
//! building_context_after_ms = 1500
//! reasoning_after_ms = 3000
//! ```
//!
//! The credential is never read from the file. It comes from `LLM_SIM_API_KEY`,
//! falling back to `API_KEY`; a `.env` file is loaded into the environment at
//! startup. A missing credential is sent as an empty key and left for the
//! service to reject.

use crate::errors::ConfigError;
use crate::orchestrator::ProgressSchedule;
use crate::prompt::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_DIR: &str = ".llm-sim";
pub const CONFIG_FILE: &str = "config.toml";

pub const ENV_API_KEY: &str = "LLM_SIM_API_KEY";
pub const ENV_API_KEY_FALLBACK: &str = "API_KEY";
pub const ENV_MODEL: &str = "LLM_SIM_MODEL";
pub const ENV_ENDPOINT: &str = "LLM_SIM_ENDPOINT";

/// Hosted model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSection {
    /// Model identifier
    #[serde(default = "default_model")]
    pub name: String,
    /// Base URL of the generation API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Optional request timeout; unset means wait indefinitely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for ModelSection {
    fn default() -> Self {
        Self {
            name: default_model(),
            endpoint: default_endpoint(),
            request_timeout_secs: None,
        }
    }
}

/// Timing of the cosmetic progress stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSection {
    #[serde(default = "default_building_context_after_ms")]
    pub building_context_after_ms: u64,
    #[serde(default = "default_reasoning_after_ms")]
    pub reasoning_after_ms: u64,
}

fn default_building_context_after_ms() -> u64 {
    1500
}

fn default_reasoning_after_ms() -> u64 {
    3000
}

impl Default for ProgressSection {
    fn default() -> Self {
        Self {
            building_context_after_ms: default_building_context_after_ms(),
            reasoning_after_ms: default_reasoning_after_ms(),
        }
    }
}

impl ProgressSection {
    pub fn schedule(&self) -> ProgressSchedule {
        ProgressSchedule {
            building_context_after: Duration::from_millis(self.building_context_after_ms),
            reasoning_after: Duration::from_millis(self.reasoning_after_ms),
        }
    }
}

/// The complete config.toml structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimToml {
    #[serde(default)]
    pub model: ModelSection,
    #[serde(default)]
    pub progress: ProgressSection,
}

impl SimToml {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load `config.toml` from `config_dir`, or defaults if it doesn't exist.
    pub fn load_or_default(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validate the configuration and return any warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.model.name.trim().is_empty() {
            warnings.push("Model name is empty".to_string());
        }

        if !is_http_url(&self.model.endpoint) {
            warnings.push(format!(
                "Invalid endpoint '{}': should start with http:// or https://",
                self.model.endpoint
            ));
        }

        if self.model.request_timeout_secs == Some(0) {
            warnings.push("request_timeout_secs = 0 would fail every request".to_string());
        }

        if self.progress.reasoning_after_ms <= self.progress.building_context_after_ms {
            warnings.push(format!(
                "reasoning_after_ms ({}) should be later than building_context_after_ms ({})",
                self.progress.reasoning_after_ms, self.progress.building_context_after_ms
            ));
        }

        warnings
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Effective configuration: config.toml merged with environment and CLI.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Path to the project directory
    pub project_dir: PathBuf,
    /// Path to the .llm-sim directory
    pub config_dir: PathBuf,
    /// Parsed config.toml
    pub toml: SimToml,
    /// CLI override: verbose mode
    pub verbose: bool,
    /// CLI override for the model
    pub cli_model: Option<String>,
    /// CLI override for the endpoint
    pub cli_endpoint: Option<String>,
}

impl SimConfig {
    pub fn new(project_dir: PathBuf) -> Result<Self, ConfigError> {
        let config_dir = project_dir.join(CONFIG_DIR);
        let toml = SimToml::load_or_default(&config_dir)?;

        Ok(Self {
            project_dir,
            config_dir,
            toml,
            verbose: false,
            cli_model: None,
            cli_endpoint: None,
        })
    }

    /// Create a SimConfig with CLI overrides.
    pub fn with_cli_args(
        project_dir: PathBuf,
        verbose: bool,
        model: Option<String>,
        endpoint: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::new(project_dir)?;
        config.verbose = verbose;
        config.cli_model = model;
        config.cli_endpoint = endpoint;
        Ok(config)
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    /// Model identifier (CLI → env → file → default).
    pub fn model(&self) -> String {
        self.cli_model
            .clone()
            .or_else(|| env_non_empty(ENV_MODEL))
            .unwrap_or_else(|| self.toml.model.name.clone())
    }

    /// API base URL (CLI → env → file → default).
    pub fn endpoint(&self) -> String {
        self.cli_endpoint
            .clone()
            .or_else(|| env_non_empty(ENV_ENDPOINT))
            .unwrap_or_else(|| self.toml.model.endpoint.clone())
    }

    /// Credential from the environment, empty when unset.
    pub fn api_key(&self) -> String {
        env_non_empty(ENV_API_KEY)
            .or_else(|| env_non_empty(ENV_API_KEY_FALLBACK))
            .unwrap_or_default()
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.toml.model.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn progress_schedule(&self) -> ProgressSchedule {
        self.toml.progress.schedule()
    }

    /// Validate configuration and return warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = self.toml.validate();
        if let Some(endpoint) = &self.cli_endpoint
            && !is_http_url(endpoint)
        {
            warnings.push(format!(
                "Invalid endpoint '{}': should start with http:// or https://",
                endpoint
            ));
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Run `f` with the given variables set and all other llm-sim variables cleared.
    fn with_env<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let keys = [ENV_API_KEY, ENV_API_KEY_FALLBACK, ENV_MODEL, ENV_ENDPOINT];
        let saved: Vec<(&str, Option<String>)> =
            keys.iter().map(|k| (*k, std::env::var(k).ok())).collect();

        for key in keys {
            unsafe { std::env::remove_var(key) };
        }
        for (key, value) in vars {
            unsafe { std::env::set_var(key, value) };
        }

        let result = f();

        for (key, value) in saved {
            match value {
                Some(v) => unsafe { std::env::set_var(key, v) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
        result
    }

    #[test]
    fn test_parse_empty_uses_defaults() {
        let toml = SimToml::parse("").unwrap();
        assert_eq!(toml.model.name, DEFAULT_MODEL);
        assert_eq!(toml.model.endpoint, DEFAULT_ENDPOINT);
        assert!(toml.model.request_timeout_secs.is_none());
        assert_eq!(toml.progress.schedule(), ProgressSchedule::default());
    }

    #[test]
    fn test_parse_sections() {
        let content = r#"
[model]
name = "gemini-2.5-flash"
endpoint = "http://localhost:8080"
request_timeout_secs = 30

[progress]
building_context_after_ms = 100
reasoning_after_ms = 200
"#;
        let toml = SimToml::parse(content).unwrap();
        assert_eq!(toml.model.name, "gemini-2.5-flash");
        assert_eq!(toml.model.endpoint, "http://localhost:8080");
        assert_eq!(toml.model.request_timeout_secs, Some(30));
        assert_eq!(
            toml.progress.schedule().reasoning_after,
            Duration::from_millis(200)
        );
    }

    #[test]
    fn test_parse_invalid_toml() {
        let err = SimToml::parse("[model\nname = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let mut toml = SimToml::default();
        toml.model.name = "custom-model".to_string();
        toml.save(&path).unwrap();

        let loaded = SimToml::load(&path).unwrap();
        assert_eq!(loaded.model.name, "custom-model");
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempdir().unwrap();
        let toml = SimToml::load_or_default(dir.path()).unwrap();
        assert_eq!(toml.model.name, DEFAULT_MODEL);
    }

    #[test]
    fn test_validate_defaults_are_clean() {
        assert!(SimToml::default().validate().is_empty());
    }

    #[test]
    fn test_validate_reports_problems() {
        let content = r#"
[model]
name = " "
endpoint = "ftp://example.com"
request_timeout_secs = 0

[progress]
building_context_after_ms = 3000
reasoning_after_ms = 1500
"#;
        let warnings = SimToml::parse(content).unwrap().validate();
        assert_eq!(warnings.len(), 4);
        assert!(warnings.iter().any(|w| w.contains("Model name is empty")));
        assert!(warnings.iter().any(|w| w.contains("ftp://example.com")));
        assert!(warnings.iter().any(|w| w.contains("reasoning_after_ms")));
    }

    #[test]
    fn test_sim_config_reads_project_file() {
        let dir = tempdir().unwrap();
        let config_dir = dir.path().join(CONFIG_DIR);
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(
            config_dir.join(CONFIG_FILE),
            "[model]\nname = \"file-model\"\n",
        )
        .unwrap();

        with_env(&[], || {
            let config = SimConfig::new(dir.path().to_path_buf()).unwrap();
            assert_eq!(config.model(), "file-model");
            assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
            assert_eq!(config.config_file(), config_dir.join(CONFIG_FILE));
        });
    }

    #[test]
    fn test_model_priority_cli_env_file() {
        let dir = tempdir().unwrap();
        with_env(&[(ENV_MODEL, "env-model")], || {
            let config = SimConfig::new(dir.path().to_path_buf()).unwrap();
            assert_eq!(config.model(), "env-model");

            let config = SimConfig::with_cli_args(
                dir.path().to_path_buf(),
                true,
                Some("cli-model".to_string()),
                None,
            )
            .unwrap();
            assert_eq!(config.model(), "cli-model");
            assert!(config.verbose);
            assert_eq!(config.project_dir, dir.path());
        });
    }

    #[test]
    fn test_endpoint_from_env() {
        let dir = tempdir().unwrap();
        with_env(&[(ENV_ENDPOINT, "http://127.0.0.1:9999")], || {
            let config = SimConfig::new(dir.path().to_path_buf()).unwrap();
            assert_eq!(config.endpoint(), "http://127.0.0.1:9999");
        });
    }

    #[test]
    fn test_api_key_fallback_and_empty() {
        let dir = tempdir().unwrap();
        with_env(&[], || {
            let config = SimConfig::new(dir.path().to_path_buf()).unwrap();
            assert_eq!(config.api_key(), "");
        });
        with_env(&[(ENV_API_KEY_FALLBACK, "legacy")], || {
            let config = SimConfig::new(dir.path().to_path_buf()).unwrap();
            assert_eq!(config.api_key(), "legacy");
        });
        with_env(&[(ENV_API_KEY_FALLBACK, "legacy"), (ENV_API_KEY, "primary")], || {
            let config = SimConfig::new(dir.path().to_path_buf()).unwrap();
            assert_eq!(config.api_key(), "primary");
        });
    }

    #[test]
    fn test_validate_cli_endpoint() {
        let dir = tempdir().unwrap();
        let config = SimConfig::with_cli_args(
            dir.path().to_path_buf(),
            false,
            None,
            Some("localhost:8080".to_string()),
        )
        .unwrap();
        assert_eq!(config.validate().len(), 1);
    }

    #[test]
    fn test_request_timeout() {
        let dir = tempdir().unwrap();
        let mut config = SimConfig::new(dir.path().to_path_buf()).unwrap();
        assert!(config.request_timeout().is_none());
        config.toml.model.request_timeout_secs = Some(5);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
    }
}
