//! Typed error hierarchy for llm-sim.
//!
//! - `InferenceError`: every way the hosted model call can fail
//! - `ConfigError`: loading or saving `config.toml`
//!
//! The orchestrator folds any `InferenceError` into the single user-facing
//! "simulation failed" state using its `Display` text.

use thiserror::Error;

/// Failures of the remote inference call.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Model service returned HTTP {status}: {body}")]
    Service { status: u16, body: String },

    #[error("Failed to decode model response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

impl InferenceError {
    /// Whether the service rejected the credential.
    pub fn is_auth(&self) -> bool {
        matches!(self, InferenceError::Service { status: 401 | 403, .. })
    }
}

/// Failures while loading or writing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config file at {path}: {source}")]
    Write {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config.toml: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config.toml: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inference_error_service_carries_status() {
        let err = InferenceError::Service {
            status: 503,
            body: "overloaded".to_string(),
        };
        assert_eq!(err.to_string(), "Model service returned HTTP 503: overloaded");
        assert!(!err.is_auth());
    }

    #[test]
    fn inference_error_auth_statuses() {
        for status in [401, 403] {
            let err = InferenceError::Service {
                status,
                body: String::new(),
            };
            assert!(err.is_auth());
        }
    }

    #[test]
    fn inference_error_other_displays_message_verbatim() {
        let err = InferenceError::Other("network down".to_string());
        assert_eq!(err.to_string(), "network down");
    }

    #[test]
    fn config_error_read_carries_path() {
        let path = std::path::PathBuf::from("/project/.llm-sim/config.toml");
        let err = ConfigError::Read {
            path: path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        match &err {
            ConfigError::Read { path: p, source } => {
                assert_eq!(p, &path);
                assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
            }
            _ => panic!("Expected Read"),
        }
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn config_error_converts_from_toml() {
        let parse_err = toml::from_str::<toml::Value>("= nope").unwrap_err();
        let err: ConfigError = parse_err.into();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn all_error_types_implement_std_error_trait() {
        fn assert_std_error<E: std::error::Error>(_: &E) {}
        assert_std_error(&InferenceError::Other("x".into()));
        assert_std_error(&ConfigError::Read {
            path: "x".into(),
            source: std::io::Error::other("x"),
        });
    }
}
