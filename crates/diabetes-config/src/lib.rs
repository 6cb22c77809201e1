// Service configuration: built-in defaults, optionally overridden by a JSON file

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL_PATH: &str = "/model/diabetes_model.json";
pub const DEFAULT_TEST_SET_PATH: &str = "/model/diabetes_test.csv";
pub const DEFAULT_METRICS_PATH: &str = "/model/diabetes_metrics.json";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid bind address {0:?}")]
    BindAddr(String),
}

/// Runtime settings for the inference service.
///
/// Every key is optional in the JSON file; missing keys keep their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Serialized classifier, loaded once at startup.
    pub model_path: PathBuf,
    /// Held-out CSV used to compute live metrics.
    pub test_set_path: PathBuf,
    /// Precomputed metrics used when the test set is unusable.
    pub metrics_path: PathBuf,
    pub bind_addr: String,
    pub log_dir: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            test_set_path: PathBuf::from(DEFAULT_TEST_SET_PATH),
            metrics_path: PathBuf::from(DEFAULT_METRICS_PATH),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}

impl ServiceConfig {
    /// Load overrides from a JSON file on top of the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ServiceConfig =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.socket_addr()?;
        Ok(config)
    }

    /// Defaults, or the file named by `--config <path>` when present.
    pub fn from_args(args: &[String]) -> Result<Self, ConfigError> {
        match args.windows(2).find(|w| w[0] == "--config") {
            Some(w) => Self::from_file(Path::new(&w[1])),
            None => Ok(Self::default()),
        }
    }

    pub fn socket_addr(&self) -> Result<std::net::SocketAddr, ConfigError> {
        self.bind_addr
            .parse()
            .map_err(|_| ConfigError::BindAddr(self.bind_addr.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("diabetes-config-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.model_path, PathBuf::from("/model/diabetes_model.json"));
        assert_eq!(config.socket_addr().unwrap().port(), 8000);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let path = temp_config(r#"{"model_path":"/tmp/m.json","bind_addr":"127.0.0.1:9000"}"#);
        let config = ServiceConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.model_path, PathBuf::from("/tmp/m.json"));
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.metrics_path, PathBuf::from(DEFAULT_METRICS_PATH));
    }

    #[test]
    fn test_invalid_bind_addr_rejected() {
        let path = temp_config(r#"{"bind_addr":"not an address"}"#);
        let err = ServiceConfig::from_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, ConfigError::BindAddr(_)));
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = ServiceConfig::from_file(Path::new("/nonexistent/diabetes.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_from_args() {
        let args = vec!["diabetes_service".to_string()];
        assert_eq!(ServiceConfig::from_args(&args).unwrap(), ServiceConfig::default());
    }
}
