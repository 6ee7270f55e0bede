//! Configuration types for the model loader

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{VaultError, VaultResult};

/// Main loader configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Backend selection, fixed for the loader's lifetime
    pub source: SourceKind,
    /// Local filesystem settings
    pub local: LocalSourceConfig,
    /// Remote object storage settings
    pub remote: RemoteSourceConfig,
    /// Environment subtree (production, staging, archive/v1.0)
    pub environment: String,
    /// Load planned assets with a warning instead of failing
    pub allow_inactive: bool,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Local,
            local: LocalSourceConfig::default(),
            remote: RemoteSourceConfig::default(),
            environment: "production".to_string(),
            allow_inactive: false,
            logging: LoggingConfig::default(),
        }
    }
}

impl LoaderConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &std::path::Path) -> VaultResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| VaultError::Config(format!("Failed to read config file: {}", e)))?;
        toml::from_str(&content)
            .map_err(|e| VaultError::Config(format!("Failed to parse config: {}", e)))
    }
}

/// Artifact source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Local filesystem tree
    Local,
    /// S3-style object storage
    Remote,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Local => write!(f, "local"),
            SourceKind::Remote => write!(f, "remote"),
        }
    }
}

impl std::str::FromStr for SourceKind {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(SourceKind::Local),
            "remote" | "s3" => Ok(SourceKind::Remote),
            other => Err(VaultError::Config(format!("Unknown source: {}", other))),
        }
    }
}

/// Local filesystem settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalSourceConfig {
    /// Root of the artifact tree
    pub base_path: PathBuf,
}

impl Default for LocalSourceConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("models_storage"),
        }
    }
}

/// Remote object storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSourceConfig {
    /// Bucket name; required when the remote source is selected
    pub bucket: Option<String>,
    /// Bucket region
    pub region: String,
    /// Endpoint override (testing, S3-compatible stores)
    pub endpoint: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for RemoteSourceConfig {
    fn default() -> Self {
        Self {
            bucket: None,
            region: "us-east-1".to_string(),
            endpoint: None,
            timeout_secs: 10,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (json or text)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoaderConfig::default();
        assert_eq!(config.source, SourceKind::Local);
        assert_eq!(config.local.base_path, PathBuf::from("models_storage"));
        assert_eq!(config.environment, "production");
        assert_eq!(config.remote.timeout_secs, 10);
        assert!(!config.allow_inactive);
    }

    #[test]
    fn test_config_parse() {
        let toml_str = r#"
source = "remote"
environment = "staging"

[remote]
bucket = "options-trading-models"
region = "us-west-2"
timeout_secs = 5
"#;
        let config: LoaderConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.source, SourceKind::Remote);
        assert_eq!(config.environment, "staging");
        assert_eq!(config.remote.bucket.as_deref(), Some("options-trading-models"));
        assert_eq!(config.remote.region, "us-west-2");
        assert_eq!(config.remote.timeout_secs, 5);
        // sections not present fall back to defaults
        assert_eq!(config.local.base_path, PathBuf::from("models_storage"));
    }

    #[test]
    fn test_source_kind_from_str() {
        assert_eq!("local".parse::<SourceKind>().unwrap(), SourceKind::Local);
        assert_eq!("S3".parse::<SourceKind>().unwrap(), SourceKind::Remote);
        assert!("ftp".parse::<SourceKind>().is_err());
    }
}
