//! Error types for modelvault

use thiserror::Error;

/// Main error type for modelvault
#[derive(Error, Debug)]
pub enum VaultError {
    /// Ticker absent from the asset registry
    #[error("Unknown ticker: {0}")]
    UnknownTicker(String),

    /// Asset is in the registry but not active
    #[error("Asset {ticker} is not active (status: {status})")]
    InactiveAsset { ticker: String, status: String },

    /// Expected artifact file or object key is missing
    #[error("Artifact not found: {0}")]
    ArtifactNotFound(String),

    /// Transient backend failure; the caller may retry
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Metadata document has missing fields or out-of-range values
    #[error("Malformed metadata: {0}")]
    MalformedMetadata(String),

    /// Artifact payload failed deserialization
    #[error("Malformed artifact: {0}")]
    MalformedArtifact(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for modelvault operations
pub type VaultResult<T> = Result<T, VaultError>;

impl VaultError {
    /// Whether the failure is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, VaultError::BackendUnavailable(_))
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(err: serde_json::Error) -> Self {
        VaultError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for VaultError {
    fn from(err: toml::de::Error) -> Self {
        VaultError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VaultError::UnknownTicker("ZZZZ".to_string());
        assert_eq!(err.to_string(), "Unknown ticker: ZZZZ");

        let err = VaultError::InactiveAsset {
            ticker: "SPY".to_string(),
            status: "planned".to_string(),
        };
        assert_eq!(err.to_string(), "Asset SPY is not active (status: planned)");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: VaultError = io_err.into();
        assert!(matches!(err, VaultError::Io(_)));
    }

    #[test]
    fn test_retryable() {
        assert!(VaultError::BackendUnavailable("timeout".to_string()).is_retryable());
        assert!(!VaultError::ArtifactNotFound("x".to_string()).is_retryable());
        assert!(!VaultError::UnknownTicker("x".to_string()).is_retryable());
    }
}
