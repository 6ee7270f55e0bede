//! Storage backends for artifact bytes
//!
//! Two fixed backends: the local filesystem and S3-style object storage.
//! Selection happens once at loader construction; there is no per-call
//! switching.

use async_trait::async_trait;
use modelvault_core::{LoaderConfig, SourceKind, VaultError, VaultResult};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Capability surface shared by all backends
#[async_trait]
pub trait ArtifactBackend: Send + Sync {
    /// Fetch the raw bytes stored at a relative path.
    async fn fetch(&self, path: &str) -> VaultResult<Vec<u8>>;

    /// Short backend description for logs and errors.
    fn describe(&self) -> String;
}

/// Local filesystem backend
pub struct LocalBackend {
    base_path: PathBuf,
}

impl LocalBackend {
    /// Create a backend rooted at a base directory.
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Absolute path for a relative artifact path.
    pub fn full_path(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

#[async_trait]
impl ArtifactBackend for LocalBackend {
    async fn fetch(&self, path: &str) -> VaultResult<Vec<u8>> {
        let full = self.full_path(path);
        debug!(path = %full.display(), "Reading artifact");

        match tokio::fs::read(&full).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(VaultError::ArtifactNotFound(full.display().to_string()))
            }
            Err(e) => Err(VaultError::Io(e)),
        }
    }

    fn describe(&self) -> String {
        format!("local:{}", self.base_path.display())
    }
}

/// S3-style object storage backend
pub struct RemoteBackend {
    client: reqwest::Client,
    bucket: String,
    base_url: String,
}

impl RemoteBackend {
    /// Create a backend for a bucket.
    ///
    /// Without an endpoint override, keys resolve to the usual
    /// `https://<bucket>.s3.<region>.amazonaws.com/<key>` form.
    pub fn new(
        bucket: String,
        region: &str,
        endpoint: Option<String>,
        timeout: Duration,
    ) -> VaultResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VaultError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = match endpoint {
            Some(ep) => format!("{}/{}", ep.trim_end_matches('/'), bucket),
            None => format!("https://{}.s3.{}.amazonaws.com", bucket, region),
        };

        Ok(Self {
            client,
            bucket,
            base_url,
        })
    }

    /// URL for a relative object key.
    pub fn object_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Size of a remote object, or `None` when the key is absent.
    pub async fn object_size(&self, path: &str) -> VaultResult<Option<u64>> {
        let url = self.object_url(path);
        let response = self
            .client
            .head(&url)
            .send()
            .await
            .map_err(|e| VaultError::BackendUnavailable(format!("HEAD {}: {}", url, e)))?;

        match response.status() {
            s if s.is_success() => Ok(response.content_length()),
            reqwest::StatusCode::NOT_FOUND => Ok(None),
            s => Err(VaultError::BackendUnavailable(format!(
                "HEAD {}: status {}",
                url, s
            ))),
        }
    }

    /// Upload bytes to a remote object key.
    pub async fn put(&self, path: &str, bytes: Vec<u8>) -> VaultResult<()> {
        let url = self.object_url(path);
        debug!(url = %url, size = bytes.len(), "Uploading artifact");

        let response = self
            .client
            .put(&url)
            .body(bytes)
            .send()
            .await
            .map_err(|e| VaultError::BackendUnavailable(format!("PUT {}: {}", url, e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(VaultError::BackendUnavailable(format!(
                "PUT {}: status {}",
                url,
                response.status()
            )))
        }
    }
}

#[async_trait]
impl ArtifactBackend for RemoteBackend {
    async fn fetch(&self, path: &str) -> VaultResult<Vec<u8>> {
        let url = self.object_url(path);
        debug!(url = %url, "Fetching artifact");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| VaultError::BackendUnavailable(format!("GET {}: {}", url, e)))?;

        match response.status() {
            s if s.is_success() => {
                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| VaultError::BackendUnavailable(format!("GET {}: {}", url, e)))?;
                Ok(bytes.to_vec())
            }
            reqwest::StatusCode::NOT_FOUND => Err(VaultError::ArtifactNotFound(format!(
                "s3://{}/{}",
                self.bucket, path
            ))),
            s => Err(VaultError::BackendUnavailable(format!(
                "GET {}: status {}",
                url, s
            ))),
        }
    }

    fn describe(&self) -> String {
        format!("s3://{}", self.bucket)
    }
}

/// Build the backend selected by the configuration.
pub fn backend_from_config(config: &LoaderConfig) -> VaultResult<Arc<dyn ArtifactBackend>> {
    match config.source {
        SourceKind::Local => Ok(Arc::new(LocalBackend::new(config.local.base_path.clone()))),
        SourceKind::Remote => {
            let bucket = config.remote.bucket.clone().ok_or_else(|| {
                VaultError::Config("bucket is required for the remote source".to_string())
            })?;
            let backend = RemoteBackend::new(
                bucket,
                &config.remote.region,
                config.remote.endpoint.clone(),
                Duration::from_secs(config.remote.timeout_secs),
            )?;
            Ok(Arc::new(backend))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_local_fetch() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("etfs/SMH/production")).unwrap();
        std::fs::write(
            dir.path().join("etfs/SMH/production/metadata.json"),
            b"{}",
        )
        .unwrap();

        let backend = LocalBackend::new(dir.path().to_path_buf());
        let bytes = backend
            .fetch("etfs/SMH/production/metadata.json")
            .await
            .unwrap();
        assert_eq!(bytes, b"{}");
    }

    #[tokio::test]
    async fn test_local_fetch_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new(dir.path().to_path_buf());
        let err = backend.fetch("etfs/SMH/production/missing.pkl").await.unwrap_err();
        assert!(matches!(err, VaultError::ArtifactNotFound(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_remote_object_url() {
        let backend = RemoteBackend::new(
            "options-trading-models".to_string(),
            "us-east-1",
            None,
            Duration::from_secs(10),
        )
        .unwrap();
        assert_eq!(
            backend.object_url("metadata/asset_registry.json"),
            "https://options-trading-models.s3.us-east-1.amazonaws.com/metadata/asset_registry.json"
        );
    }

    #[test]
    fn test_remote_object_url_with_endpoint() {
        let backend = RemoteBackend::new(
            "models".to_string(),
            "us-east-1",
            Some("http://localhost:9000/".to_string()),
            Duration::from_secs(10),
        )
        .unwrap();
        assert_eq!(
            backend.object_url("/etfs/SMH/production/metadata.json"),
            "http://localhost:9000/models/etfs/SMH/production/metadata.json"
        );
    }

    #[test]
    fn test_backend_from_config_requires_bucket() {
        let mut config = LoaderConfig::default();
        config.source = SourceKind::Remote;
        let err = match backend_from_config(&config) {
            Ok(_) => panic!("expected error"),
            Err(e) => e,
        };
        assert!(matches!(err, VaultError::Config(_)));
    }
}
