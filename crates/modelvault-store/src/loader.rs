//! Loader facade
//!
//! Ties the registry, backend, deserializers, and cache together behind
//! the public loading API.

use crate::artifact::{
    artifact_key, ArtifactBundle, EncoderBlob, ModelBlob, ModelKind, parse_feature_names,
    ENCODER_FILE, FEATURES_FILE, METADATA_FILE, MODEL_FILE,
};
use crate::backend::{backend_from_config, ArtifactBackend};
use crate::cache::{BundleCache, CacheInfo};
use modelvault_core::{
    ArtifactLocation, AssetRegistry, AssetStatus, LoaderConfig, ModelMetadata, VaultError,
    VaultResult, REGISTRY_KEY,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Model artifact loader with an in-memory bundle cache
///
/// The backend is chosen once at construction; the registry is fetched
/// through it and stays immutable for the loader's lifetime.
pub struct ModelLoader {
    backend: Arc<dyn ArtifactBackend>,
    registry: AssetRegistry,
    cache: BundleCache,
    environment: String,
    allow_inactive: bool,
}

impl ModelLoader {
    /// Build a loader: select the backend and fetch the asset registry.
    pub async fn new(config: &LoaderConfig) -> VaultResult<Self> {
        let backend = backend_from_config(config)?;

        let registry_bytes = match backend.fetch(REGISTRY_KEY).await {
            Ok(bytes) => bytes,
            Err(VaultError::ArtifactNotFound(path)) => {
                return Err(VaultError::Config(format!(
                    "Asset registry not found: {}",
                    path
                )));
            }
            Err(e) => return Err(e),
        };
        let registry = AssetRegistry::from_slice(&registry_bytes)?;

        info!(
            source = %backend.describe(),
            etfs = registry.etfs.len(),
            stocks = registry.stocks.len(),
            "Model loader initialized"
        );

        Ok(Self {
            backend,
            registry,
            cache: BundleCache::new(),
            environment: config.environment.clone(),
            allow_inactive: config.allow_inactive,
        })
    }

    /// Construct from an already-loaded registry and explicit backend.
    pub fn with_backend(
        backend: Arc<dyn ArtifactBackend>,
        registry: AssetRegistry,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            registry,
            cache: BundleCache::new(),
            environment: environment.into(),
            allow_inactive: false,
        }
    }

    /// Load planned assets with a warning instead of failing.
    pub fn allow_inactive(mut self, allow: bool) -> Self {
        self.allow_inactive = allow;
        self
    }

    /// The loaded asset registry.
    pub fn registry(&self) -> &AssetRegistry {
        &self.registry
    }

    /// Backend description (e.g., "local:models_storage", "s3://bucket").
    pub fn source(&self) -> String {
        self.backend.describe()
    }

    /// Resolve the artifact path for a ticker. No I/O, no cache.
    pub fn model_path_for_ticker(&self, ticker: &str) -> VaultResult<String> {
        Ok(self.registry.resolve(ticker, &self.environment)?.model_path)
    }

    /// Load the complete artifact bundle for a ticker.
    ///
    /// At most one fetch-and-deserialize per ticker per cache lifetime
    /// in sequential use. Any failure leaves the cache untouched for
    /// that ticker; no partial bundle is ever returned.
    pub async fn load_models_for_ticker(&self, ticker: &str) -> VaultResult<Arc<ArtifactBundle>> {
        let location = self.registry.resolve(ticker, &self.environment)?;

        if location.status != AssetStatus::Active {
            if self.allow_inactive {
                warn!(
                    ticker = %location.ticker,
                    status = %location.status,
                    "Loading inactive asset"
                );
            } else {
                return Err(VaultError::InactiveAsset {
                    ticker: location.ticker,
                    status: location.status.to_string(),
                });
            }
        }

        if let Some(bundle) = self.cache.get(&location.ticker).await {
            debug!(ticker = %location.ticker, "Cache hit");
            return Ok(bundle);
        }

        info!(
            ticker = %location.ticker,
            path = %location.model_path,
            source = %self.backend.describe(),
            "Loading model bundle"
        );

        let bundle = Arc::new(self.fetch_bundle(&location).await?);
        self.cache.insert(&location.ticker, Arc::clone(&bundle)).await;

        info!(
            ticker = %bundle.ticker,
            kind = %bundle.kind,
            version = %bundle.metadata.version,
            accuracy = bundle.metadata.accuracy,
            features = bundle.feature_names.len(),
            "Model bundle loaded"
        );

        Ok(bundle)
    }

    /// Drop all cached bundles; subsequent loads re-fetch.
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    /// Snapshot of cached tickers.
    pub async fn cache_info(&self) -> CacheInfo {
        self.cache.info().await
    }

    async fn fetch_bundle(&self, location: &ArtifactLocation) -> VaultResult<ArtifactBundle> {
        let model_bytes = self
            .backend
            .fetch(&artifact_key(&location.model_path, MODEL_FILE))
            .await?;
        let encoder_bytes = self
            .backend
            .fetch(&artifact_key(&location.model_path, ENCODER_FILE))
            .await?;
        let feature_bytes = self
            .backend
            .fetch(&artifact_key(&location.model_path, FEATURES_FILE))
            .await?;
        let metadata_bytes = self
            .backend
            .fetch(&artifact_key(&location.model_path, METADATA_FILE))
            .await?;

        let metadata = ModelMetadata::from_slice(&metadata_bytes)?;
        if !metadata.ticker.eq_ignore_ascii_case(&location.ticker) {
            // Expected for the shared stock model
            warn!(
                ticker = %location.ticker,
                metadata_ticker = %metadata.ticker,
                "Metadata ticker differs from requested ticker"
            );
        }

        Ok(ArtifactBundle {
            ticker: location.ticker.clone(),
            model_path: location.model_path.clone(),
            kind: ModelKind::from(location.asset_class),
            model: ModelBlob::from_bytes(model_bytes)?,
            label_encoder: EncoderBlob::from_bytes(encoder_bytes)?,
            feature_names: parse_feature_names(&feature_bytes)?,
            metadata,
        })
    }
}
