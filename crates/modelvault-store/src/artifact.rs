//! Artifact deserialization and bundle assembly

use modelvault_core::{AssetClass, ModelMetadata, VaultError, VaultResult};
use serde::{Deserialize, Serialize};

/// Serialized model file name within a model path
pub const MODEL_FILE: &str = "lightgbm_clean_model.pkl";
/// Serialized label encoder file name
pub const ENCODER_FILE: &str = "label_encoder_clean.pkl";
/// Feature-name list file name
pub const FEATURES_FILE: &str = "feature_names_clean.json";
/// Metadata document file name
pub const METADATA_FILE: &str = "metadata.json";

/// Join a model path prefix with an artifact file name.
pub fn artifact_key(model_path: &str, file: &str) -> String {
    if model_path.ends_with('/') {
        format!("{}{}", model_path, file)
    } else {
        format!("{}/{}", model_path, file)
    }
}

/// Serialized model payload
///
/// The training pipeline owns the encoding; the payload is carried
/// byte-for-byte for whatever inference engine consumes it.
#[derive(Debug, Clone)]
pub struct ModelBlob {
    bytes: Vec<u8>,
}

impl ModelBlob {
    pub fn from_bytes(bytes: Vec<u8>) -> VaultResult<Self> {
        if bytes.is_empty() {
            return Err(VaultError::MalformedArtifact(
                "empty model payload".to_string(),
            ));
        }
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Serialized label encoder payload, carried byte-for-byte like the model
#[derive(Debug, Clone)]
pub struct EncoderBlob {
    bytes: Vec<u8>,
}

impl EncoderBlob {
    pub fn from_bytes(bytes: Vec<u8>) -> VaultResult<Self> {
        if bytes.is_empty() {
            return Err(VaultError::MalformedArtifact(
                "empty label encoder payload".to_string(),
            ));
        }
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Parse the ordered feature-name list.
pub fn parse_feature_names(bytes: &[u8]) -> VaultResult<Vec<String>> {
    let names: Vec<String> = serde_json::from_slice(bytes)
        .map_err(|e| VaultError::MalformedArtifact(format!("feature names: {}", e)))?;
    if names.is_empty() {
        return Err(VaultError::MalformedArtifact(
            "feature name list is empty".to_string(),
        ));
    }
    Ok(names)
}

/// Whether a bundle is ETF-specific or the shared stock model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    EtfSpecific,
    StockUniversal,
}

impl From<AssetClass> for ModelKind {
    fn from(class: AssetClass) -> Self {
        match class {
            AssetClass::Etf => ModelKind::EtfSpecific,
            AssetClass::Stock => ModelKind::StockUniversal,
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelKind::EtfSpecific => write!(f, "etf_specific"),
            ModelKind::StockUniversal => write!(f, "stock_universal"),
        }
    }
}

/// Complete artifact set for one ticker
///
/// A bundle only exists once all four artifacts loaded and validated.
#[derive(Debug, Clone)]
pub struct ArtifactBundle {
    /// Canonical ticker the bundle was loaded for
    pub ticker: String,
    /// Artifact path prefix the bundle came from
    pub model_path: String,
    /// ETF-specific or stock-universal
    pub kind: ModelKind,
    /// Serialized model
    pub model: ModelBlob,
    /// Serialized label encoder
    pub label_encoder: EncoderBlob,
    /// Ordered feature names expected by the model
    pub feature_names: Vec<String>,
    /// Training metadata
    pub metadata: ModelMetadata,
}
