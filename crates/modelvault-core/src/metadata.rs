//! Model metadata parsing and validation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{VaultError, VaultResult};

/// Training metadata published alongside each model bundle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Model version string (e.g., "v2.1")
    pub version: String,
    /// Training date
    pub created_date: NaiveDate,
    /// Ticker the model was trained for
    pub ticker: String,
    /// Test-set accuracy in [0, 1]
    pub accuracy: f64,
    /// Top-3 accuracy, when the training run recorded it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top3_accuracy: Option<f64>,
    /// Feature count, when the training run recorded it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_features: Option<usize>,
}

impl ModelMetadata {
    /// Parse and validate a metadata document from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> VaultResult<Self> {
        let metadata: ModelMetadata = serde_json::from_slice(bytes)
            .map_err(|e| VaultError::MalformedMetadata(e.to_string()))?;
        metadata.validate()?;
        Ok(metadata)
    }

    /// Reject documents with empty fields or out-of-range scores.
    pub fn validate(&self) -> VaultResult<()> {
        if self.version.trim().is_empty() {
            return Err(VaultError::MalformedMetadata("version is empty".to_string()));
        }
        if self.ticker.trim().is_empty() {
            return Err(VaultError::MalformedMetadata("ticker is empty".to_string()));
        }
        if !(0.0..=1.0).contains(&self.accuracy) {
            return Err(VaultError::MalformedMetadata(format!(
                "accuracy {} outside [0, 1]",
                self.accuracy
            )));
        }
        if let Some(top3) = self.top3_accuracy {
            if !(0.0..=1.0).contains(&top3) {
                return Err(VaultError::MalformedMetadata(format!(
                    "top3_accuracy {} outside [0, 1]",
                    top3
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_metadata() {
        let json = r#"{
            "version": "v2.1",
            "created_date": "2025-06-30",
            "ticker": "SMH",
            "accuracy": 0.8421,
            "top3_accuracy": 0.9512,
            "n_features": 84
        }"#;
        let metadata = ModelMetadata::from_slice(json.as_bytes()).unwrap();
        assert_eq!(metadata.version, "v2.1");
        assert_eq!(metadata.ticker, "SMH");
        assert_eq!(metadata.accuracy, 0.8421);
        assert_eq!(metadata.n_features, Some(84));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let json = r#"{
            "version": "v1.0",
            "created_date": "2025-01-15",
            "ticker": "AAPL",
            "accuracy": 0.71,
            "training_samples": 125000
        }"#;
        assert!(ModelMetadata::from_slice(json.as_bytes()).is_ok());
    }

    #[test]
    fn test_accuracy_out_of_range() {
        let json = r#"{
            "version": "v2.1",
            "created_date": "2025-06-30",
            "ticker": "SMH",
            "accuracy": 1.5
        }"#;
        let err = ModelMetadata::from_slice(json.as_bytes()).unwrap_err();
        assert!(matches!(err, VaultError::MalformedMetadata(_)));
        assert!(err.to_string().contains("accuracy"));
    }

    #[test]
    fn test_missing_required_field() {
        // no version
        let json = r#"{"created_date": "2025-06-30", "ticker": "SMH", "accuracy": 0.8}"#;
        assert!(matches!(
            ModelMetadata::from_slice(json.as_bytes()).unwrap_err(),
            VaultError::MalformedMetadata(_)
        ));
    }

    #[test]
    fn test_bad_date() {
        let json = r#"{
            "version": "v2.1",
            "created_date": "June 2025",
            "ticker": "SMH",
            "accuracy": 0.8
        }"#;
        assert!(matches!(
            ModelMetadata::from_slice(json.as_bytes()).unwrap_err(),
            VaultError::MalformedMetadata(_)
        ));
    }

    #[test]
    fn test_empty_version_rejected() {
        let json = r#"{
            "version": "  ",
            "created_date": "2025-06-30",
            "ticker": "SMH",
            "accuracy": 0.8
        }"#;
        assert!(matches!(
            ModelMetadata::from_slice(json.as_bytes()).unwrap_err(),
            VaultError::MalformedMetadata(_)
        ));
    }
}
