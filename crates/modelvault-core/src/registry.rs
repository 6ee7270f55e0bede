//! Asset registry: ticker to artifact location resolution

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{VaultError, VaultResult};

/// Registry document key, identical on every backend
pub const REGISTRY_KEY: &str = "metadata/asset_registry.json";

/// Lifecycle status of a registered asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    /// Models are trained and published
    Active,
    /// Asset is registered but has no published models yet
    Planned,
}

impl std::fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetStatus::Active => write!(f, "active"),
            AssetStatus::Planned => write!(f, "planned"),
        }
    }
}

/// Asset class of a ticker
///
/// ETFs each carry a dedicated model; stocks share one universal model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Etf,
    Stock,
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetClass::Etf => write!(f, "etf"),
            AssetClass::Stock => write!(f, "stock"),
        }
    }
}

/// One registry entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetEntry {
    /// Human-readable asset name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Artifact path prefix; derived from class and environment when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_path: Option<String>,
    /// Lifecycle status
    pub status: AssetStatus,
}

/// Resolved artifact location for a ticker
#[derive(Debug, Clone)]
pub struct ArtifactLocation {
    /// Canonical (uppercased) ticker
    pub ticker: String,
    /// Asset class the ticker resolved under
    pub asset_class: AssetClass,
    /// Artifact path prefix (e.g., "etfs/SMH/production/")
    pub model_path: String,
    /// Registry status of the asset
    pub status: AssetStatus,
}

/// Registry document mapping tickers to artifact paths
///
/// Loaded once at loader construction and immutable afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetRegistry {
    /// ETF tickers, each with a dedicated model
    #[serde(default)]
    pub etfs: HashMap<String, AssetEntry>,
    /// Stock tickers, sharing the universal model
    #[serde(default)]
    pub stocks: HashMap<String, AssetEntry>,
}

impl AssetRegistry {
    /// Parse a registry document from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> VaultResult<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| VaultError::Config(format!("Failed to parse asset registry: {}", e)))
    }

    /// Look up a ticker across asset classes.
    ///
    /// Tickers are trimmed and matched case-insensitively. ETFs take
    /// precedence over stocks.
    pub fn resolve(&self, ticker: &str, environment: &str) -> VaultResult<ArtifactLocation> {
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(VaultError::UnknownTicker("(empty)".to_string()));
        }

        if let Some(entry) = self.etfs.get(&ticker) {
            let model_path = entry
                .model_path
                .clone()
                .unwrap_or_else(|| format!("etfs/{}/{}/", ticker, environment));
            return Ok(ArtifactLocation {
                ticker,
                asset_class: AssetClass::Etf,
                model_path,
                status: entry.status,
            });
        }

        if let Some(entry) = self.stocks.get(&ticker) {
            let model_path = entry
                .model_path
                .clone()
                .unwrap_or_else(|| format!("stocks/universal/{}/", environment));
            return Ok(ArtifactLocation {
                ticker,
                asset_class: AssetClass::Stock,
                model_path,
                status: entry.status,
            });
        }

        Err(VaultError::UnknownTicker(ticker))
    }

    /// Total number of registered tickers.
    pub fn len(&self) -> usize {
        self.etfs.len() + self.stocks.len()
    }

    /// Whether the registry holds no tickers at all.
    pub fn is_empty(&self) -> bool {
        self.etfs.is_empty() && self.stocks.is_empty()
    }

    /// All entries, ETFs first, sorted by ticker.
    pub fn entries(&self) -> Vec<(AssetClass, &str, &AssetEntry)> {
        let mut out: Vec<(AssetClass, &str, &AssetEntry)> = self
            .etfs
            .iter()
            .map(|(t, e)| (AssetClass::Etf, t.as_str(), e))
            .chain(
                self.stocks
                    .iter()
                    .map(|(t, e)| (AssetClass::Stock, t.as_str(), e)),
            )
            .collect();
        out.sort_by_key(|(class, ticker, _)| (*class as u8, ticker.to_string()));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_registry() -> AssetRegistry {
        let json = r#"{
            "etfs": {
                "SMH": {
                    "name": "VanEck Semiconductor ETF",
                    "model_path": "etfs/SMH/production/",
                    "status": "active"
                },
                "SPY": {"name": "SPDR S&P 500 ETF", "status": "planned"}
            },
            "stocks": {
                "AAPL": {
                    "model_path": "stocks/universal/production/",
                    "status": "active"
                }
            }
        }"#;
        AssetRegistry::from_slice(json.as_bytes()).unwrap()
    }

    #[test]
    fn test_resolve_etf() {
        let registry = sample_registry();
        let location = registry.resolve("SMH", "production").unwrap();
        assert_eq!(location.ticker, "SMH");
        assert_eq!(location.asset_class, AssetClass::Etf);
        assert_eq!(location.model_path, "etfs/SMH/production/");
        assert_eq!(location.status, AssetStatus::Active);
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let registry = sample_registry();
        let location = registry.resolve("  smh ", "production").unwrap();
        assert_eq!(location.ticker, "SMH");
    }

    #[test]
    fn test_resolve_derives_default_path() {
        let registry = sample_registry();

        // SPY has no explicit model_path
        let location = registry.resolve("SPY", "staging").unwrap();
        assert_eq!(location.model_path, "etfs/SPY/staging/");
        assert_eq!(location.status, AssetStatus::Planned);
    }

    #[test]
    fn test_resolve_stock() {
        let registry = sample_registry();
        let location = registry.resolve("AAPL", "production").unwrap();
        assert_eq!(location.asset_class, AssetClass::Stock);
        assert_eq!(location.model_path, "stocks/universal/production/");
    }

    #[test]
    fn test_resolve_unknown_ticker() {
        let registry = sample_registry();
        let err = registry.resolve("ZZZZ", "production").unwrap_err();
        assert!(matches!(err, VaultError::UnknownTicker(t) if t == "ZZZZ"));
    }

    #[test]
    fn test_resolve_empty_ticker() {
        let registry = sample_registry();
        let err = registry.resolve("   ", "production").unwrap_err();
        assert!(matches!(err, VaultError::UnknownTicker(_)));
    }

    #[test]
    fn test_entries_sorted() {
        let registry = sample_registry();
        let tickers: Vec<&str> = registry.entries().iter().map(|(_, t, _)| *t).collect();
        assert_eq!(tickers, vec!["SMH", "SPY", "AAPL"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_missing_sections_default_empty() {
        let registry = AssetRegistry::from_slice(b"{}").unwrap();
        assert!(registry.is_empty());
        assert!(matches!(
            registry.resolve("SMH", "production").unwrap_err(),
            VaultError::UnknownTicker(_)
        ));
    }
}
