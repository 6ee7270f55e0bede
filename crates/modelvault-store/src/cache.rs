//! In-memory bundle cache

use crate::artifact::ArtifactBundle;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::RwLock;
use tracing::debug;

/// One cached bundle
struct CacheEntry {
    bundle: Arc<ArtifactBundle>,
    inserted_at: SystemTime,
}

/// Bundle cache keyed by canonical ticker
///
/// Unbounded: entries live until `clear` or process exit. Sized for
/// short-lived processes loading a small ticker universe; there is no
/// eviction.
pub struct BundleCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl BundleCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Get a cached bundle for a ticker
    pub async fn get(&self, ticker: &str) -> Option<Arc<ArtifactBundle>> {
        let entries = self.entries.read().await;
        entries.get(ticker).map(|e| Arc::clone(&e.bundle))
    }

    /// Insert a bundle, replacing any previous entry for the ticker
    pub async fn insert(&self, ticker: &str, bundle: Arc<ArtifactBundle>) {
        let mut entries = self.entries.write().await;
        entries.insert(
            ticker.to_string(),
            CacheEntry {
                bundle,
                inserted_at: SystemTime::now(),
            },
        );
        debug!(ticker = ticker, "Cached bundle");
    }

    /// Drop all entries
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        let dropped = entries.len();
        entries.clear();
        debug!(dropped = dropped, "Cache cleared");
    }

    /// Age of a cached entry, if present
    pub async fn age(&self, ticker: &str) -> Option<Duration> {
        let entries = self.entries.read().await;
        entries.get(ticker).and_then(|e| e.inserted_at.elapsed().ok())
    }

    /// Snapshot of cached tickers
    pub async fn info(&self) -> CacheInfo {
        let entries = self.entries.read().await;
        let mut cached_tickers: Vec<String> = entries.keys().cloned().collect();
        cached_tickers.sort();
        CacheInfo {
            count: cached_tickers.len(),
            cached_tickers,
        }
    }
}

impl Default for BundleCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache introspection snapshot
#[derive(Debug, Clone, Serialize)]
pub struct CacheInfo {
    /// Tickers with a cached bundle, sorted
    pub cached_tickers: Vec<String>,
    /// Number of cached bundles
    pub count: usize,
}
