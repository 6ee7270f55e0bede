//! CLI commands implementation

use anyhow::Result;
use modelvault_core::LoaderConfig;
use modelvault_store::retry::retry_async;
use modelvault_store::{ModelLoader, RemoteBackend};
use std::path::{Path, PathBuf};
use std::time::Duration;

const RETRY_ATTEMPTS: usize = 3;
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Load and summarize a ticker's bundle
pub async fn load(config: &LoaderConfig, ticker: &str) -> Result<()> {
    let loader = ModelLoader::new(config).await?;
    let bundle = retry_async(
        || loader.load_models_for_ticker(ticker),
        RETRY_ATTEMPTS,
        RETRY_DELAY,
    )
    .await?;

    println!("Loaded {} model for {}", bundle.kind, bundle.ticker);
    println!("  Source: {}", loader.source());
    println!("  Path: {}", bundle.model_path);
    println!("  Version: {}", bundle.metadata.version);
    println!("  Trained: {}", bundle.metadata.created_date);
    println!("  Accuracy: {:.2}%", bundle.metadata.accuracy * 100.0);
    if let Some(top3) = bundle.metadata.top3_accuracy {
        println!("  Top-3 accuracy: {:.2}%", top3 * 100.0);
    }
    println!("  Features: {}", bundle.feature_names.len());
    println!("  Model size: {} bytes", bundle.model.len());

    let info = loader.cache_info().await;
    println!("  Cached tickers: {}", info.count);

    Ok(())
}

/// Print the resolved artifact path for a ticker
pub async fn path(config: &LoaderConfig, ticker: &str) -> Result<()> {
    let loader = ModelLoader::new(config).await?;
    println!("{}", loader.model_path_for_ticker(ticker)?);
    Ok(())
}

/// List registry entries
pub async fn tickers(config: &LoaderConfig) -> Result<()> {
    let loader = ModelLoader::new(config).await?;
    let registry = loader.registry();

    if registry.is_empty() {
        println!("No assets in registry");
        return Ok(());
    }

    println!(
        "{:<8} {:<6} {:<36} {:<10}",
        "TICKER", "CLASS", "PATH", "STATUS"
    );
    println!("{}", "-".repeat(64));
    for (class, ticker, entry) in registry.entries() {
        let path = entry.model_path.as_deref().unwrap_or("-");
        println!("{:<8} {:<6} {:<36} {:<10}", ticker, class, path, entry.status);
    }

    Ok(())
}

/// Sync the local artifact tree to the remote store
pub async fn upload(config: &LoaderConfig, local_dir: &Path, dry_run: bool) -> Result<()> {
    let bucket = config
        .remote
        .bucket
        .clone()
        .ok_or_else(|| anyhow::anyhow!("--bucket is required for upload"))?;

    if !local_dir.is_dir() {
        anyhow::bail!("Local directory not found: {}", local_dir.display());
    }

    let backend = RemoteBackend::new(
        bucket.clone(),
        &config.remote.region,
        config.remote.endpoint.clone(),
        Duration::from_secs(config.remote.timeout_secs),
    )?;

    let files = collect_files(local_dir)?;
    let mut uploaded = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;

    for file in &files {
        let key = file
            .strip_prefix(local_dir)?
            .to_string_lossy()
            .replace('\\', "/");
        let size = std::fs::metadata(file)?.len();

        if dry_run {
            println!(
                "[dry-run] Would upload {} -> s3://{}/{} ({} bytes)",
                file.display(),
                bucket,
                key,
                size
            );
            uploaded += 1;
            continue;
        }

        match sync_file(&backend, file, &key, size).await {
            Ok(true) => {
                println!(
                    "Uploaded {} -> s3://{}/{} ({} bytes)",
                    file.display(),
                    bucket,
                    key,
                    size
                );
                uploaded += 1;
            }
            Ok(false) => {
                println!("Skipping (unchanged): {}", key);
                skipped += 1;
            }
            Err(e) => {
                eprintln!("Failed to upload {}: {}", key, e);
                failed += 1;
            }
        }
    }

    if dry_run {
        println!("\nWould upload {} files", uploaded);
    } else {
        println!(
            "\nUploaded {} files, skipped {} (unchanged), {} failed",
            uploaded, skipped, failed
        );
        if failed > 0 {
            anyhow::bail!("{} uploads failed", failed);
        }
    }

    Ok(())
}

/// Upload one file unless the remote copy already matches by size.
/// Returns whether an upload happened.
async fn sync_file(
    backend: &RemoteBackend,
    file: &Path,
    key: &str,
    size: u64,
) -> Result<bool> {
    let remote_size = retry_async(
        || backend.object_size(key),
        RETRY_ATTEMPTS,
        RETRY_DELAY,
    )
    .await?;

    if remote_size == Some(size) {
        return Ok(false);
    }

    let bytes = tokio::fs::read(file).await?;
    retry_async(
        || backend.put(key, bytes.clone()),
        RETRY_ATTEMPTS,
        RETRY_DELAY,
    )
    .await?;

    Ok(true)
}

/// Collect all files under a directory, sorted for stable output.
fn collect_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut stack = vec![dir.to_path_buf()];

    while let Some(current) = stack.pop() {
        for entry in std::fs::read_dir(&current)? {
            let path = entry?.path();
            if path.is_dir() {
                stack.push(path);
            } else {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}
