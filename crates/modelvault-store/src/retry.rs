//! Retry helper for transient backend failures

use modelvault_core::VaultResult;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Retry an operation, sleeping between attempts.
///
/// Only errors reporting `is_retryable()` are retried; permanent
/// failures surface immediately. The loader performs no intrinsic
/// retries; callers opt in with this helper.
pub async fn retry_async<F, Fut, T>(
    mut op: F,
    attempts: usize,
    delay: Duration,
) -> VaultResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = VaultResult<T>>,
{
    let attempts = attempts.max(1);
    let mut attempt = 0;
    loop {
        attempt += 1;
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < attempts => {
                warn!(attempt = attempt, error = %e, "Retrying after transient failure");
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}
