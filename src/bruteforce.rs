//! Concurrent resolution of candidate names.
//!
//! Fan-out is bounded by a semaphore so a big wordlist cannot hammer the
//! target's nameservers or exhaust local sockets. Workers hold no shared
//! state; results are collected when each task is joined.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::debug;

use crate::model::ResolvedEntry;
use crate::resolver::Resolve;

pub const DEFAULT_CONCURRENCY: usize = 10;

/// Resolve a batch of names under a bounded worker pool, keeping only the
/// ones that resolved. NotFound and Indeterminate outcomes are dropped
/// silently. Entries come back in completion order, not input order.
pub async fn resolve_batch<R>(
    resolver: Arc<R>,
    names: Vec<String>,
    concurrency: usize,
) -> Vec<ResolvedEntry>
where
    R: Resolve + 'static,
{
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let mut tasks = Vec::with_capacity(names.len());

    for name in names {
        let resolver = resolver.clone();
        let semaphore = semaphore.clone();
        tasks.push(tokio::spawn(async move {
            let _permit = semaphore.acquire().await.ok()?;
            resolver.resolve(&name).await.into_entry(name)
        }));
    }

    let mut entries = Vec::new();
    for task in tasks {
        if let Ok(Some(entry)) = task.await {
            entries.push(entry);
        }
    }
    entries
}

/// Try every `prefix.domain` candidate from the wordlist and collect the
/// ones that resolve.
pub async fn bruteforce<R>(
    resolver: Arc<R>,
    domain: &str,
    wordlist: &[String],
    concurrency: usize,
) -> Vec<ResolvedEntry>
where
    R: Resolve + 'static,
{
    let domain = domain.to_lowercase();
    let candidates: Vec<String> = wordlist
        .iter()
        .map(|prefix| prefix.trim().to_lowercase())
        .filter(|prefix| !prefix.is_empty())
        .map(|prefix| format!("{prefix}.{domain}"))
        .collect();
    debug!(
        %domain,
        candidates = candidates.len(),
        concurrency,
        "starting bruteforce"
    );
    resolve_batch(resolver, candidates, concurrency).await
}
