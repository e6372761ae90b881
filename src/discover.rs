//! Discovery orchestrator.
//!
//! Runs the passive and active sources, merges and deduplicates what they
//! find, resolves passive-only names, and assembles the final report. The
//! flow is linear: each phase joins all of its tasks before the next phase
//! starts, so the accumulation sets are only ever touched from this task.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::bruteforce::{self, DEFAULT_CONCURRENCY};
use crate::error::Error;
use crate::model::{DiscoveryReport, ResolvedEntry, SourceCounts};
use crate::passive::CrtShClient;
use crate::resolver::Resolve;
use crate::wordlist;

/// Knobs for a discovery run. Defaults mirror a full run: both sources on,
/// built-in wordlist, passive-only names resolved.
#[derive(Debug, Clone)]
pub struct DiscoverOptions {
    /// Query certificate transparency logs via crt.sh.
    pub use_crtsh: bool,
    /// Bruteforce prefixes against the domain.
    pub use_bruteforce: bool,
    /// Prefixes to try; `None` means the built-in list.
    pub wordlist: Option<Vec<String>>,
    /// Worker pool bound for every resolution batch.
    pub concurrency: usize,
    /// Resolve names only the passive source surfaced.
    pub resolve_passive: bool,
}

impl Default for DiscoverOptions {
    fn default() -> Self {
        Self {
            use_crtsh: true,
            use_bruteforce: true,
            wordlist: None,
            concurrency: DEFAULT_CONCURRENCY,
            resolve_passive: true,
        }
    }
}

pub struct Discovery<R> {
    resolver: Arc<R>,
    passive: CrtShClient,
}

impl<R: Resolve + 'static> Discovery<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver: Arc::new(resolver),
            passive: CrtShClient::new(),
        }
    }

    /// Swap in a differently configured passive client (other timeout, or a
    /// test endpoint).
    pub fn with_passive_client(mut self, passive: CrtShClient) -> Self {
        self.passive = passive;
        self
    }

    /// Run discovery for `domain`.
    ///
    /// Only invalid configuration fails; every runtime problem degrades to a
    /// warning on the returned report, so the caller always gets the partial
    /// results that were gathered.
    pub async fn run(
        &self,
        domain: &str,
        options: &DiscoverOptions,
    ) -> Result<DiscoveryReport, Error> {
        let domain = domain.trim().to_lowercase();
        if domain.is_empty() {
            return Err(Error::EmptyDomain);
        }
        if options.concurrency == 0 {
            return Err(Error::ZeroConcurrency);
        }

        let mut discovered: HashSet<String> = HashSet::new();
        let mut resolved: Vec<ResolvedEntry> = Vec::new();
        let mut warnings: Vec<String> = Vec::new();
        let mut sources = SourceCounts::default();

        if options.use_crtsh {
            match self.passive.fetch(&domain).await {
                Ok(names) => {
                    info!(%domain, count = names.len(), "passive source returned names");
                    sources.crtsh = names.len();
                    discovered.extend(names);
                }
                Err(err) => {
                    warn!(%domain, %err, "passive source failed");
                    warnings.push(format!("crt.sh: {err}"));
                }
            }
        }

        if options.use_bruteforce {
            let builtin;
            let words = match &options.wordlist {
                Some(words) => words.as_slice(),
                None => {
                    builtin = wordlist::default_wordlist();
                    builtin.as_slice()
                }
            };
            let entries =
                bruteforce::bruteforce(self.resolver.clone(), &domain, words, options.concurrency)
                    .await;
            info!(%domain, count = entries.len(), "bruteforce resolved names");
            for entry in entries {
                if !discovered.contains(&entry.name) {
                    sources.bruteforce += 1;
                }
                discovered.insert(entry.name.clone());
                resolved.push(entry);
            }
        }

        if options.resolve_passive && options.use_crtsh {
            let already: HashSet<&str> = resolved.iter().map(|e| e.name.as_str()).collect();
            let remainder: Vec<String> = discovered
                .iter()
                .filter(|name| !already.contains(name.as_str()))
                .cloned()
                .collect();
            debug!(%domain, count = remainder.len(), "resolving passive-only names");
            let entries = bruteforce::resolve_batch(
                self.resolver.clone(),
                remainder,
                options.concurrency,
            )
            .await;
            resolved.extend(entries);
        }

        resolved.sort_by(|a, b| a.name.cmp(&b.name));
        let total_found = resolved.len();
        Ok(DiscoveryReport {
            domain,
            subdomains: resolved,
            total_found,
            sources,
            warnings,
        })
    }
}
