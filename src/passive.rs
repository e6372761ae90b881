//! Passive source client for crt.sh.
//!
//! Certificate transparency logs record every certificate ever issued under
//! a domain, which leaks hostnames without touching the target's DNS. One
//! GET against the crt.sh JSON endpoint covers the whole history.

use std::collections::HashSet;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

const CRTSH_BASE: &str = "https://crt.sh";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("subscout/", env!("CARGO_PKG_VERSION"));

#[derive(Deserialize)]
struct CrtShEntry {
    name_value: String,
}

/// Why a fetch produced no data. The orchestrator turns this into a warning
/// on the report; it is never fatal.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("malformed response body: {0}")]
    Parse(#[from] serde_json::Error),
}

pub struct CrtShClient {
    client: Client,
    base_url: String,
}

impl CrtShClient {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: CRTSH_BASE.to_string(),
        }
    }

    /// Point the client at a different endpoint. Used by tests to stand up a
    /// local mock in place of crt.sh.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch every name crt.sh has observed under `domain`.
    ///
    /// Queries the wildcard pattern `%.domain` and flattens the multi-line
    /// `name_value` fields into a set of strict subdomains.
    pub async fn fetch(&self, domain: &str) -> Result<HashSet<String>, FetchError> {
        let url = format!("{}/", self.base_url);
        debug!(domain, "querying crt.sh");

        let response = self
            .client
            .get(&url)
            .query(&[("q", format!("%.{domain}").as_str()), ("output", "json")])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let body = response.text().await?;
        let entries: Vec<CrtShEntry> = serde_json::from_str(&body)?;
        let names = extract_names(&entries, domain);
        debug!(domain, count = names.len(), "crt.sh names extracted");
        Ok(names)
    }
}

impl Default for CrtShClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Flatten crt.sh entries into strict subdomains of `domain`.
///
/// Entries bundle SAN-style hostnames separated by line breaks and may carry
/// a leading `*.` wildcard marker. Each line is trimmed, lowercased and
/// stripped of the marker; the bare domain itself is excluded.
fn extract_names(entries: &[CrtShEntry], domain: &str) -> HashSet<String> {
    let domain = domain.to_lowercase();
    let suffix = format!(".{domain}");
    let mut names = HashSet::new();
    for entry in entries {
        for line in entry.name_value.lines() {
            let cleaned = line.trim().to_lowercase();
            let name = cleaned.strip_prefix("*.").unwrap_or(&cleaned);
            if name != domain && name.ends_with(&suffix) {
                names.insert(name.to_string());
            }
        }
    }
    names
}
