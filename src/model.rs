use std::net::Ipv4Addr;

use serde::Serialize;

/// Outcome of resolving a single candidate name.
///
/// `Indeterminate` covers transient failures (timeouts, transport errors);
/// callers on the bruteforce path treat it exactly like `NotFound` so a
/// single flaky lookup never aborts a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The name definitively does not exist (NXDOMAIN).
    NotFound,
    /// The name resolved to one or more A records, or to a CNAME when no A
    /// record exists.
    Resolved {
        addresses: Vec<Ipv4Addr>,
        cname: Option<String>,
    },
    /// Transient lookup failure; not proof of absence.
    Indeterminate,
}

impl Resolution {
    /// Convert a Resolved outcome into a report entry for `name`; NotFound
    /// and Indeterminate yield nothing.
    pub fn into_entry(self, name: String) -> Option<ResolvedEntry> {
        match self {
            Resolution::Resolved { addresses, cname } => Some(ResolvedEntry {
                name,
                addresses,
                cname,
            }),
            Resolution::NotFound | Resolution::Indeterminate => None,
        }
    }
}

/// A subdomain that resolved, with its A records and optional CNAME target.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub name: String,
    pub addresses: Vec<Ipv4Addr>,
    pub cname: Option<String>,
}

/// Per-source discovery counts. `bruteforce` counts only names the passive
/// source had not already surfaced.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceCounts {
    pub crtsh: usize,
    pub bruteforce: usize,
}

/// Final result of a discovery run. Assembled once by the orchestrator and
/// read-only afterwards; the reporting layer renders it however it likes.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryReport {
    pub domain: String,
    /// Resolved entries, sorted ascending by name.
    pub subdomains: Vec<ResolvedEntry>,
    pub total_found: usize,
    pub sources: SourceCounts,
    /// Non-fatal problems hit during the run, e.g. a failed crt.sh fetch.
    pub warnings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_outcome_becomes_entry() {
        let outcome = Resolution::Resolved {
            addresses: vec![Ipv4Addr::new(93, 184, 216, 34)],
            cname: None,
        };
        let entry = outcome.into_entry("www.example.com".to_string()).unwrap();
        assert_eq!(entry.name, "www.example.com");
        assert_eq!(entry.addresses, vec![Ipv4Addr::new(93, 184, 216, 34)]);
        assert!(entry.cname.is_none());
    }

    #[test]
    fn negative_outcomes_yield_no_entry() {
        assert!(Resolution::NotFound
            .into_entry("a.example.com".to_string())
            .is_none());
        assert!(Resolution::Indeterminate
            .into_entry("b.example.com".to_string())
            .is_none());
    }
}
