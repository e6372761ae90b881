//! Subdomain discovery engine.
//!
//! Combines passive certificate-transparency harvesting (crt.sh) with
//! active DNS bruteforce resolution, merging both into one deduplicated,
//! sorted report.
//!
//! ```no_run
//! use subscout::{Discovery, DiscoverOptions, DnsResolver};
//!
//! # async fn run() -> Result<(), subscout::Error> {
//! let discovery = Discovery::new(DnsResolver::new());
//! let report = discovery.run("example.com", &DiscoverOptions::default()).await?;
//! println!("{} subdomains found", report.total_found);
//! # Ok(())
//! # }
//! ```

pub mod bruteforce;
pub mod discover;
pub mod error;
pub mod model;
pub mod passive;
pub mod resolver;
pub mod wordlist;

pub use discover::{DiscoverOptions, Discovery};
pub use error::Error;
pub use model::{DiscoveryReport, Resolution, ResolvedEntry, SourceCounts};
pub use passive::CrtShClient;
pub use resolver::{DnsResolver, Resolve};
