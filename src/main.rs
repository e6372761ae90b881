use std::env;
use std::process;

use tracing_subscriber::EnvFilter;

use subscout::{DiscoverOptions, Discovery, DnsResolver};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let domain = match args.next() {
        Some(domain) => domain,
        None => {
            eprintln!("Usage: subscout <domain> [wordlist]");
            process::exit(1);
        }
    };

    let mut options = DiscoverOptions::default();
    if let Some(path) = args.next() {
        options.wordlist = Some(subscout::wordlist::load_wordlist(&path));
    }

    let discovery = Discovery::new(DnsResolver::new());
    match discovery.run(&domain, &options).await {
        Ok(report) => {
            let json =
                serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string());
            println!("{json}");
        }
        Err(err) => {
            eprintln!("subscout: {err}");
            process::exit(1);
        }
    }
}
