//! End-to-end discovery runs against a mocked crt.sh endpoint and a
//! scripted resolver.

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use subscout::{
    CrtShClient, DiscoverOptions, Discovery, Error, Resolution, Resolve,
};

struct ScriptedResolver {
    answers: HashMap<String, Resolution>,
}

impl ScriptedResolver {
    fn new(entries: &[(&str, Resolution)]) -> Self {
        Self {
            answers: entries
                .iter()
                .map(|(name, res)| (name.to_string(), res.clone()))
                .collect(),
        }
    }
}

#[async_trait]
impl Resolve for ScriptedResolver {
    async fn resolve(&self, name: &str) -> Resolution {
        self.answers
            .get(name)
            .cloned()
            .unwrap_or(Resolution::NotFound)
    }
}

fn resolved(octet: u8) -> Resolution {
    Resolution::Resolved {
        addresses: vec![Ipv4Addr::new(203, 0, 113, octet)],
        cname: None,
    }
}

async fn crtsh_mock(domain: &str, response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("q", format!("%.{domain}")))
        .and(query_param("output", "json"))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

fn discovery_against(server: &MockServer, resolver: ScriptedResolver) -> Discovery<ScriptedResolver> {
    let passive = CrtShClient::with_timeout(Duration::from_secs(5)).with_base_url(server.uri());
    Discovery::new(resolver).with_passive_client(passive)
}

fn options_with_words(prefixes: &[&str]) -> DiscoverOptions {
    DiscoverOptions {
        wordlist: Some(prefixes.iter().map(|p| p.to_string()).collect()),
        ..DiscoverOptions::default()
    }
}

#[tokio::test]
async fn merges_passive_and_bruteforce_sources() {
    let body = r#"[
        {"name_value": "*.www.example.com\napi.example.com"},
        {"name_value": "www.example.com"},
        {"name_value": "example.com"}
    ]"#;
    let server = crtsh_mock(
        "example.com",
        ResponseTemplate::new(200).set_body_string(body),
    )
    .await;
    let resolver = ScriptedResolver::new(&[
        ("www.example.com", resolved(1)),
        ("dev.example.com", resolved(2)),
        ("api.example.com", resolved(3)),
    ]);
    let discovery = discovery_against(&server, resolver);

    let report = discovery
        .run("example.com", &options_with_words(&["www", "dev", "mail"]))
        .await
        .unwrap();

    // crt.sh surfaced www and api; bruteforce added dev; api got resolved in
    // the passive-only pass
    assert_eq!(report.sources.crtsh, 2);
    assert_eq!(report.sources.bruteforce, 1);
    assert_eq!(report.total_found, 3);
    let names: Vec<&str> = report.subdomains.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["api.example.com", "dev.example.com", "www.example.com"]
    );
    assert!(report.warnings.is_empty());
}

#[tokio::test]
async fn output_is_sorted_by_name() {
    let server = crtsh_mock(
        "example.com",
        ResponseTemplate::new(200).set_body_string("[]"),
    )
    .await;
    let resolver = ScriptedResolver::new(&[
        ("zz.example.com", resolved(1)),
        ("aa.example.com", resolved(2)),
        ("mm.example.com", resolved(3)),
    ]);
    let discovery = discovery_against(&server, resolver);

    let report = discovery
        .run("example.com", &options_with_words(&["zz", "mm", "aa"]))
        .await
        .unwrap();

    let names: Vec<&str> = report.subdomains.iter().map(|e| e.name.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[tokio::test]
async fn passive_fetch_failure_is_a_warning_not_an_abort() {
    let server = crtsh_mock("example.com", ResponseTemplate::new(500)).await;
    let resolver = ScriptedResolver::new(&[("www.example.com", resolved(1))]);
    let discovery = discovery_against(&server, resolver);

    let report = discovery
        .run("example.com", &options_with_words(&["www", "mail"]))
        .await
        .unwrap();

    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("crt.sh"));
    assert_eq!(report.total_found, 1);
    assert_eq!(report.sources.crtsh, 0);
    assert_eq!(report.sources.bruteforce, 1);
}

#[tokio::test]
async fn malformed_passive_body_is_a_warning() {
    let server = crtsh_mock(
        "example.com",
        ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"),
    )
    .await;
    let resolver = ScriptedResolver::new(&[]);
    let discovery = discovery_against(&server, resolver);

    let report = discovery
        .run("example.com", &options_with_words(&["www"]))
        .await
        .unwrap();

    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.total_found, 0);
}

#[tokio::test]
async fn cname_only_names_keep_empty_address_list() {
    let server = crtsh_mock(
        "example.com",
        ResponseTemplate::new(200)
            .set_body_string(r#"[{"name_value": "alias.example.com"}]"#),
    )
    .await;
    let resolver = ScriptedResolver::new(&[(
        "alias.example.com",
        Resolution::Resolved {
            addresses: Vec::new(),
            cname: Some("target.example.net.".to_string()),
        },
    )]);
    let discovery = discovery_against(&server, resolver);

    let report = discovery
        .run("example.com", &options_with_words(&[]))
        .await
        .unwrap();

    assert_eq!(report.total_found, 1);
    let entry = &report.subdomains[0];
    assert!(entry.addresses.is_empty());
    assert_eq!(entry.cname.as_deref(), Some("target.example.net."));
}

#[tokio::test]
async fn unresolvable_names_contribute_nothing() {
    let server = crtsh_mock(
        "example.com",
        ResponseTemplate::new(200)
            .set_body_string(r#"[{"name_value": "ghost.example.com"}]"#),
    )
    .await;
    // scripted resolver answers NotFound for everything it was not given
    let resolver = ScriptedResolver::new(&[]);
    let discovery = discovery_against(&server, resolver);

    let report = discovery
        .run("example.com", &options_with_words(&["www", "mail"]))
        .await
        .unwrap();

    assert_eq!(report.total_found, 0);
    assert!(report.subdomains.is_empty());
    assert_eq!(report.sources.crtsh, 1);
    assert_eq!(report.sources.bruteforce, 0);
}

#[tokio::test]
async fn discovery_is_idempotent() {
    let body = r#"[{"name_value": "api.example.com\nwww.example.com"}]"#;
    let server = crtsh_mock(
        "example.com",
        ResponseTemplate::new(200).set_body_string(body),
    )
    .await;
    let resolver = ScriptedResolver::new(&[
        ("www.example.com", resolved(1)),
        ("api.example.com", resolved(2)),
        ("dev.example.com", resolved(3)),
    ]);
    let discovery = discovery_against(&server, resolver);
    let options = options_with_words(&["www", "dev"]);

    let first = discovery.run("example.com", &options).await.unwrap();
    let second = discovery.run("example.com", &options).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn sources_can_be_disabled_independently() {
    let server = crtsh_mock(
        "example.com",
        ResponseTemplate::new(200)
            .set_body_string(r#"[{"name_value": "api.example.com"}]"#),
    )
    .await;
    let resolver = ScriptedResolver::new(&[
        ("www.example.com", resolved(1)),
        ("api.example.com", resolved(2)),
    ]);
    let discovery = discovery_against(&server, resolver);

    let options = DiscoverOptions {
        use_crtsh: false,
        wordlist: Some(vec!["www".to_string()]),
        ..DiscoverOptions::default()
    };
    let report = discovery.run("example.com", &options).await.unwrap();
    assert_eq!(report.sources.crtsh, 0);
    assert_eq!(report.total_found, 1);
    assert_eq!(report.subdomains[0].name, "www.example.com");

    let options = DiscoverOptions {
        use_bruteforce: false,
        ..DiscoverOptions::default()
    };
    let report = discovery.run("example.com", &options).await.unwrap();
    assert_eq!(report.sources.bruteforce, 0);
    assert_eq!(report.total_found, 1);
    assert_eq!(report.subdomains[0].name, "api.example.com");
}

#[tokio::test]
async fn invalid_configuration_fails_fast() {
    let resolver = ScriptedResolver::new(&[]);
    let discovery = Discovery::new(resolver);

    let err = discovery
        .run("  ", &DiscoverOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err, Error::EmptyDomain);

    let options = DiscoverOptions {
        concurrency: 0,
        ..DiscoverOptions::default()
    };
    let err = discovery.run("example.com", &options).await.unwrap_err();
    assert_eq!(err, Error::ZeroConcurrency);
}
