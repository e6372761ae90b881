//! Built-in prefix list and wordlist file loading.

use std::fs;
use std::path::Path;

use tracing::warn;

/// Common subdomain prefixes tried when no wordlist file is given.
pub const COMMON_PREFIXES: &[&str] = &[
    "www", "mail", "ftp", "localhost", "webmail", "smtp", "pop", "ns1", "ns2", "ns3", "ns4",
    "dns", "dns1", "dns2", "mx", "mx1", "mx2", "email", "cloud", "api", "dev", "stage",
    "staging", "test", "testing", "prod", "production", "app", "apps", "admin",
    "administrator", "portal", "dashboard", "panel", "cpanel", "whm", "webdisk",
    "autodiscover", "autoconfig", "secure", "ssl", "vpn", "remote", "gateway", "gw", "proxy",
    "cdn", "static", "assets", "images", "img", "media", "files", "download", "downloads",
    "upload", "uploads", "backup", "backups", "db", "database", "mysql", "postgres", "sql",
    "oracle", "mongo", "redis", "cache", "memcached", "elasticsearch", "search", "web",
    "www1", "www2", "www3", "web1", "web2", "server", "server1", "server2", "host", "node",
    "node1", "node2", "cluster", "lb", "load", "balancer", "haproxy", "nginx", "apache",
    "iis", "blog", "forum", "wiki", "docs", "doc", "help", "support", "ticket", "tickets",
    "helpdesk", "status", "monitor", "monitoring", "grafana", "kibana", "prometheus",
    "zabbix", "nagios", "jenkins", "ci", "cd", "gitlab", "github", "bitbucket", "git", "svn",
    "repo", "repository", "jira", "confluence", "slack", "chat", "irc", "meet", "meeting",
    "zoom", "teams", "video", "stream", "streaming", "live", "rtmp", "hls", "uat", "qa",
    "demo", "sandbox", "beta", "alpha", "internal", "intranet", "extranet", "corp",
    "corporate", "staff", "employee", "hr", "payroll", "finance", "accounting", "sales",
    "marketing", "crm", "erp", "sap", "shop", "store", "ecommerce", "cart", "checkout",
    "payment", "pay", "billing", "invoice", "order", "orders", "tracking", "ship",
    "shipping", "mobile", "m", "wap", "android", "ios", "iphone", "calendar", "cal", "time",
    "ntp", "ldap", "ad", "active", "directory", "sso", "auth", "login", "signin", "signup",
    "register", "account", "accounts", "profile", "user", "users", "member", "members",
    "customer", "clients", "partner", "partners", "affiliate", "affiliates", "reseller",
    "agent", "agents", "dealer", "dealers", "vendor", "vendors", "supplier", "exchange",
    "owa", "outlook", "office", "office365", "o365", "sharepoint", "onedrive", "skype",
    "lync", "ocs", "sip", "voip", "pbx", "asterisk", "freeswitch", "sbc", "edge", "fw",
    "firewall", "ids", "ips", "waf", "dmz", "bastion", "jump", "ssh", "sftp", "rsync",
    "nfs", "smb", "cifs", "nas", "san", "storage", "s3", "minio", "swift", "ceph",
    "gluster", "hadoop", "spark", "kafka", "rabbitmq", "activemq", "zeromq", "queue",
    "worker", "job", "jobs", "task", "tasks", "cron", "scheduler", "airflow", "luigi",
    "celery", "flower", "beat", "health", "healthcheck", "ping", "pong", "echo", "trace",
    "debug", "log", "logs", "logging", "syslog", "splunk", "elk", "logstash", "fluentd",
    "graylog", "papertrail", "sentry", "bugsnag", "rollbar", "newrelic", "datadog",
    "appdynamics", "dynatrace",
];

/// The built-in list as owned strings, ready to pass to the bruteforce
/// engine.
pub fn default_wordlist() -> Vec<String> {
    COMMON_PREFIXES.iter().map(|p| p.to_string()).collect()
}

/// Load a wordlist file: one prefix per line, blank lines and `#` comments
/// skipped. A missing or unreadable file degrades to an empty list.
pub fn load_wordlist(path: impl AsRef<Path>) -> Vec<String> {
    match fs::read_to_string(path.as_ref()) {
        Ok(content) => parse_wordlist(&content),
        Err(err) => {
            warn!(path = %path.as_ref().display(), %err, "wordlist not readable, using empty list");
            Vec::new()
        }
    }
}

fn parse_wordlist(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}
