//! Run settings, feed configuration and the files of the config directory.

use anyhow::{Context, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use domain_feeds::CollectConfig;

pub const CONFIG_FILE: &str = "config.json";
pub const CN_DNS_FILE: &str = "cn_dns.txt";
pub const FOREIGN_DNS_FILE: &str = "foreign_dns.txt";
pub const CUSTOM_DOMAIN_DNS_FILE: &str = "custom_domain_dns.txt";
pub const CUSTOM_CN_DOMAINS_FILE: &str = "custom_cn_domains.txt";
pub const CUSTOM_FOREIGN_DOMAINS_FILE: &str = "custom_foreign_domains.txt";

pub const DEFAULT_CN_DNS: &[&str] = &[
    "https://doh.pub/dns-query",
    "https://dns.alidns.com/dns-query",
];

pub const DEFAULT_FOREIGN_DNS: &[&str] = &["https://1.1.1.1/dns-query", "https://8.8.8.8/dns-query"];

const DEFAULT_CN_SOURCES: &[&str] = &[
    "https://raw.githubusercontent.com/ACL4SSR/ACL4SSR/master/Clash/Providers/ChinaDomain.yaml",
    "https://raw.githubusercontent.com/ACL4SSR/ACL4SSR/master/Clash/Providers/ChinaMedia.yaml",
    "https://raw.githubusercontent.com/blackmatrix7/ios_rule_script/master/rule/Clash/ChinaMax/ChinaMax_Domain.yaml",
    "https://raw.githubusercontent.com/felixonmars/dnsmasq-china-list/master/accelerated-domains.china.conf",
];

const DEFAULT_FOREIGN_SOURCES: &[&str] = &[
    "https://raw.githubusercontent.com/blackmatrix7/ios_rule_script/master/rule/Clash/Proxy/Proxy_Domain.yaml",
    "https://raw.githubusercontent.com/ACL4SSR/ACL4SSR/master/Clash/Providers/ProxyGFWlist.yaml",
    "https://raw.githubusercontent.com/ACL4SSR/ACL4SSR/master/Clash/Providers/ProxyMedia.yaml",
    "https://raw.githubusercontent.com/gfwlist/gfwlist/master/gfwlist.txt",
];

/// Settings for one run, loaded from the environment and overridable by CLI flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub config_dir: PathBuf,
    pub output_dir: PathBuf,
    pub concurrency: usize,
    pub fetch_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_dir: PathBuf::from("config"),
            output_dir: PathBuf::from("dist"),
            concurrency: domain_feeds::types::config::DEFAULT_CONCURRENCY,
            fetch_timeout: domain_feeds::types::config::DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let concurrency = match lookup("RULEGEN_CONCURRENCY") {
            Some(raw) => raw
                .trim()
                .parse()
                .context("RULEGEN_CONCURRENCY must be a valid number")?,
            None => defaults.concurrency,
        };

        let fetch_timeout = match lookup("RULEGEN_FETCH_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.trim()
                    .parse()
                    .context("RULEGEN_FETCH_TIMEOUT_SECS must be a valid number")?,
            ),
            None => defaults.fetch_timeout,
        };

        Ok(Self {
            config_dir: lookup("RULEGEN_CONFIG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.config_dir),
            output_dir: lookup("RULEGEN_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            concurrency,
            fetch_timeout,
        })
    }

    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = dir.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Path of a file inside the config directory.
    pub fn config_path(&self, name: &str) -> PathBuf {
        self.config_dir.join(name)
    }

    pub fn collect_config(&self) -> CollectConfig {
        CollectConfig::new()
            .with_concurrency(self.concurrency)
            .with_fetch_timeout(self.fetch_timeout)
    }
}

/// Contents of `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default)]
    pub sources: FeedSources,
}

/// Feed locators per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSources {
    #[serde(default)]
    pub cn_domains: Vec<String>,
    #[serde(default)]
    pub foreign_domains: Vec<String>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            sources: FeedSources {
                cn_domains: DEFAULT_CN_SOURCES.iter().map(|s| s.to_string()).collect(),
                foreign_domains: DEFAULT_FOREIGN_SOURCES
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            },
        }
    }
}

impl FeedConfig {
    /// Load `config.json`, writing the default feed list first if it is missing.
    pub async fn load_or_bootstrap(path: &Path) -> Result<Self> {
        if !tokio::fs::try_exists(path)
            .await
            .with_context(|| format!("Failed to check {}", path.display()))?
        {
            let config = Self::default();
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            let json = serde_json::to_string_pretty(&config)
                .context("Failed to serialize default config")?;
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "Created default config file");
            return Ok(config);
        }

        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("Invalid config file {}", path.display()))
    }
}

/// Read a DNS server list: one endpoint per line, `#` comments ignored.
///
/// A missing or empty file yields `defaults`.
pub async fn read_dns_servers(path: &Path, defaults: &[&str]) -> Result<Vec<String>> {
    let fallback = || defaults.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(fallback()),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    };

    let servers: Vec<String> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect();

    Ok(if servers.is_empty() { fallback() } else { servers })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.config_dir, PathBuf::from("config"));
        assert_eq!(settings.output_dir, PathBuf::from("dist"));
        assert_eq!(settings.concurrency, 4);
        assert_eq!(settings.fetch_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_env_values() {
        let settings = Settings::from_lookup(lookup(&[
            ("RULEGEN_CONFIG_DIR", "/etc/rulegen"),
            ("RULEGEN_OUTPUT_DIR", "/srv/out"),
            ("RULEGEN_CONCURRENCY", "8"),
            ("RULEGEN_FETCH_TIMEOUT_SECS", " 12 "),
        ]))
        .unwrap();

        assert_eq!(settings.config_path(CN_DNS_FILE), PathBuf::from("/etc/rulegen/cn_dns.txt"));
        assert_eq!(settings.output_dir, PathBuf::from("/srv/out"));
        assert_eq!(settings.collect_config().concurrency, 8);
        assert_eq!(settings.fetch_timeout, Duration::from_secs(12));
    }

    #[test]
    fn test_invalid_number_is_error() {
        assert!(Settings::from_lookup(lookup(&[("RULEGEN_CONCURRENCY", "many")])).is_err());
    }

    #[tokio::test]
    async fn test_bootstrap_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config").join(CONFIG_FILE);

        let config = FeedConfig::load_or_bootstrap(&path).await.unwrap();
        assert_eq!(config, FeedConfig::default());
        assert_eq!(config.sources.cn_domains.len(), 4);
        assert!(path.exists());

        let reloaded = FeedConfig::load_or_bootstrap(&path).await.unwrap();
        assert_eq!(reloaded, config);
    }

    #[tokio::test]
    async fn test_load_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        tokio::fs::write(&path, r#"{"sources": {"cn_domains": ["a.list"]}}"#)
            .await
            .unwrap();

        let config = FeedConfig::load_or_bootstrap(&path).await.unwrap();
        assert_eq!(config.sources.cn_domains, vec!["a.list".to_string()]);
        assert!(config.sources.foreign_domains.is_empty());
    }

    #[tokio::test]
    async fn test_dns_server_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join(CN_DNS_FILE);
        assert_eq!(
            read_dns_servers(&missing, DEFAULT_CN_DNS).await.unwrap(),
            DEFAULT_CN_DNS
        );

        let empty = dir.path().join("empty.txt");
        tokio::fs::write(&empty, "# nothing here\n\n").await.unwrap();
        assert_eq!(
            read_dns_servers(&empty, DEFAULT_FOREIGN_DNS).await.unwrap(),
            DEFAULT_FOREIGN_DNS
        );

        let custom = dir.path().join(FOREIGN_DNS_FILE);
        tokio::fs::write(&custom, "tls://dns.example\n# off\n 9.9.9.9 \n")
            .await
            .unwrap();
        assert_eq!(
            read_dns_servers(&custom, DEFAULT_FOREIGN_DNS).await.unwrap(),
            vec!["tls://dns.example".to_string(), "9.9.9.9".to_string()]
        );
    }
}
