//! The `generate` run: collect both categories, render, write `dist/`.

use anyhow::{Context, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use domain_feeds::overrides::custom_domains;
use domain_feeds::{Collector, DnsMap, DomainSet, Fetcher};

use crate::config::{
    read_dns_servers, FeedConfig, Settings, CN_DNS_FILE, CONFIG_FILE, CUSTOM_CN_DOMAINS_FILE,
    CUSTOM_DOMAIN_DNS_FILE, CUSTOM_FOREIGN_DOMAINS_FILE, DEFAULT_CN_DNS, DEFAULT_FOREIGN_DNS,
    FOREIGN_DNS_FILE,
};
use crate::render::adguard::{self, Mode, Upstreams};
use crate::render::{beijing_timestamp, lists, quanx};

pub const WHITELIST_FILE: &str = "gn.txt";
pub const BLACKLIST_FILE: &str = "gw.txt";
pub const CN_DOMAINS_FILE: &str = "cn_domains.txt";
pub const FOREIGN_DOMAINS_FILE: &str = "foreign_domains.txt";
pub const OVERRIDES_DEBUG_FILE: &str = "custom_domain_dns_debug.txt";
pub const QUANX_FILE: &str = "quanx_whitelist.txt";

/// Counts and files of a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    pub cn_domains: usize,
    pub foreign_domains: usize,
    pub blacklist_domains: usize,
    pub overrides: usize,
    pub files: Vec<PathBuf>,
}

/// Run the whole pipeline with `fetcher` as the feed source.
pub async fn generate<F: Fetcher>(settings: &Settings, fetcher: F) -> Result<GenerateReport> {
    let feeds = FeedConfig::load_or_bootstrap(&settings.config_path(CONFIG_FILE)).await?;

    let upstreams = Upstreams {
        cn: read_dns_servers(&settings.config_path(CN_DNS_FILE), DEFAULT_CN_DNS).await?,
        foreign: read_dns_servers(&settings.config_path(FOREIGN_DNS_FILE), DEFAULT_FOREIGN_DNS)
            .await?,
    };
    info!(dns = ?upstreams.cn, "Using domestic DNS servers");
    info!(dns = ?upstreams.foreign, "Using foreign DNS servers");

    let overrides_path = settings.config_path(CUSTOM_DOMAIN_DNS_FILE);
    let overrides = read_overrides(&overrides_path).await;
    info!(
        rules = overrides.len(),
        groups = overrides.groups().len(),
        "Loaded custom domain DNS rules"
    );

    let collector = Collector::new(fetcher).with_config(settings.collect_config());

    info!("Collecting domestic domains");
    let cn_custom = settings.config_path(CUSTOM_CN_DOMAINS_FILE);
    let cn = collector
        .collect(&feeds.sources.cn_domains, Some(cn_custom.as_path()))
        .await;
    info!(count = cn.len(), "Domestic domains collected");

    info!("Collecting foreign domains");
    let foreign_custom = settings.config_path(CUSTOM_FOREIGN_DOMAINS_FILE);
    let foreign = collector
        .collect(&feeds.sources.foreign_domains, Some(foreign_custom.as_path()))
        .await;
    info!(count = foreign.len(), "Foreign domains collected");

    // Domains explicitly marked domestic never go to the foreign upstreams
    let custom_cn = read_custom(&cn_custom).await;
    let blacklist = foreign.difference(&custom_cn);
    info!(
        count = blacklist.len(),
        removed = foreign.len() - blacklist.len(),
        "Foreign domains after removing custom domestic entries"
    );

    log_override_coverage(&overrides, &cn, &blacklist);

    let generated_at = beijing_timestamp(Utc::now());
    let mut outputs = vec![
        (
            WHITELIST_FILE,
            adguard::render(Mode::Whitelist, &cn, &upstreams, &overrides, &generated_at),
        ),
        (
            BLACKLIST_FILE,
            adguard::render(Mode::Blacklist, &blacklist, &upstreams, &overrides, &generated_at),
        ),
        (CN_DOMAINS_FILE, lists::domain_list(&cn)),
        (FOREIGN_DOMAINS_FILE, lists::domain_list(&foreign)),
        (QUANX_FILE, quanx::render(&cn)),
    ];
    if !overrides.is_empty() {
        outputs.push((OVERRIDES_DEBUG_FILE, lists::overrides_debug(&overrides)));
    }

    let files = write_outputs(&settings.output_dir, outputs).await?;

    info!(
        cn = cn.len(),
        foreign = blacklist.len(),
        overrides = overrides.len(),
        output_dir = %settings.output_dir.display(),
        "Rule files generated"
    );

    Ok(GenerateReport {
        cn_domains: cn.len(),
        foreign_domains: foreign.len(),
        blacklist_domains: blacklist.len(),
        overrides: overrides.len(),
        files,
    })
}

/// An unreadable override file leaves the run without its overrides.
async fn read_overrides(path: &Path) -> DnsMap {
    let overrides = match DnsMap::read(path).await {
        Ok(overrides) => overrides,
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %format!("{:#}", anyhow::Error::from(e)),
                "Failed to read custom DNS file, continuing without it"
            );
            return DnsMap::default();
        }
    };
    for rejected in overrides.rejected() {
        warn!(
            path = %path.display(),
            line_number = rejected.line_number,
            line = %rejected.line,
            reason = %rejected.reason,
            "Skipping custom DNS entry"
        );
    }
    overrides
}

async fn read_custom(path: &Path) -> DomainSet {
    match custom_domains::read(path).await {
        Ok(parsed) => parsed.map(|parsed| parsed.domains).unwrap_or_default(),
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %format!("{:#}", anyhow::Error::from(e)),
                "Failed to read custom domestic list, nothing removed from foreign set"
            );
            DomainSet::new()
        }
    }
}

fn log_override_coverage(overrides: &DnsMap, cn: &DomainSet, foreign: &DomainSet) {
    if overrides.is_empty() {
        return;
    }
    let cn_covered = cn.iter().filter(|d| overrides.covers(d)).count();
    let foreign_covered = foreign.iter().filter(|d| overrides.covers(d)).count();
    if cn_covered > 0 {
        info!(count = cn_covered, "Custom DNS rules override domestic domains");
    }
    if foreign_covered > 0 {
        info!(count = foreign_covered, "Custom DNS rules override foreign domains");
    }
}

async fn write_outputs(dir: &Path, outputs: Vec<(&str, String)>) -> Result<Vec<PathBuf>> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let mut files = Vec::with_capacity(outputs.len());
    for (name, content) in outputs {
        let path = dir.join(name);
        tokio::fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "Wrote output file");
        files.push(path);
    }
    Ok(files)
}
