//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! the mirroring process, including:
//! - Seeding and draining the frontier
//! - Coordinating fetching, link extraction and classification
//! - Persisting fetched content under the mirror root
//! - Writing the manifest when the frontier is exhausted

use crate::config::Config;
use crate::crawler::frontier::{CrawlTarget, Frontier, FrontierError};
use crate::crawler::parser::extract_links;
use crate::crawler::{FetchError, FetchedPage, Fetcher};
use crate::output::{manifest_file_name, write_manifest, CrawlReport, Manifest, PageRecord};
use crate::storage::{open_storage, Storage};
use crate::url::{classify_link, extract_host, map_path, parse_seed_url, LinkClass};
use crate::{MirrorError, UrlError};
use std::path::{Path, PathBuf};
use url::Url;

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Config,
    seed: Url,
    seed_host: String,
    frontier: Frontier,
    fetcher: Fetcher,
    storage: Box<dyn Storage + Send>,
    config_hash: Option<String>,
}

impl Coordinator {
    /// Creates a coordinator writing to the configured output directory
    ///
    /// # Arguments
    ///
    /// * `config` - The validated configuration
    /// * `seed` - The seed URL; its host defines the crawl scope
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(MirrorError)` - The seed is not a usable http(s) URL, or the
    ///   HTTP client could not be built
    pub fn new(config: Config, seed: Url) -> Result<Self, MirrorError> {
        let storage = open_storage(&config.output, None);
        Self::with_storage(config, seed, Box::new(storage))
    }

    /// Creates a coordinator writing through the given storage backend
    pub fn with_storage(
        config: Config,
        seed: Url,
        storage: Box<dyn Storage + Send>,
    ) -> Result<Self, MirrorError> {
        let mut seed = parse_seed_url(seed.as_str())?;
        seed.set_fragment(None);
        let seed_host = extract_host(&seed).ok_or(UrlError::MissingHost)?;

        let fetcher = Fetcher::new(&config.fetcher)?;
        let frontier = Frontier::with_seed(seed.clone());

        Ok(Self {
            config,
            seed,
            seed_host,
            frontier,
            fetcher,
            storage,
            config_hash: None,
        })
    }

    /// Records the configuration fingerprint in the manifest
    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.config_hash = Some(hash.into());
        self
    }

    /// The host every followed link must share
    pub fn seed_host(&self) -> &str {
        &self.seed_host
    }

    /// Directory holding the mirrored tree and the manifest
    pub fn mirror_root(&self) -> PathBuf {
        self.storage.resolve(Path::new(&self.seed_host))
    }

    /// Runs the main crawl loop until the frontier is exhausted
    ///
    /// For every dequeued URL this:
    /// 1. Fetches the URL
    /// 2. Extracts and classifies links from HTML responses
    /// 3. Enqueues local links
    /// 4. Writes the body to its mapped path
    /// 5. Marks the URL visited as `Saved` or `Failed`
    ///
    /// Per-URL failures are recorded and never abort the crawl. The manifest
    /// is written once the loop ends.
    pub async fn run(&mut self) -> Result<CrawlReport, MirrorError> {
        tracing::info!("Mirroring {} into {}", self.seed, self.mirror_root().display());

        let mut report = CrawlReport::new(self.seed.as_str());
        let max_pages = self.config.crawler.max_pages as usize;
        let start_time = std::time::Instant::now();

        loop {
            if max_pages > 0 && report.total() >= max_pages {
                tracing::info!(
                    "Page limit of {} reached, {} URLs left unfetched",
                    max_pages,
                    self.frontier.pending_len()
                );
                break;
            }

            let target = match self.frontier.dequeue() {
                Ok(target) => target,
                Err(FrontierError::Empty) => {
                    tracing::info!(
                        "Frontier is empty after {} URLs, crawl complete",
                        self.frontier.visited_len()
                    );
                    break;
                }
                Err(e) => return Err(e.into()),
            };

            let record = self.process_target(&target).await;
            self.frontier.mark_visited(&target.url, record.state)?;
            report.record(record);

            if report.total() % 10 == 0 {
                tracing::info!(
                    "Progress: {} pages processed, {} in frontier",
                    report.total(),
                    self.frontier.pending_len()
                );
            }
        }

        report.finish();

        let preferred = &self.config.manifest.file_name;
        let site_dir = Path::new(&self.seed_host);
        let file_name = manifest_file_name(preferred, |name| {
            report
                .records
                .iter()
                .any(|r| r.state.is_success() && r.path == site_dir.join(name))
        });
        if &file_name != preferred {
            tracing::warn!(
                "{} is a mirrored page, writing the manifest as {} instead",
                preferred,
                file_name
            );
        }

        let manifest = Manifest::new(&self.config.manifest, &report, self.config_hash.as_deref());
        let manifest_path = write_manifest(&manifest, &self.mirror_root(), &file_name)?;
        tracing::info!("Manifest written to {}", manifest_path.display());
        report.manifest_path = Some(manifest_path);

        tracing::info!(
            "Crawl completed: {} saved, {} failed in {:?}",
            report.saved_count(),
            report.failed_count(),
            start_time.elapsed()
        );

        Ok(report)
    }

    /// Fetches, parses and persists a single target
    async fn process_target(&mut self, target: &CrawlTarget) -> PageRecord {
        let url_str = target.url.as_str();
        let path = map_path(&target.url, &self.seed_host);

        if let Some(origin) = &target.found_on {
            tracing::debug!("Fetching {} (linked from {})", url_str, origin);
        } else {
            tracing::debug!("Fetching seed {}", url_str);
        }

        let fetched = self.fetcher.fetch(&target.url).await;
        let page = match fetched.and_then(|page| self.ensure_on_site(page)) {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Failed {}: {}", url_str, e);
                return PageRecord::failed(url_str, path, e.to_string());
            }
        };

        if page.is_html() {
            let added = self.handle_discovered_links(&page.final_url, &page.body);
            tracing::debug!("{} new URLs queued from {}", added, url_str);
        }

        match self.storage.save(&path, &page.body) {
            Ok(outcome) => {
                tracing::info!("Saved {} -> {} ({:?})", url_str, path.display(), outcome);
                PageRecord::saved(url_str, path)
            }
            Err(e) => {
                tracing::warn!("Failed {}: {}", url_str, e);
                PageRecord::failed(url_str, path, e.to_string())
            }
        }
    }

    /// Rejects responses whose redirects ended on another host
    fn ensure_on_site(&self, page: FetchedPage) -> Result<FetchedPage, FetchError> {
        match extract_host(&page.final_url) {
            Some(host) if host == self.seed_host => Ok(page),
            _ => Err(FetchError::OffSite(page.final_url.to_string())),
        }
    }

    /// Classifies the links of a fetched page and enqueues local ones
    ///
    /// Returns the number of targets actually added to the frontier.
    fn handle_discovered_links(&mut self, page_url: &Url, body: &[u8]) -> usize {
        let mut added = 0;

        for raw in extract_links(body, &self.config.crawler.link_types) {
            match classify_link(&raw, page_url, &self.seed_host, &self.config.crawler.exclude) {
                LinkClass::Local(url) => {
                    if self.frontier.enqueue(CrawlTarget::discovered(url, page_url)) {
                        added += 1;
                    }
                }
                LinkClass::Excluded => tracing::trace!("Excluded link: {}", raw),
                LinkClass::Foreign => tracing::trace!("Foreign link: {}", raw),
                LinkClass::Empty => {}
            }
        }

        added
    }
}

/// Runs a complete mirror of `seed`
///
/// # Example
///
/// ```no_run
/// use site_mirror::config::load_config;
/// use site_mirror::crawler::run_crawl;
/// use std::path::Path;
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let seed = Url::parse("https://example.com/")?;
/// let report = run_crawl(config, seed).await?;
/// println!("{} pages saved", report.saved_count());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config, seed: Url) -> Result<CrawlReport, MirrorError> {
    let mut coordinator = Coordinator::new(config, seed)?;
    coordinator.run().await
}
