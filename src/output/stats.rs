//! Crawl report: per-URL outcomes and summary statistics
//!
//! The coordinator records one `PageRecord` per dequeued URL. The report is
//! returned to the caller when the crawl finishes and is also the source of
//! the page counts written to the manifest.

use crate::state::PageState;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Outcome of one fetch attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    /// The URL that was fetched
    pub url: String,

    /// Local path (relative to the output directory) the URL maps to
    pub path: PathBuf,

    /// Terminal state: `Saved` or `Failed`
    pub state: PageState,

    /// Failure reason for failed pages
    pub error: Option<String>,
}

impl PageRecord {
    pub fn saved(url: &str, path: PathBuf) -> Self {
        Self {
            url: url.to_string(),
            path,
            state: PageState::Saved,
            error: None,
        }
    }

    pub fn failed(url: &str, path: PathBuf, error: impl Into<String>) -> Self {
        Self {
            url: url.to_string(),
            path,
            state: PageState::Failed,
            error: Some(error.into()),
        }
    }
}

/// Summary of a finished crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// The seed URL
    pub seed_url: String,

    /// Every processed URL, in processing order
    pub records: Vec<PageRecord>,

    /// When the crawl started
    pub started_at: DateTime<Utc>,

    /// When the frontier emptied (or the page cap was hit)
    pub finished_at: Option<DateTime<Utc>>,

    /// Absolute path of the written manifest
    pub manifest_path: Option<PathBuf>,
}

impl CrawlReport {
    /// Creates an empty report for a crawl starting now
    pub fn new(seed_url: &str) -> Self {
        Self {
            seed_url: seed_url.to_string(),
            records: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
            manifest_path: None,
        }
    }

    /// Appends the outcome of one URL
    pub fn record(&mut self, record: PageRecord) {
        self.records.push(record);
    }

    /// Marks the crawl as finished
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Number of processed URLs
    pub fn total(&self) -> usize {
        self.records.len()
    }

    /// Number of saved pages
    pub fn saved_count(&self) -> usize {
        self.records.iter().filter(|r| r.state.is_success()).count()
    }

    /// Number of failed pages
    pub fn failed_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.state == PageState::Failed)
            .count()
    }

    /// Iterates over the failed records
    pub fn failures(&self) -> impl Iterator<Item = &PageRecord> {
        self.records.iter().filter(|r| r.state == PageState::Failed)
    }

    /// Returns the success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        (self.saved_count() as f64 / self.total() as f64) * 100.0
    }

    /// Wall-clock duration of the crawl in seconds, if finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }

    /// Looks up the record for a URL
    pub fn get(&self, url: &str) -> Option<&PageRecord> {
        self.records.iter().find(|r| r.url == url)
    }
}

/// Prints the report to stdout in a formatted manner
pub fn print_report(report: &CrawlReport) {
    println!("=== Mirror Report ===\n");

    println!("Seed: {}", report.seed_url);
    if let Some(duration) = report.duration_seconds() {
        println!("Duration: {} seconds", duration);
    }
    println!();

    println!("Pages:");
    println!("  Processed: {}", report.total());
    println!("  Saved: {}", report.saved_count());
    println!("  Failed: {}", report.failed_count());
    println!();

    if report.failed_count() > 0 {
        println!("Failures:");
        for record in report.failures() {
            println!(
                "  - {} ({})",
                record.url,
                record.error.as_deref().unwrap_or("unknown error")
            );
        }
        println!();
    }

    if let Some(manifest) = &report.manifest_path {
        println!("Manifest: {}", manifest.display());
    }

    println!(
        "Success Rate: {:.1}% ({} / {} pages saved)",
        report.success_rate(),
        report.saved_count(),
        report.total()
    );
}
