//! Manifest generation
//!
//! The manifest is a small text file written once at the root of the mirror.
//! It records the project metadata from the configuration, the seed URL and a
//! few facts about the crawl that produced the mirror.

use crate::config::ManifestConfig;
use crate::output::stats::CrawlReport;
use crate::output::OutputResult;
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Everything written to the manifest file
#[derive(Debug, Clone)]
pub struct Manifest {
    pub author: String,
    pub license: String,
    pub version: String,
    pub project: String,
    pub seed_url: String,
    pub generated_at: DateTime<Utc>,
    pub pages_saved: usize,
    pub pages_failed: usize,
    pub config_hash: Option<String>,
}

impl Manifest {
    /// Builds a manifest from configuration metadata and a crawl report
    pub fn new(meta: &ManifestConfig, report: &CrawlReport, config_hash: Option<&str>) -> Self {
        Self {
            author: meta.author.clone(),
            license: meta.license.clone(),
            version: meta.version.clone(),
            project: meta.project.clone(),
            seed_url: report.seed_url.clone(),
            generated_at: report.finished_at.unwrap_or_else(Utc::now),
            pages_saved: report.saved_count(),
            pages_failed: report.failed_count(),
            config_hash: config_hash.map(str::to_string),
        }
    }
}

/// Formats a manifest as text
///
/// The metadata sits inside a comment block so the file can be dropped next
/// to templates without being mistaken for content.
pub fn format_manifest(manifest: &Manifest) -> String {
    let mut text = String::new();

    text.push_str("/*\n\n");
    text.push_str(&format!("@author: {}\n", manifest.author));
    text.push_str(&format!("@license: {}\n", manifest.license));
    text.push_str(&format!("@version: {}\n", manifest.version));
    text.push_str(&format!("@project: {}\n\n", manifest.project));
    text.push_str(&format!("Web Site URL: {}\n", manifest.seed_url));
    text.push_str(&format!(
        "Mirrored: {}\n",
        manifest.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    text.push_str(&format!(
        "Pages: {} saved, {} failed\n",
        manifest.pages_saved, manifest.pages_failed
    ));
    if let Some(hash) = &manifest.config_hash {
        text.push_str(&format!("Config: sha256:{}\n", hash));
    }
    text.push_str("*/\n");

    text
}

/// Picks the manifest file name, avoiding names already used by the mirror
///
/// When `preferred` is taken, a numbered variant is used instead
/// (`README.txt`, then `README-1.txt`, `README-2.txt`, ...).
pub fn manifest_file_name(preferred: &str, is_taken: impl Fn(&str) -> bool) -> String {
    if !is_taken(preferred) {
        return preferred.to_string();
    }

    let (stem, extension) = match preferred.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (preferred, None),
    };

    (1u32..)
        .map(|n| match extension {
            Some(ext) => format!("{}-{}.{}", stem, n, ext),
            None => format!("{}-{}", stem, n),
        })
        .find(|name| !is_taken(name))
        .unwrap_or_else(|| preferred.to_string())
}

/// Writes the manifest into `root`, replacing any previous one
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(OutputError)` - The root could not be created or the file written
pub fn write_manifest(manifest: &Manifest, root: &Path, file_name: &str) -> OutputResult<PathBuf> {
    std::fs::create_dir_all(root)?;

    let path = root.join(file_name);
    let mut file = File::create(&path)?;
    file.write_all(format_manifest(manifest).as_bytes())?;

    Ok(path)
}
