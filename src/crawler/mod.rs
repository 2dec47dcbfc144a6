//! Crawler module for fetching and mirroring pages
//!
//! This module contains the core crawling logic, including:
//! - The frontier (FIFO queue plus visited set)
//! - HTTP fetching
//! - HTML link extraction
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, FetchError, FetchedPage, Fetcher};
pub use frontier::{CrawlTarget, Frontier, FrontierError};
pub use parser::extract_links;
