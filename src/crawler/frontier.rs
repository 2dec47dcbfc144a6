//! Crawl frontier: pending queue plus visited set
//!
//! The frontier is the only place that decides whether a URL may be fetched.
//! It guarantees that:
//! - a URL is pending at most once
//! - a URL that has been dequeued never becomes pending again
//! - every dequeued URL is recorded as visited exactly once

use crate::state::PageState;
use std::collections::{HashMap, HashSet, VecDeque};
use thiserror::Error;
use url::Url;

/// Errors returned by frontier operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrontierError {
    /// Nothing left to fetch; the crawl loop terminates on this
    #[error("Frontier is empty")]
    Empty,

    #[error("URL was not dequeued or was already marked visited: {0}")]
    NotInFlight(String),

    #[error("Invalid state transition for {url}: {from} -> {to}")]
    InvalidTransition {
        url: String,
        from: PageState,
        to: PageState,
    },
}

/// A URL waiting to be fetched, with the page it was found on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    /// The URL to fetch
    pub url: Url,

    /// Page the link was discovered on (`None` for the seed)
    pub found_on: Option<Url>,
}

impl CrawlTarget {
    /// Creates the target for the seed URL
    pub fn seed(url: Url) -> Self {
        Self {
            url,
            found_on: None,
        }
    }

    /// Creates a target discovered on `page`
    pub fn discovered(url: Url, page: &Url) -> Self {
        Self {
            url,
            found_on: Some(page.clone()),
        }
    }

    /// Key used for de-duplication
    pub fn key(&self) -> &str {
        self.url.as_str()
    }
}

/// FIFO frontier with de-duplication
#[derive(Debug, Default)]
pub struct Frontier {
    /// Targets waiting to be fetched, oldest first
    pending: VecDeque<CrawlTarget>,

    /// Keys of everything in `pending`
    pending_keys: HashSet<String>,

    /// Dequeued but not yet marked visited
    in_flight: HashSet<String>,

    /// Finished URLs and their terminal state
    visited: HashMap<String, PageState>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frontier holding only the seed
    pub fn with_seed(seed: Url) -> Self {
        let mut frontier = Self::new();
        frontier.enqueue(CrawlTarget::seed(seed));
        frontier
    }

    /// Adds a target unless its URL is already pending, in flight or visited
    ///
    /// Returns true if the target was added.
    pub fn enqueue(&mut self, target: CrawlTarget) -> bool {
        let key = target.key();
        if self.is_known(key) {
            tracing::trace!("Already known, not enqueuing: {}", key);
            return false;
        }

        self.pending_keys.insert(key.to_string());
        self.pending.push_back(target);
        true
    }

    /// Removes and returns the earliest enqueued target
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlTarget)` - The next target; it is now in flight
    /// * `Err(FrontierError::Empty)` - Nothing is pending
    pub fn dequeue(&mut self) -> Result<CrawlTarget, FrontierError> {
        let target = self.pending.pop_front().ok_or(FrontierError::Empty)?;
        self.pending_keys.remove(target.key());
        self.in_flight.insert(target.key().to_string());
        Ok(target)
    }

    /// Records the outcome of a dequeued URL
    ///
    /// Must be called exactly once per dequeued URL, with a terminal state.
    pub fn mark_visited(&mut self, url: &Url, state: PageState) -> Result<(), FrontierError> {
        if !PageState::Fetching.can_transition_to(state) {
            return Err(FrontierError::InvalidTransition {
                url: url.to_string(),
                from: PageState::Fetching,
                to: state,
            });
        }

        if !self.in_flight.remove(url.as_str()) {
            return Err(FrontierError::NotInFlight(url.to_string()));
        }

        self.visited.insert(url.to_string(), state);
        Ok(())
    }

    /// Returns true if nothing is pending
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of pending targets
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Number of visited URLs
    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    fn is_known(&self, key: &str) -> bool {
        self.pending_keys.contains(key) || self.in_flight.contains(key) || self.visited.contains_key(key)
    }
}
