//! State module for tracking crawl progress
//!
//! `PageState` tracks where each URL is in its lifecycle. The frontier uses it
//! to record the outcome of every dequeued URL.

mod page_state;

pub use page_state::PageState;
