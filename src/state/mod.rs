//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `UrlState`: the lifecycle of a URL inside a persisted frontier (pending, fetched)
//! - `LoopState`: the two-state machine driving the crawl loop (running, done)

mod loop_state;
mod url_state;

// Re-export main types
pub use loop_state::LoopState;
pub use url_state::UrlState;
