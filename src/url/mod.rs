//! URL handling module for Trawl
//!
//! This module provides the trap filter applied to every discovered link,
//! along with the helpers it is built from: host suffix matching, network
//! location extraction, the frontier deduplication key, and the constant
//! denylist tables.

mod domain;
mod matcher;
mod normalize;
pub mod tables;
mod validator;

// Re-export main functions
pub use domain::{extract_netloc, netloc_of};
pub use matcher::{matches_any_suffix, matches_host_suffix};
pub use normalize::frontier_key;
pub use tables::denied_extension;
pub use validator::{TrapReason, UrlValidator, Verdict};
