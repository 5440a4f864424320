//! Console output for the command-line modes
//!
//! This module handles:
//! - Frontier statistics for `--stats`
//! - Verdict listings for `--check`

pub mod stats;

pub use stats::{format_statistics, format_verdicts, print_statistics, print_verdicts};
