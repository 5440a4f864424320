use std::fmt;

/// State of the crawl loop
///
/// The loop is `Running` while the frontier still has URLs to hand out and
/// becomes `Done` once it is exhausted. `Done` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Frontier has pending URLs
    Running,

    /// Frontier is exhausted; the report has been (or is about to be) written
    Done,
}

impl LoopState {
    /// Derives the loop state from whether the frontier has more work
    pub fn from_pending(has_next: bool) -> Self {
        if has_next {
            Self::Running
        } else {
            Self::Done
        }
    }

    /// Returns true once the loop can no longer make progress
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for LoopState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Done => write!(f, "done"),
        }
    }
}
