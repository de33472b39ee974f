//! Request identity for discarding stale generation results.
//!
//! Requests are not cancellable. When a caller starts a new generation
//! before the previous one returns, both complete; the caller compares
//! tokens and applies only the latest.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Identifies one orchestrator call. Later calls get larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestToken(u64);

impl RequestToken {
    /// The raw sequence number.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues monotonically increasing [`RequestToken`]s.
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: AtomicU64,
}

impl RequestTracker {
    /// Create a tracker that has issued nothing.
    pub const fn new() -> Self {
        Self {
            latest: AtomicU64::new(0),
        }
    }

    /// Issue the next token, which becomes the latest.
    pub fn issue(&self) -> RequestToken {
        let previous = self.latest.fetch_add(1, Ordering::SeqCst);
        RequestToken(previous.wrapping_add(1))
    }

    /// Whether no token has been issued after `token`.
    pub fn is_latest(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }
}
