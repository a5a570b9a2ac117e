//! Configuration schema definitions.
//!
//! All types derive Serde traits so callers can embed them in their own
//! config files. Every field has a default so minimal configs work.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Admission-control settings shared by every adapter using one context.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ThrottleConfig {
    /// Maximum number of requests in flight at once.
    pub max_in_flight: u32,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self { max_in_flight: 25 }
    }
}

/// Per-call timeout and retry policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RequestPolicy {
    /// Per-attempt timeout in milliseconds. This bounds each attempt, not
    /// the whole call; total latency may exceed it across retries.
    pub attempt_timeout_ms: u64,

    /// Maximum number of retries after the first attempt.
    pub max_retries: u32,

    /// Delay before a retry when the server suggests none, in milliseconds.
    /// Also the interval at which a deferred admission is re-checked.
    pub retry_delay_ms: u64,

    /// Treat 404 responses as retryable. Used by read-after-create polling,
    /// where a just-created resource may not be visible yet.
    pub retry_on_not_found: bool,
}

impl Default for RequestPolicy {
    fn default() -> Self {
        Self {
            attempt_timeout_ms: 60_000,
            max_retries: 0,
            retry_delay_ms: 100,
            retry_on_not_found: false,
        }
    }
}

impl RequestPolicy {
    /// Policy with a retry budget and otherwise default settings.
    pub fn with_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_millis(self.attempt_timeout_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}
