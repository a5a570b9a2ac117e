//! Contract with the wrapped database driver.
//!
//! # Responsibilities
//! - Define the failure shape a driver attempt reports
//! - Name the status codes the retry classifier distinguishes
//!
//! The driver itself is an external collaborator. An attempt is any future
//! producing `Result<T, DriverError>`; the adapter invokes the caller's
//! operation closure once per attempt.

use std::fmt;
use std::time::Duration;

/// Response header carrying the server-suggested retry delay in
/// milliseconds. Callers translating raw driver responses read it into
/// [`DriverError::retry_after`].
pub const RETRY_AFTER_HEADER: &str = "x-ms-retry-after-ms";

/// Status codes with classification significance.
pub mod status {
    pub const BAD_REQUEST: u16 = 400;
    pub const UNAUTHORIZED: u16 = 401;
    pub const FORBIDDEN: u16 = 403;
    pub const NOT_FOUND: u16 = 404;
    pub const CONFLICT: u16 = 409;
    pub const PRECONDITION_FAILED: u16 = 412;
    pub const ENTITY_TOO_LARGE: u16 = 413;
    pub const TOO_MANY_REQUESTS: u16 = 429;
}

/// Failure reported by one driver attempt.
#[derive(Debug, Clone)]
pub struct DriverError {
    /// Numeric status code from the service.
    pub code: u16,

    /// Serialized error body, when the service sent one.
    pub body: Option<String>,

    /// Server-suggested delay before retrying, from the rate-limit header.
    pub retry_after: Option<Duration>,
}

impl DriverError {
    pub fn new(code: u16) -> Self {
        Self {
            code,
            body: None,
            retry_after: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_retry_after(mut self, delay: Duration) -> Self {
        self.retry_after = Some(delay);
        self
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "driver error: status {}", self.code)?;
        if let Some(body) = &self.body {
            write!(f, ": {body}")?;
        }
        Ok(())
    }
}

impl std::error::Error for DriverError {}
