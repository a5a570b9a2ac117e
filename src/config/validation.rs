//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (ceiling > 0, timeout > 0)
//!
//! # Design Decisions
//! - Validation is a pure function over the config structs
//! - Runs before a config is handed to an adapter or context

use thiserror::Error;

use super::schema::{RequestPolicy, ThrottleConfig};

/// Semantic configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A ceiling of zero would defer every admission forever.
    #[error("max_in_flight must be greater than zero")]
    ZeroCeiling,

    /// A zero timeout would fail every attempt before the driver runs.
    #[error("attempt_timeout_ms must be greater than zero")]
    ZeroTimeout,
}

pub fn validate_throttle(config: &ThrottleConfig) -> Result<(), ValidationError> {
    if config.max_in_flight == 0 {
        return Err(ValidationError::ZeroCeiling);
    }
    Ok(())
}

pub fn validate_policy(policy: &RequestPolicy) -> Result<(), ValidationError> {
    if policy.attempt_timeout_ms == 0 {
        return Err(ValidationError::ZeroTimeout);
    }
    Ok(())
}
