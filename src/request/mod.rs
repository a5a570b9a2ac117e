//! Throttled, retrying request execution.
//!
//! # Data Flow
//! ```text
//! execute(op)
//!     → throttle (wait for an in-flight slot; re-polled at the call's
//!       retry delay, no budget cost)
//!     → attempt under the per-attempt timeout
//!     → on failure: classify.rs (retryable?)
//!         → wait server-suggested or fixed delay, re-invoke op
//!     → settle: resolve, or reject with the enriched error
//! ```
//!
//! # Design Decisions
//! - The timeout bounds each attempt, not the call; total latency may
//!   exceed it across retries
//! - The in-flight slot is held across retries and released exactly once
//!   when the call settles (RAII guard)
//! - A timed-out attempt's future is dropped, so a late completion cannot
//!   settle the call twice
//! - A timed-out attempt consumes retry budget and is re-attempted
//!   immediately; classified errors wait out the retry delay first

pub mod classify;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tokio::time::timeout;

use crate::config::RequestPolicy;
use crate::driver::DriverError;
use crate::throttle::AdmissionContext;

/// Terminal failure of a throttled call.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Every attempt exceeded the per-attempt timeout.
    #[error("request timed out after {attempts} attempt(s) of {timeout_ms} ms")]
    AttemptTimeout { timeout_ms: u64, attempts: u32 },

    /// Structured service error parsed from the driver's error body.
    #[error("{name}: {message} (status {code})")]
    Status {
        code: u16,
        name: String,
        message: String,
    },

    /// Driver failure without a parseable body.
    #[error(transparent)]
    Driver(#[from] DriverError),
}

impl RequestError {
    /// Status code of the underlying failure, when one exists.
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::AttemptTimeout { .. } => None,
            Self::Status { code, .. } => Some(*code),
            Self::Driver(err) => Some(err.code),
        }
    }
}

/// JSON shape of the service's error bodies.
#[derive(Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
}

/// Per-call retry state. Admission precedes the loop and settling exits
/// it, so neither needs a variant; the in-flight guard drops on every
/// exit path.
enum CallState {
    Attempting { attempt: u32, retries_left: u32 },
    Retrying { attempt: u32, retries_left: u32, delay: Duration },
}

/// Executes driver operations under a shared throttle and a retry policy.
#[derive(Debug, Clone)]
pub struct RequestAdapter {
    context: Arc<AdmissionContext>,
    policy: RequestPolicy,
}

impl RequestAdapter {
    pub fn new(context: Arc<AdmissionContext>, policy: RequestPolicy) -> Self {
        Self { context, policy }
    }

    pub fn context(&self) -> &Arc<AdmissionContext> {
        &self.context
    }

    pub fn policy(&self) -> &RequestPolicy {
        &self.policy
    }

    /// Run `op` to completion under the throttle: admit, attempt with the
    /// per-attempt timeout, retry classified-transient failures, settle
    /// exactly once. `op` is invoked fresh for every attempt.
    pub async fn execute<T, F, Fut>(&self, mut op: F) -> Result<T, RequestError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, DriverError>>,
    {
        let _slot = self.context.admit(self.policy.retry_delay()).await;

        let mut state = CallState::Attempting {
            attempt: 1,
            retries_left: self.policy.max_retries,
        };

        loop {
            state = match state {
                CallState::Attempting {
                    attempt,
                    retries_left,
                } => match timeout(self.policy.attempt_timeout(), op()).await {
                    Ok(Ok(value)) => return Ok(value),
                    Ok(Err(err)) => {
                        if retries_left > 0
                            && classify::is_retryable(err.code, self.policy.retry_on_not_found)
                        {
                            let delay = err.retry_after.unwrap_or_else(|| self.policy.retry_delay());
                            tracing::debug!(
                                attempt,
                                code = err.code,
                                delay_ms = delay.as_millis() as u64,
                                "retrying after driver error"
                            );
                            CallState::Retrying {
                                attempt,
                                retries_left: retries_left - 1,
                                delay,
                            }
                        } else {
                            tracing::warn!(attempt, code = err.code, "request failed");
                            return Err(enrich(err));
                        }
                    }
                    Err(_) => {
                        if retries_left > 0 {
                            tracing::debug!(
                                attempt,
                                timeout_ms = self.policy.attempt_timeout_ms,
                                "attempt timed out, retrying"
                            );
                            CallState::Retrying {
                                attempt,
                                retries_left: retries_left - 1,
                                delay: Duration::ZERO,
                            }
                        } else {
                            tracing::warn!(
                                attempt,
                                timeout_ms = self.policy.attempt_timeout_ms,
                                "request timed out"
                            );
                            return Err(RequestError::AttemptTimeout {
                                timeout_ms: self.policy.attempt_timeout_ms,
                                attempts: attempt,
                            });
                        }
                    }
                },
                CallState::Retrying {
                    attempt,
                    retries_left,
                    delay,
                } => {
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    CallState::Attempting {
                        attempt: attempt + 1,
                        retries_left,
                    }
                }
            };
        }
    }
}

/// Best-effort enrichment of a terminal driver error: surface the parsed
/// name and message when the body is structured JSON, the raw error
/// otherwise.
fn enrich(err: DriverError) -> RequestError {
    if let Some(body) = &err.body {
        if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
            if parsed.code.is_some() || parsed.message.is_some() {
                return RequestError::Status {
                    code: err.code,
                    name: parsed.code.unwrap_or_else(|| "Error".to_string()),
                    message: parsed.message.unwrap_or_default(),
                };
            }
        }
    }
    RequestError::Driver(err)
}
