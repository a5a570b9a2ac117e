//! Retry classification for driver status codes.
//!
//! # Design Decisions
//! - Request mistakes (400, 401, 403, 409, 412, 413) never retry; the
//!   service will answer them the same way every time
//! - 404 retries only when the caller opts in (read-after-create polling)
//! - Everything else (429, 5xx, connection-level codes) retries while
//!   budget remains; rate-limited responses carry their own delay

use crate::driver::status;

/// Whether a failed attempt with this status code may be retried.
pub fn is_retryable(code: u16, retry_on_not_found: bool) -> bool {
    match code {
        status::BAD_REQUEST
        | status::UNAUTHORIZED
        | status::FORBIDDEN
        | status::CONFLICT
        | status::PRECONDITION_FAILED
        | status::ENTITY_TOO_LARGE => false,
        status::NOT_FOUND => retry_on_not_found,
        _ => true,
    }
}
