//! Throttled request execution for document-database drivers.
//!
//! Wraps an async driver operation with admission control (a shared
//! in-flight ceiling), a per-attempt timeout, and status-code-aware retries
//! honoring server-suggested backoff.

pub mod config;
pub mod delay;
pub mod driver;
pub mod request;
pub mod throttle;

pub use config::{RequestPolicy, ThrottleConfig};
pub use delay::resolve_after;
pub use driver::DriverError;
pub use request::{RequestAdapter, RequestError};
pub use throttle::AdmissionContext;
