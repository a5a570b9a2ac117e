//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! caller config (embedded structs or deserialized file section)
//!     → schema.rs (defaults for omitted fields)
//!     → validation.rs (semantic checks)
//!     → ThrottleConfig feeds an AdmissionContext
//!     → RequestPolicy feeds a RequestAdapter
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so minimal configs work
//! - The ceiling itself stays mutable at runtime on the context; the
//!   config only seeds it

pub mod schema;
pub mod validation;

pub use schema::RequestPolicy;
pub use schema::ThrottleConfig;
pub use validation::{validate_policy, validate_throttle, ValidationError};
