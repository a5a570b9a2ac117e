//! Admission control.
//!
//! # Responsibilities
//! - Track requests admitted but not yet settled
//! - Enforce the in-flight ceiling at admission time
//! - Re-poll deferred admissions until a slot frees up
//!
//! # Design Decisions
//! - Counter and ceiling live in an explicit context object: sharing one
//!   context across adapters gives a global throttle, separate contexts
//!   isolate workloads
//! - Deferred admissions are re-polled, not queued, so admission order is
//!   not FIFO under sustained contention
//! - Ceiling changes apply to subsequent admissions only; requests already
//!   in flight keep their slots

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use crate::config::ThrottleConfig;

/// Shared admission state: the in-flight counter and its ceiling.
#[derive(Debug)]
pub struct AdmissionContext {
    in_flight: AtomicU32,
    max_in_flight: AtomicU32,
}

impl AdmissionContext {
    pub fn new(config: &ThrottleConfig) -> Self {
        Self {
            in_flight: AtomicU32::new(0),
            max_in_flight: AtomicU32::new(config.max_in_flight),
        }
    }

    /// Admit immediately if a slot is free. The returned guard releases the
    /// slot when dropped, i.e. when the call settles.
    pub fn try_admit(&self) -> Option<InFlightGuard<'_>> {
        let ceiling = self.max_in_flight.load(Ordering::Acquire);
        let mut current = self.in_flight.load(Ordering::Acquire);
        loop {
            if current >= ceiling {
                return None;
            }
            match self.in_flight.compare_exchange(
                current,
                current + 1,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return Some(InFlightGuard { context: self }),
                Err(observed) => current = observed,
            }
        }
    }

    /// Admit, re-polling at `poll_delay` while the ceiling is reached.
    /// Callers pass their retry delay; deferral consumes no retry budget.
    pub async fn admit(&self, poll_delay: Duration) -> InFlightGuard<'_> {
        loop {
            if let Some(guard) = self.try_admit() {
                return guard;
            }
            tracing::debug!(
                in_flight = self.in_flight(),
                max_in_flight = self.max_in_flight(),
                delay_ms = poll_delay.as_millis() as u64,
                "admission deferred"
            );
            tokio::time::sleep(poll_delay).await;
        }
    }

    /// Number of requests admitted but not yet settled.
    pub fn in_flight(&self) -> u32 {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn max_in_flight(&self) -> u32 {
        self.max_in_flight.load(Ordering::Acquire)
    }

    /// Change the ceiling. Read fresh at each admission check, so the new
    /// value governs subsequent admissions only.
    pub fn set_max_in_flight(&self, ceiling: u32) {
        self.max_in_flight.store(ceiling, Ordering::Release);
    }
}

impl Default for AdmissionContext {
    fn default() -> Self {
        Self::new(&ThrottleConfig::default())
    }
}

/// Occupied in-flight slot. Dropping it releases the slot exactly once,
/// however the call settled.
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    context: &'a AdmissionContext,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.context.in_flight.fetch_sub(1, Ordering::AcqRel);
    }
}
