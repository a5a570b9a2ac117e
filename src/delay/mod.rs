//! Delayed resolution.
//!
//! Small helper for polling loops: resolve with a passthrough value after
//! a fixed delay, e.g. waiting for a just-created resource to become
//! visible before re-reading it.

use std::time::Duration;

/// Resolve with `value` after `delay`.
pub async fn resolve_after<T>(delay: Duration, value: T) -> T {
    tokio::time::sleep(delay).await;
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_resolves_after_delay() {
        let start = tokio::time::Instant::now();
        let value = resolve_after(Duration::from_millis(250), 7).await;
        assert_eq!(value, 7);
        assert!(start.elapsed() >= Duration::from_millis(250));
    }
}
