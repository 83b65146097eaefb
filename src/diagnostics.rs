use dioxus::logger::tracing::debug;
use std::time::Duration;

/// Polling iterations slower than this are worth a debug line.
pub const SLOW_POLL_MS: u128 = 50;

#[inline]
pub fn log_perf(scope: &str, elapsed: Duration, details: &str) {
    let elapsed_ms = elapsed.as_millis();
    if elapsed_ms < SLOW_POLL_MS {
        return;
    }
    if details.trim().is_empty() {
        debug!("[perf] {scope} took {elapsed_ms}ms");
    } else {
        debug!("[perf] {scope} took {elapsed_ms}ms | {details}");
    }
}
