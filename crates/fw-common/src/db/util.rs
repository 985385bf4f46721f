use std::{sync::OnceLock, time::Instant};

use tracing::warn;

fn parse_threshold(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|raw| raw.trim().parse::<i64>().ok())
        .map(|v| v.max(0) as u64)
        .filter(|v| *v > 0)
}

fn slow_query_threshold_ms() -> Option<u64> {
    static CACHE: OnceLock<Option<u64>> = OnceLock::new();

    *CACHE.get_or_init(|| {
        parse_threshold(std::env::var("FW_DB_LOG_MIN_DURATION_MS").ok().as_deref())
    })
}

/// Warn when a query took longer than `FW_DB_LOG_MIN_DURATION_MS`.
pub fn log_if_slow(label: &str, started_at: Instant) {
    if let Some(threshold_ms) = slow_query_threshold_ms() {
        let elapsed_ms = started_at.elapsed().as_millis() as u64;
        if elapsed_ms >= threshold_ms {
            warn!(query = label, elapsed_ms, "slow_query_detected");
        }
    }
}

/// Escape LIKE metacharacters and wrap the value for a substring match.
pub fn contains_pattern(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
