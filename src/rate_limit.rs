use axum::http::HeaderMap;
use dashmap::DashMap;
use std::net::SocketAddr;
use std::time::{SystemTime, UNIX_EPOCH};

// Sliding-window rate limiter keyed by client identifier.
//
// Each identifier maps to the ordered timestamps (ms) of its recent
// requests. Every admission check prunes stamps that fell out of the
// window and appends the current attempt, so the count is evaluated
// against the true rolling window rather than fixed buckets. The
// DashMap entry guard holds the shard lock for the whole
// read-modify-write, so concurrent checks for one identifier cannot
// lose updates and under-count.
pub struct RateLimiter {
    windows: DashMap<String, Vec<u64>>,
    max_requests: usize,
    window_ms: u64,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window_ms: u64) -> Self {
        Self {
            windows: DashMap::new(),
            max_requests: max_requests as usize,
            window_ms,
        }
    }

    // Check and record one attempt. A rejected attempt still counts
    // toward the window (decline-but-count policy).
    pub fn admit(&self, identifier: &str, now_ms: u64) -> bool {
        let cutoff = now_ms.saturating_sub(self.window_ms);
        let mut stamps = self.windows.entry(identifier.to_string()).or_default();
        stamps.retain(|&t| t > cutoff);
        stamps.push(now_ms);
        stamps.len() <= self.max_requests
    }

    // Drop identifiers whose newest stamp has aged out of the window.
    // Only bounds memory; admission semantics prune per-check anyway.
    pub fn sweep(&self, now_ms: u64) {
        let cutoff = now_ms.saturating_sub(self.window_ms);
        self.windows
            .retain(|_, stamps| stamps.last().is_some_and(|&t| t > cutoff));
    }

    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }
}

// Current wall-clock time in milliseconds
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

// Client identifier: first X-Forwarded-For entry if present, else the
// connecting peer address.
pub fn client_id(headers: &HeaderMap, addr: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .unwrap_or_else(|| addr.ip().to_string())
}
