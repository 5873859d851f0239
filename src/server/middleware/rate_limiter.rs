//! Advisory request rate limiter
//!
//! Sliding window over a concurrent map, keyed by client IP. The limiter is
//! constructed once and injected through app state; there is no process-wide
//! singleton, and tests reset it between cases.

use crate::config::RateLimitConfig;
use actix_web::HttpRequest;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Request counting window for a single client
struct RequestWindow {
    count: u32,
    window_start: Instant,
}

/// Sliding-window rate limiter
pub struct RateLimiter {
    /// Map of client identifier -> window
    requests: DashMap<String, RequestWindow>,
    /// Maximum requests per window
    max_requests: u32,
    /// Window length
    window: Duration,
    /// Whether limiting is enforced at all
    enabled: bool,
    /// Total denied requests counter for monitoring
    denied_count: AtomicU64,
}

impl RateLimiter {
    /// Create a limiter from configuration
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            requests: DashMap::new(),
            max_requests: config.max_requests,
            window: Duration::from_secs(config.window_secs),
            enabled: config.enabled,
            denied_count: AtomicU64::new(0),
        }
    }

    /// Record a request and check whether it is allowed
    ///
    /// Returns the seconds until the window resets when the client is over
    /// its budget.
    pub fn check(&self, client_id: &str) -> Result<(), u64> {
        if !self.enabled {
            return Ok(());
        }

        let now = Instant::now();
        let mut entry = self
            .requests
            .entry(client_id.to_string())
            .or_insert_with(|| RequestWindow {
                count: 0,
                window_start: now,
            });

        let window = entry.value_mut();
        if now.duration_since(window.window_start) > self.window {
            window.count = 0;
            window.window_start = now;
        }

        window.count += 1;
        if window.count > self.max_requests {
            self.denied_count.fetch_add(1, Ordering::Relaxed);
            let elapsed = now.duration_since(window.window_start);
            let remaining = self.window.saturating_sub(elapsed).as_secs().max(1);
            return Err(remaining);
        }

        Ok(())
    }

    /// Total requests denied since construction or the last reset
    pub fn denied_requests(&self) -> u64 {
        self.denied_count.load(Ordering::Relaxed)
    }

    /// Drop all tracked windows and counters
    pub fn reset(&self) {
        self.requests.clear();
        self.denied_count.store(0, Ordering::Relaxed);
    }

    /// Drop windows that have been idle for more than two window lengths
    pub fn cleanup_old_entries(&self) {
        let now = Instant::now();
        let max_age = self.window * 2;
        self.requests
            .retain(|_, window| now.duration_since(window.window_start) < max_age);
    }
}

/// Best-effort client identifier for rate limiting
pub fn client_ip(req: &HttpRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string()
}
