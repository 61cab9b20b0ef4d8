use crate::application::ports::{
    rate_limit::{RateLimitDecision, RateLimiter},
    time::Clock,
};
use chrono::{DateTime, Duration, Utc};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

const PRUNE_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: DateTime<Utc>,
    count: u32,
}

/// Fixed-window counter keyed by client identity. State lives in process
/// memory, so each server instance counts separately.
pub struct FixedWindowRateLimiter {
    windows: Mutex<HashMap<String, Window>>,
    clock: Arc<dyn Clock>,
    max_requests: u32,
    window: Duration,
}

impl FixedWindowRateLimiter {
    pub fn new(clock: Arc<dyn Clock>, max_requests: u32, window: std::time::Duration) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            clock,
            max_requests: max_requests.max(1),
            window: Duration::from_std(window).unwrap_or_else(|_| Duration::minutes(15)),
        }
    }

    fn retry_after(&self, window: &Window, now: DateTime<Utc>) -> u64 {
        let reset_at = window.started_at + self.window;
        let secs = (reset_at - now).num_seconds().max(1);
        u64::try_from(secs).unwrap_or(1)
    }
}

impl RateLimiter for FixedWindowRateLimiter {
    fn check(&self, key: &str) -> RateLimitDecision {
        let now = self.clock.now();
        let mut windows = match self.windows.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if windows.len() >= PRUNE_THRESHOLD {
            let span = self.window;
            windows.retain(|_, w| now - w.started_at < span);
        }

        let window = windows.entry(key.to_string()).or_insert(Window {
            started_at: now,
            count: 0,
        });
        if now - window.started_at >= self.window {
            *window = Window {
                started_at: now,
                count: 0,
            };
        }

        if window.count >= self.max_requests {
            return RateLimitDecision::Limited {
                retry_after_secs: self.retry_after(window, now),
            };
        }

        window.count += 1;
        RateLimitDecision::Allowed {
            remaining: self.max_requests - window.count,
        }
    }
}
