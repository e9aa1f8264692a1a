use chrono::{DateTime, Duration, Utc};
use hourglass_rs::SafeTimeProvider;
use std::collections::HashMap;

use crate::errors::{BillingError, Result};

#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: DateTime<Utc>,
    count: u32,
}

/// keyed fixed-window rate limiter with explicit expiry. windows roll over
/// lazily on access and stale keys are dropped by [`FixedWindowLimiter::sweep`],
/// called whenever the owner chooses; there is no background task
#[derive(Debug)]
pub struct FixedWindowLimiter {
    max_requests: u32,
    window: Duration,
    windows: HashMap<String, Window>,
}

impl FixedWindowLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Result<Self> {
        if max_requests == 0 || window <= Duration::zero() {
            return Err(BillingError::InvalidConfiguration {
                message: format!(
                    "rate limit needs positive requests and window, got {} per {}",
                    max_requests, window
                ),
            });
        }
        Ok(Self {
            max_requests,
            window,
            windows: HashMap::new(),
        })
    }

    /// record one request for a key at an explicit instant. returns true
    /// when the request is within the limit
    pub fn check_at(&mut self, key: &str, now: DateTime<Utc>) -> bool {
        let window = self
            .windows
            .entry(key.to_string())
            .or_insert(Window {
                started_at: now,
                count: 0,
            });

        if now - window.started_at >= self.window {
            window.started_at = now;
            window.count = 0;
        }

        if window.count >= self.max_requests {
            return false;
        }
        window.count += 1;
        true
    }

    /// record one request reading the instant from a time provider
    pub fn check(&mut self, key: &str, time: &SafeTimeProvider) -> bool {
        self.check_at(key, time.now())
    }

    /// requests left in the key's current window
    pub fn remaining_at(&self, key: &str, now: DateTime<Utc>) -> u32 {
        match self.windows.get(key) {
            Some(w) if now - w.started_at < self.window => {
                self.max_requests.saturating_sub(w.count)
            }
            _ => self.max_requests,
        }
    }

    /// drop every window that has expired as of `now`
    pub fn sweep(&mut self, now: DateTime<Utc>) {
        let window = self.window;
        self.windows
            .retain(|_, w| now - w.started_at < window);
    }

    /// number of keys currently tracked
    pub fn tracked_keys(&self) -> usize {
        self.windows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: u32, second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 12, minute, second).unwrap()
    }

    #[test]
    fn test_rejects_zero_config() {
        assert!(FixedWindowLimiter::new(0, Duration::seconds(60)).is_err());
        assert!(FixedWindowLimiter::new(5, Duration::zero()).is_err());
    }

    #[test]
    fn test_allows_within_limit() {
        let mut limiter = FixedWindowLimiter::new(3, Duration::seconds(60)).unwrap();

        assert!(limiter.check_at("10.0.0.1", at(0, 0)));
        assert!(limiter.check_at("10.0.0.1", at(0, 10)));
        assert!(limiter.check_at("10.0.0.1", at(0, 20)));
        // 4th request in the same window
        assert!(!limiter.check_at("10.0.0.1", at(0, 30)));
    }

    #[test]
    fn test_window_rolls_over() {
        let mut limiter = FixedWindowLimiter::new(1, Duration::seconds(60)).unwrap();

        assert!(limiter.check_at("k", at(0, 0)));
        assert!(!limiter.check_at("k", at(0, 59)));
        // next window
        assert!(limiter.check_at("k", at(1, 0)));
    }

    #[test]
    fn test_keys_are_independent() {
        let mut limiter = FixedWindowLimiter::new(1, Duration::seconds(60)).unwrap();

        assert!(limiter.check_at("a", at(0, 0)));
        assert!(!limiter.check_at("a", at(0, 1)));
        assert!(limiter.check_at("b", at(0, 1)));
    }

    #[test]
    fn test_remaining() {
        let mut limiter = FixedWindowLimiter::new(3, Duration::seconds(60)).unwrap();
        assert_eq!(limiter.remaining_at("k", at(0, 0)), 3);
        limiter.check_at("k", at(0, 0));
        assert_eq!(limiter.remaining_at("k", at(0, 10)), 2);
        // expired window reports a fresh allowance
        assert_eq!(limiter.remaining_at("k", at(2, 0)), 3);
    }

    #[test]
    fn test_sweep_drops_expired_keys() {
        let mut limiter = FixedWindowLimiter::new(3, Duration::seconds(60)).unwrap();
        limiter.check_at("old", at(0, 0));
        limiter.check_at("fresh", at(1, 30));
        assert_eq!(limiter.tracked_keys(), 2);

        limiter.sweep(at(2, 0));
        assert_eq!(limiter.tracked_keys(), 1);
        assert_eq!(limiter.remaining_at("fresh", at(2, 0)), 2);
    }

    #[test]
    fn test_check_with_time_provider() {
        use hourglass_rs::TimeSource;
        let time = SafeTimeProvider::new(TimeSource::Test(at(0, 0)));
        let mut limiter = FixedWindowLimiter::new(1, Duration::seconds(60)).unwrap();
        assert!(limiter.check("k", &time));
        assert!(!limiter.check("k", &time));
    }
}
