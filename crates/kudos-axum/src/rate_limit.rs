//! Fixed-window rate limiting for public endpoints.
//!
//! Counters live behind an injected [`CounterStore`] and [`Clock`]: tests
//! drive a deterministic manual clock, production binds a shared store.
//! Tracks requests by identifier (usually the client IP) with per-endpoint
//! window configurations.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::http::HeaderMap;
use dashmap::DashMap;

/// Stale counters are swept at most this often.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Time source for window arithmetic
pub trait Clock: Send + Sync {
    /// Current time as milliseconds since the Unix epoch
    fn now_millis(&self) -> u64;
}

/// Wall-clock time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Manually advanced time for tests
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    /// Create a clock starting at the given epoch milliseconds
    pub fn starting_at(millis: u64) -> Self {
        Self {
            now: AtomicU64::new(millis),
        }
    }

    /// Move time forward
    pub fn advance(&self, by: Duration) {
        self.now.fetch_add(by.as_millis() as u64, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now.load(Ordering::Relaxed)
    }
}

impl<C: Clock> Clock for std::sync::Arc<C> {
    fn now_millis(&self) -> u64 {
        self.as_ref().now_millis()
    }
}

/// One identifier's counter within its current window
#[derive(Debug, Clone, Copy)]
pub struct CounterEntry {
    /// Requests seen in the window
    pub count: u32,
    /// When the window ends, in epoch milliseconds
    pub reset_at_millis: u64,
}

/// Counter storage for rate limiting
pub trait CounterStore: Send + Sync {
    /// Read an identifier's counter
    fn get(&self, key: &str) -> Option<CounterEntry>;

    /// Replace an identifier's counter
    fn put(&self, key: &str, entry: CounterEntry);

    /// Add one to an existing counter, returning the updated entry
    fn increment(&self, key: &str) -> Option<CounterEntry>;

    /// Drop every counter whose window ended before the cutoff
    fn expire_before(&self, cutoff_millis: u64);
}

/// In-process counter store
#[derive(Debug, Default)]
pub struct InMemoryCounterStore {
    entries: DashMap<String, CounterEntry>,
}

impl InMemoryCounterStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live counters
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no counters
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CounterStore for InMemoryCounterStore {
    fn get(&self, key: &str) -> Option<CounterEntry> {
        self.entries.get(key).map(|e| *e.value())
    }

    fn put(&self, key: &str, entry: CounterEntry) {
        self.entries.insert(key.to_string(), entry);
    }

    fn increment(&self, key: &str) -> Option<CounterEntry> {
        self.entries.get_mut(key).map(|mut e| {
            e.count += 1;
            *e.value()
        })
    }

    fn expire_before(&self, cutoff_millis: u64) {
        self.entries.retain(|_, e| e.reset_at_millis >= cutoff_millis);
    }
}

/// Rate limit configuration for one endpoint class
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    /// Maximum number of requests allowed in the window
    pub max_requests: u32,
    /// Window length
    pub window: Duration,
}

/// Testimonial submissions: 3 per hour per client
pub const TESTIMONIAL_SUBMISSION: RateLimitConfig = RateLimitConfig {
    max_requests: 3,
    window: Duration::from_secs(60 * 60),
};

/// General API calls: 100 per minute per client
pub const API_GENERAL: RateLimitConfig = RateLimitConfig {
    max_requests: 100,
    window: Duration::from_secs(60),
};

/// Login attempts: 5 per 15 minutes per client
pub const LOGIN: RateLimitConfig = RateLimitConfig {
    max_requests: 5,
    window: Duration::from_secs(15 * 60),
};

/// Outcome of a rate limit check
#[derive(Debug, Clone, Copy)]
pub struct RateLimitResult {
    /// Whether the request is allowed
    pub allowed: bool,
    /// Requests remaining in the window
    pub remaining: u32,
    /// Time until the window resets
    pub reset_in: Duration,
}

/// Fixed-window rate limiter over an injected store and clock
pub struct RateLimiter<S: CounterStore, C: Clock> {
    store: S,
    clock: C,
    last_cleanup: AtomicU64,
}

impl RateLimiter<InMemoryCounterStore, SystemClock> {
    /// In-process limiter on wall-clock time
    pub fn in_memory() -> Self {
        Self::new(InMemoryCounterStore::new(), SystemClock)
    }
}

impl<S: CounterStore, C: Clock> RateLimiter<S, C> {
    /// Create a limiter over the given store and clock
    pub fn new(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            last_cleanup: AtomicU64::new(0),
        }
    }

    /// Access the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Check whether a request from `identifier` fits its window
    pub fn check(&self, identifier: &str, config: RateLimitConfig) -> RateLimitResult {
        self.cleanup_stale_entries();

        let now = self.clock.now_millis();
        let window_millis = config.window.as_millis() as u64;

        // No counter yet, or the previous window has ended
        let entry = match self.store.get(identifier) {
            Some(entry) if now <= entry.reset_at_millis => entry,
            _ => {
                self.store.put(
                    identifier,
                    CounterEntry {
                        count: 1,
                        reset_at_millis: now + window_millis,
                    },
                );
                return RateLimitResult {
                    allowed: true,
                    remaining: config.max_requests.saturating_sub(1),
                    reset_in: config.window,
                };
            }
        };

        let reset_in = Duration::from_millis(entry.reset_at_millis.saturating_sub(now));

        if entry.count >= config.max_requests {
            return RateLimitResult {
                allowed: false,
                remaining: 0,
                reset_in,
            };
        }

        let count = self
            .store
            .increment(identifier)
            .map(|e| e.count)
            .unwrap_or(entry.count + 1);

        RateLimitResult {
            allowed: true,
            remaining: config.max_requests.saturating_sub(count),
            reset_in,
        }
    }

    fn cleanup_stale_entries(&self) {
        let now = self.clock.now_millis();
        let last = self.last_cleanup.load(Ordering::Relaxed);

        if now.saturating_sub(last) < CLEANUP_INTERVAL.as_millis() as u64 {
            return;
        }

        // Only one caller sweeps per interval
        if self
            .last_cleanup
            .compare_exchange(last, now, Ordering::Relaxed, Ordering::Relaxed)
            .is_ok()
        {
            self.store.expire_before(now);
        }
    }
}

/// Extract the client IP from proxy headers.
///
/// `x-forwarded-for` takes the first address in the chain; `x-real-ip` is
/// the fallback, then localhost.
pub fn client_ip(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        return real_ip.to_string();
    }

    "127.0.0.1".to_string()
}
