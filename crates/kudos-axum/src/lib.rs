//! Kudos Axum - HTTP integration for the entitlement core
//!
//! Translates policy failures into structured client responses and rate
//! limits the public submission endpoints.

pub mod error;
pub mod rate_limit;

pub use error::ApiError;
pub use rate_limit::{
    client_ip, Clock, CounterEntry, CounterStore, InMemoryCounterStore, ManualClock,
    RateLimitConfig, RateLimitResult, RateLimiter, SystemClock,
};
