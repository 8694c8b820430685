//! # Circuit Breaker Module
//!
//! Circuit breaker for commerce API calls. When the store API fails
//! repeatedly, the breaker "opens" and calls return an empty catalog at once
//! instead of waiting on the request timeout for every tap.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::config::CommerceConfig;

#[derive(Debug, Default)]
struct BreakerState {
    failure_count: u32,
    last_failure_time: Option<Instant>,
}

/// Circuit breaker for commerce API calls
///
/// # State Machine
///
/// - **Closed**: Normal operation, requests pass through
/// - **Open**: Failure threshold exceeded, requests fail fast
/// - **Half-Open**: Reset window elapsed, the next request is let through
///
/// # Configuration
///
/// Uses `CommerceConfig` for:
/// - `circuit_breaker_threshold`: Failures before opening (default: 5)
/// - `circuit_breaker_reset_secs`: Time before attempting reset (default: 60s)
#[derive(Debug)]
pub struct CircuitBreaker {
    state: Mutex<BreakerState>,
    threshold: u32,
    reset_after: Duration,
}

impl CircuitBreaker {
    /// Create a new circuit breaker
    ///
    /// A threshold of zero disables the breaker.
    pub fn new(threshold: u32, reset_after: Duration) -> Self {
        Self {
            state: Mutex::new(BreakerState::default()),
            threshold,
            reset_after,
        }
    }

    /// Build a breaker from the commerce settings
    pub fn from_config(config: &CommerceConfig) -> Self {
        Self::new(
            config.circuit_breaker_threshold,
            Duration::from_secs(config.circuit_breaker_reset_secs),
        )
    }

    fn lock(&self) -> MutexGuard<'_, BreakerState> {
        // State is two plain counters, a poisoned lock still holds usable data
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Check if the circuit is open (blocking requests)
    ///
    /// Automatically moves back to closed once the reset window has elapsed.
    pub fn is_open(&self) -> bool {
        if self.threshold == 0 {
            return false;
        }
        let mut state = self.lock();
        if state.failure_count >= self.threshold {
            if let Some(last_time) = state.last_failure_time {
                if last_time.elapsed() < self.reset_after {
                    return true;
                }
                *state = BreakerState::default();
            }
        }
        false
    }

    /// Record a failed call
    pub fn record_failure(&self) {
        let mut state = self.lock();
        state.failure_count = state.failure_count.saturating_add(1);
        state.last_failure_time = Some(Instant::now());
    }

    /// Record a successful call, closing the circuit
    pub fn record_success(&self) {
        *self.lock() = BreakerState::default();
    }

    pub fn failure_count(&self) -> u32 {
        self.lock().failure_count
    }
}
