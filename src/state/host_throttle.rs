use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Spaces requests to the same host by a fixed interval
///
/// Used by the concurrent worker pool so that several fetchers never hit one
/// host faster than the configured politeness delay. Each call to
/// [`reserve`](Self::reserve) books the next free slot for the host and
/// returns how long the caller must wait before using it.
#[derive(Debug)]
pub struct HostThrottle {
    spacing: Duration,
    next_slot: Mutex<HashMap<String, Instant>>,
}

impl HostThrottle {
    /// Creates a throttle enforcing `spacing` between requests per host
    pub fn new(spacing: Duration) -> Self {
        Self {
            spacing,
            next_slot: Mutex::new(HashMap::new()),
        }
    }

    /// Books the next request slot for `host`
    ///
    /// # Returns
    ///
    /// The duration to sleep before sending the request. Zero means the
    /// request may go out immediately.
    pub fn reserve(&self, host: &str, now: Instant) -> Duration {
        if self.spacing.is_zero() {
            return Duration::ZERO;
        }

        let mut slots = self
            .next_slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let slot = match slots.get(host) {
            Some(next) if *next > now => *next,
            _ => now,
        };
        slots.insert(host.to_string(), slot + self.spacing);

        slot.duration_since(now)
    }

    pub fn spacing(&self) -> Duration {
        self.spacing
    }
}
