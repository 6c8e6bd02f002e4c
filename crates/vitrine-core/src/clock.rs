//! Monotonic time source.
//!
//! Presentation timing (the image crossfade) reads elapsed milliseconds from
//! a [`Clock`] rather than calling into the platform directly, so tests can
//! substitute virtual time.

use std::rc::Rc;

use web_time::Instant;

/// Monotonic millisecond clock.
///
/// Implementations must be non-decreasing; the epoch is unspecified (only
/// differences are meaningful).
pub trait Clock {
    /// Milliseconds elapsed since this clock's epoch.
    fn now_millis(&self) -> u64;
}

/// Real clock backed by `web_time::Instant` (std and WASM).
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_millis();
        let b = clock.now_millis();
        assert!(b >= a);
    }
}
