//! Repeating-timer seam.
//!
//! The hover carousel advances its image index from a repeating timer owned
//! by the host environment (a browser `setInterval`, an event-loop timer
//! wheel, or a virtual queue in tests). Starting a timer yields a
//! [`TimerRegistration`] that cancels on drop, so a stopped carousel can
//! never leak a running timer.

use std::rc::Rc;
use std::time::Duration;

/// Identifier for a running repeating timer, allocated by the driver.
pub type TimerId = u64;

/// Host capability for starting and cancelling repeating timers.
///
/// `tick` is invoked once per elapsed `interval` until the timer is
/// cancelled. Delivery is single-threaded and non-re-entrant: a tick for a
/// given timer never interrupts another callback.
pub trait TimerDriver {
    /// Starts a repeating timer and returns its id.
    fn start_repeating(&self, interval: Duration, tick: Box<dyn FnMut()>) -> TimerId;

    /// Cancels a running timer. Cancelling an already-finished or unknown id
    /// is a no-op.
    fn cancel(&self, id: TimerId);
}

/// Owned handle to a running timer.
///
/// Dropping the registration cancels the timer. This makes "hover-leave must
/// stop the timer" structural: the carousel stores the registration inside
/// the per-item rotation state, and discarding that state is the
/// cancellation.
pub struct TimerRegistration {
    driver: Rc<dyn TimerDriver>,
    id: Option<TimerId>,
}

impl TimerRegistration {
    /// Starts a repeating timer on `driver` and wraps it in a registration.
    pub fn start(driver: Rc<dyn TimerDriver>, interval: Duration, tick: Box<dyn FnMut()>) -> Self {
        let id = driver.start_repeating(interval, tick);
        log::trace!("timer {} started (interval {:?})", id, interval);
        Self {
            driver,
            id: Some(id),
        }
    }

    /// Cancels the timer now instead of waiting for drop.
    pub fn cancel(mut self) {
        self.cancel_inner();
    }

    fn cancel_inner(&mut self) {
        if let Some(id) = self.id.take() {
            log::trace!("timer {} cancelled", id);
            self.driver.cancel(id);
        }
    }
}

impl Drop for TimerRegistration {
    fn drop(&mut self) {
        self.cancel_inner();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingDriver {
        started: RefCell<Vec<TimerId>>,
        cancelled: RefCell<Vec<TimerId>>,
    }

    impl TimerDriver for RecordingDriver {
        fn start_repeating(&self, _interval: Duration, _tick: Box<dyn FnMut()>) -> TimerId {
            let id = self.started.borrow().len() as TimerId + 1;
            self.started.borrow_mut().push(id);
            id
        }

        fn cancel(&self, id: TimerId) {
            self.cancelled.borrow_mut().push(id);
        }
    }

    #[test]
    fn drop_cancels_exactly_once() {
        let driver = Rc::new(RecordingDriver::default());
        let registration = TimerRegistration::start(
            driver.clone(),
            Duration::from_millis(2000),
            Box::new(|| {}),
        );
        drop(registration);
        assert_eq!(*driver.cancelled.borrow(), vec![1]);
    }

    #[test]
    fn explicit_cancel_does_not_double_cancel_on_drop() {
        let driver = Rc::new(RecordingDriver::default());
        let registration = TimerRegistration::start(
            driver.clone(),
            Duration::from_millis(2000),
            Box::new(|| {}),
        );
        registration.cancel();
        assert_eq!(*driver.cancelled.borrow(), vec![1]);
    }
}
