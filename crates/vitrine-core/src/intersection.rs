//! Viewport-intersection seam.
//!
//! The pagination loader never scroll-tests anything itself; it registers a
//! sentinel callback with the host's intersection capability (a browser
//! `IntersectionObserver`, or a manually-fired double in tests) and reacts
//! when the host reports the sentinel visible. Dropping the
//! [`ObserverRegistration`] detaches the observer, so a torn-down grid never
//! receives callbacks for a removed sentinel.

use std::rc::Rc;

/// Identifier for an attached sentinel observer, allocated by the driver.
pub type ObserverId = u64;

/// Host capability for observing sentinel visibility.
///
/// `margin` extends the viewport's trailing edge by that many pixels, so the
/// callback fires before the sentinel is literally on screen (pre-fetch).
/// The callback may fire repeatedly, including while the observed element
/// stays within the margin; observers must tolerate redundant firings.
pub trait IntersectionDriver {
    /// Attaches an observer and returns its id.
    fn observe(&self, margin: f32, on_visible: Box<dyn FnMut()>) -> ObserverId;

    /// Detaches an observer. Detaching an unknown id is a no-op.
    fn unobserve(&self, id: ObserverId);
}

/// Owned handle to an attached sentinel observer; detaches on drop.
pub struct ObserverRegistration {
    driver: Rc<dyn IntersectionDriver>,
    id: Option<ObserverId>,
}

impl ObserverRegistration {
    /// Attaches an observer on `driver` and wraps it in a registration.
    pub fn observe(
        driver: Rc<dyn IntersectionDriver>,
        margin: f32,
        on_visible: Box<dyn FnMut()>,
    ) -> Self {
        let id = driver.observe(margin, on_visible);
        log::trace!("sentinel observer {} attached (margin {}px)", id, margin);
        Self {
            driver,
            id: Some(id),
        }
    }

    /// Detaches the observer now instead of waiting for drop.
    pub fn detach(mut self) {
        self.detach_inner();
    }

    fn detach_inner(&mut self) {
        if let Some(id) = self.id.take() {
            log::trace!("sentinel observer {} detached", id);
            self.driver.unobserve(id);
        }
    }
}

impl Drop for ObserverRegistration {
    fn drop(&mut self) {
        self.detach_inner();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingDriver {
        observed: RefCell<Vec<f32>>,
        unobserved: RefCell<Vec<ObserverId>>,
    }

    impl IntersectionDriver for RecordingDriver {
        fn observe(&self, margin: f32, _on_visible: Box<dyn FnMut()>) -> ObserverId {
            self.observed.borrow_mut().push(margin);
            self.observed.borrow().len() as ObserverId
        }

        fn unobserve(&self, id: ObserverId) {
            self.unobserved.borrow_mut().push(id);
        }
    }

    #[test]
    fn registration_passes_margin_and_detaches_on_drop() {
        let driver = Rc::new(RecordingDriver::default());
        let registration =
            ObserverRegistration::observe(driver.clone(), 200.0, Box::new(|| {}));
        assert_eq!(*driver.observed.borrow(), vec![200.0]);
        drop(registration);
        assert_eq!(*driver.unobserved.borrow(), vec![1]);
    }
}
