//! Hover-scoped image rotation.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use rustc_hash::FxHashMap;

use vitrine_core::{TimerDriver, TimerRegistration};

use crate::catalog::{Product, ProductId};

/// Rotation configuration for a grid instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarouselConfig {
    /// Interval between image advances while hovered.
    pub interval: Duration,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(2000),
        }
    }
}

/// Listener invoked after each rotation step with (product, from, to).
pub type AdvanceListener = Box<dyn FnMut(ProductId, usize, usize)>;

/// Per-product, hover-scoped image rotation.
///
/// On hover-enter the product shows image 0 and a repeating timer starts;
/// each tick advances the displayed index by one modulo the image count. On
/// hover-leave the rotation state is discarded, which cancels the timer
/// through its registration's drop. At most one timer exists per product:
/// re-entering while one is running cancels the old timer before starting
/// the new one, so the index can never advance twice per interval.
#[derive(Clone)]
pub struct HoverCarousel {
    inner: Rc<RefCell<CarouselInner>>,
}

struct CarouselInner {
    timers: Rc<dyn TimerDriver>,
    config: CarouselConfig,
    active: FxHashMap<ProductId, RotationEntry>,
    on_advance: Option<AdvanceListener>,
}

/// Rotation state for one hovered product. Dropping it cancels the timer.
struct RotationEntry {
    index: usize,
    image_count: usize,
    _timer: TimerRegistration,
}

impl HoverCarousel {
    pub fn new(timers: Rc<dyn TimerDriver>, config: CarouselConfig) -> Self {
        Self {
            inner: Rc::new(RefCell::new(CarouselInner {
                timers,
                config,
                active: FxHashMap::default(),
                on_advance: None,
            })),
        }
    }

    /// Registers a listener for rotation steps (used by the widget layer to
    /// start a crossfade). Replaces any previous listener.
    pub fn set_on_advance(&self, listener: AdvanceListener) {
        self.inner.borrow_mut().on_advance = Some(listener);
    }

    /// Pointer entered `product`: show image 0 and start rotating.
    pub fn hover_enter(&self, product: &Product) {
        let id = product.id;
        let image_count = product.image_count().max(1);

        // Cancel any prior timer for this product before starting the new
        // one (drop of the old entry is the cancellation).
        if self.inner.borrow_mut().active.remove(&id).is_some() {
            log::debug!("re-entered {} while rotating; prior timer cancelled", id);
        }

        let (timers, interval) = {
            let inner = self.inner.borrow();
            (inner.timers.clone(), inner.config.interval)
        };
        let weak: Weak<RefCell<CarouselInner>> = Rc::downgrade(&self.inner);
        let timer = TimerRegistration::start(
            timers,
            interval,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    CarouselInner::tick(&inner, id);
                }
            }),
        );

        self.inner.borrow_mut().active.insert(
            id,
            RotationEntry {
                index: 0,
                image_count,
                _timer: timer,
            },
        );
        log::debug!("hover-enter {}: rotating {} images", id, image_count);
    }

    /// Pointer left the product: stop rotating, deterministically.
    pub fn hover_leave(&self, id: ProductId) {
        if self.inner.borrow_mut().active.remove(&id).is_some() {
            log::debug!("hover-leave {}: rotation stopped", id);
        }
    }

    /// Index of the image currently shown for `id`: the rotation index while
    /// hovered, otherwise 0 (the resting image).
    pub fn displayed_index(&self, id: ProductId) -> usize {
        self.inner
            .borrow()
            .active
            .get(&id)
            .map(|entry| entry.index)
            .unwrap_or(0)
    }

    /// True while a rotation timer runs for `id`.
    pub fn is_rotating(&self, id: ProductId) -> bool {
        self.inner.borrow().active.contains_key(&id)
    }

    /// Number of products with an active rotation timer.
    pub fn active_count(&self) -> usize {
        self.inner.borrow().active.len()
    }
}

impl CarouselInner {
    /// One timer tick for `id`: advance modulo the image count, then notify
    /// the advance listener outside the state borrow (the listener may call
    /// back into the carousel).
    fn tick(inner: &Rc<RefCell<CarouselInner>>, id: ProductId) {
        let advanced = {
            let mut state = inner.borrow_mut();
            state.active.get_mut(&id).map(|entry| {
                let from = entry.index;
                entry.index = (entry.index + 1) % entry.image_count;
                (from, entry.index)
            })
        };
        let Some((from, to)) = advanced else {
            // Tick raced a leave inside the same host turn; nothing to do.
            return;
        };
        log::trace!("rotation tick {}: {} -> {}", id, from, to);

        let listener = inner.borrow_mut().on_advance.take();
        if let Some(mut listener) = listener {
            listener(id, from, to);
            let mut state = inner.borrow_mut();
            if state.on_advance.is_none() {
                state.on_advance = Some(listener);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ImageRef, Product};
    use vitrine_core::TimerId;

    /// Minimal manual timer driver: ticks fire only when the test says so.
    #[derive(Default)]
    struct ManualTimers {
        next_id: RefCell<TimerId>,
        running: RefCell<Vec<(TimerId, Box<dyn FnMut()>)>>,
    }

    impl ManualTimers {
        fn tick_all(&self) {
            let ids: Vec<TimerId> = self.running.borrow().iter().map(|(id, _)| *id).collect();
            for id in ids {
                // Take the callback out while it runs so a re-entrant
                // cancel can't invalidate the iteration.
                let entry = {
                    let mut running = self.running.borrow_mut();
                    running
                        .iter()
                        .position(|(other, _)| *other == id)
                        .map(|at| running.remove(at))
                };
                if let Some((id, mut callback)) = entry {
                    callback();
                    self.running.borrow_mut().push((id, callback));
                }
            }
        }

        fn running_count(&self) -> usize {
            self.running.borrow().len()
        }
    }

    impl TimerDriver for ManualTimers {
        fn start_repeating(&self, _interval: Duration, tick: Box<dyn FnMut()>) -> TimerId {
            let mut next = self.next_id.borrow_mut();
            *next += 1;
            self.running.borrow_mut().push((*next, tick));
            *next
        }

        fn cancel(&self, id: TimerId) {
            self.running.borrow_mut().retain(|(other, _)| *other != id);
        }
    }

    fn product_with_images(id: u64, count: usize) -> Product {
        Product::new(
            id,
            format!("P{id}"),
            5.0,
            (0..count).map(|i| ImageRef::new(format!("{i}.jpg"))),
        )
    }

    #[test]
    fn enter_shows_first_image_and_ticks_advance_modulo() {
        let timers = Rc::new(ManualTimers::default());
        let carousel = HoverCarousel::new(timers.clone(), CarouselConfig::default());
        let product = product_with_images(1, 3);

        carousel.hover_enter(&product);
        assert_eq!(carousel.displayed_index(product.id), 0);
        timers.tick_all();
        assert_eq!(carousel.displayed_index(product.id), 1);
        timers.tick_all();
        assert_eq!(carousel.displayed_index(product.id), 2);
        timers.tick_all();
        // Wraps back to the first image.
        assert_eq!(carousel.displayed_index(product.id), 0);
    }

    #[test]
    fn leave_cancels_the_timer_and_rests_on_first_image() {
        let timers = Rc::new(ManualTimers::default());
        let carousel = HoverCarousel::new(timers.clone(), CarouselConfig::default());
        let product = product_with_images(1, 3);

        carousel.hover_enter(&product);
        timers.tick_all();
        carousel.hover_leave(product.id);

        assert_eq!(timers.running_count(), 0);
        assert!(!carousel.is_rotating(product.id));
        // Further host ticks (there is no timer left, but even a stale
        // callback would find no entry) change nothing.
        timers.tick_all();
        assert_eq!(carousel.displayed_index(product.id), 0);
    }

    #[test]
    fn re_enter_cancels_prior_timer_first() {
        let timers = Rc::new(ManualTimers::default());
        let carousel = HoverCarousel::new(timers.clone(), CarouselConfig::default());
        let product = product_with_images(1, 4);

        carousel.hover_enter(&product);
        timers.tick_all();
        assert_eq!(carousel.displayed_index(product.id), 1);

        carousel.hover_enter(&product);
        // Exactly one timer, and the index restarted at 0.
        assert_eq!(timers.running_count(), 1);
        assert_eq!(carousel.displayed_index(product.id), 0);
        timers.tick_all();
        // One tick advances by exactly one, never two.
        assert_eq!(carousel.displayed_index(product.id), 1);
    }

    #[test]
    fn single_image_product_stays_on_index_zero() {
        let timers = Rc::new(ManualTimers::default());
        let carousel = HoverCarousel::new(timers.clone(), CarouselConfig::default());
        let product = product_with_images(1, 1);

        carousel.hover_enter(&product);
        for _ in 0..5 {
            timers.tick_all();
            assert_eq!(carousel.displayed_index(product.id), 0);
        }
    }

    #[test]
    fn independent_rotation_per_product() {
        let timers = Rc::new(ManualTimers::default());
        let carousel = HoverCarousel::new(timers.clone(), CarouselConfig::default());
        let first = product_with_images(1, 3);
        let second = product_with_images(2, 2);

        carousel.hover_enter(&first);
        timers.tick_all();
        carousel.hover_enter(&second);
        timers.tick_all();

        assert_eq!(carousel.displayed_index(first.id), 2);
        assert_eq!(carousel.displayed_index(second.id), 1);
        assert_eq!(carousel.active_count(), 2);
    }

    #[test]
    fn advance_listener_reports_each_step() {
        let timers = Rc::new(ManualTimers::default());
        let carousel = HoverCarousel::new(timers.clone(), CarouselConfig::default());
        let product = product_with_images(1, 3);

        let steps: Rc<RefCell<Vec<(u64, usize, usize)>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = steps.clone();
        carousel.set_on_advance(Box::new(move |id, from, to| {
            sink.borrow_mut().push((id.0, from, to));
        }));

        carousel.hover_enter(&product);
        timers.tick_all();
        timers.tick_all();
        timers.tick_all();

        assert_eq!(*steps.borrow(), vec![(1, 0, 1), (1, 1, 2), (1, 2, 0)]);
    }
}
