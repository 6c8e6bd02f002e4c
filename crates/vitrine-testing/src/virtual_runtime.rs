//! Deterministic host-environment doubles.
//!
//! One shared millisecond counter backs the clock and the timer queue, so
//! "advance time by 2000ms" delivers every due tick in due order and a fade
//! started inside a tick callback reads the tick's timestamp.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use vitrine_core::{Clock, IntersectionDriver, ObserverId, TimerDriver, TimerId};

/// Virtual clock over a shared millisecond counter.
pub struct VirtualClock {
    now: Rc<Cell<u64>>,
}

impl Clock for VirtualClock {
    fn now_millis(&self) -> u64 {
        self.now.get()
    }
}

/// Repeating-timer double with a due-time queue.
///
/// `advance` walks virtual time forward, firing every due tick in (due, id)
/// order. Callbacks may start or cancel timers re-entrantly: a firing
/// entry's callback is taken out while it runs and only restored if the
/// timer survived its own tick.
pub struct VirtualTimers {
    now: Rc<Cell<u64>>,
    next_id: Cell<TimerId>,
    entries: RefCell<Vec<TimerEntry>>,
}

struct TimerEntry {
    id: TimerId,
    interval_millis: u64,
    due: u64,
    // None while the callback is being fired.
    callback: Option<Box<dyn FnMut()>>,
}

impl VirtualTimers {
    fn new(now: Rc<Cell<u64>>) -> Self {
        Self {
            now,
            next_id: Cell::new(0),
            entries: RefCell::new(Vec::new()),
        }
    }

    /// Number of timers currently running. Leak checks hinge on this.
    pub fn active_count(&self) -> usize {
        self.entries.borrow().len()
    }

    fn advance_to(&self, target: u64) {
        loop {
            let next = self
                .entries
                .borrow()
                .iter()
                .filter(|entry| entry.callback.is_some() && entry.due <= target)
                .map(|entry| (entry.due, entry.id))
                .min();
            let Some((due, id)) = next else {
                break;
            };

            let mut callback = {
                let mut entries = self.entries.borrow_mut();
                let entry = entries
                    .iter_mut()
                    .find(|entry| entry.id == id)
                    .expect("due timer vanished");
                entry.due = due + entry.interval_millis;
                entry.callback.take().expect("due timer already firing")
            };

            // Ticks observe their own timestamp on the shared clock.
            self.now.set(due.max(self.now.get()));
            callback();

            let mut entries = self.entries.borrow_mut();
            if let Some(entry) = entries.iter_mut().find(|entry| entry.id == id) {
                entry.callback = Some(callback);
            }
        }
        self.now.set(target.max(self.now.get()));
    }
}

impl TimerDriver for VirtualTimers {
    fn start_repeating(&self, interval: Duration, tick: Box<dyn FnMut()>) -> TimerId {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        // A zero interval would fire forever inside one advance.
        let interval_millis = (interval.as_millis() as u64).max(1);
        self.entries.borrow_mut().push(TimerEntry {
            id,
            interval_millis,
            due: self.now.get() + interval_millis,
            callback: Some(tick),
        });
        id
    }

    fn cancel(&self, id: TimerId) {
        self.entries.borrow_mut().retain(|entry| entry.id != id);
    }
}

/// Sentinel-intersection double: visibility events fire when the test says
/// so, never from real geometry.
#[derive(Default)]
pub struct VirtualSentinel {
    next_id: Cell<ObserverId>,
    observers: RefCell<Vec<ObserverEntry>>,
}

struct ObserverEntry {
    id: ObserverId,
    margin: f32,
    callback: Option<Box<dyn FnMut()>>,
}

impl VirtualSentinel {
    /// Reports the sentinel visible to every attached observer, once each.
    pub fn fire(&self) {
        let ids: Vec<ObserverId> = self.observers.borrow().iter().map(|entry| entry.id).collect();
        for id in ids {
            let taken = {
                let mut observers = self.observers.borrow_mut();
                observers
                    .iter_mut()
                    .find(|entry| entry.id == id)
                    .and_then(|entry| entry.callback.take())
            };
            let Some(mut callback) = taken else {
                continue;
            };
            callback();
            let mut observers = self.observers.borrow_mut();
            if let Some(entry) = observers.iter_mut().find(|entry| entry.id == id) {
                entry.callback = Some(callback);
            }
        }
    }

    /// Number of attached observers. Zero after teardown.
    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    /// Margin the most recent observer registered with.
    pub fn last_margin(&self) -> Option<f32> {
        self.observers.borrow().last().map(|entry| entry.margin)
    }
}

impl IntersectionDriver for VirtualSentinel {
    fn observe(&self, margin: f32, on_visible: Box<dyn FnMut()>) -> ObserverId {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.observers.borrow_mut().push(ObserverEntry {
            id,
            margin,
            callback: Some(on_visible),
        });
        id
    }

    fn unobserve(&self, id: ObserverId) {
        self.observers.borrow_mut().retain(|entry| entry.id != id);
    }
}

/// The full deterministic host: shared clock, timer queue, and sentinel.
pub struct VirtualRuntime {
    now: Rc<Cell<u64>>,
    clock: Rc<VirtualClock>,
    timers: Rc<VirtualTimers>,
    sentinel: Rc<VirtualSentinel>,
}

impl VirtualRuntime {
    pub fn new() -> Self {
        let now = Rc::new(Cell::new(0));
        Self {
            clock: Rc::new(VirtualClock { now: now.clone() }),
            timers: Rc::new(VirtualTimers::new(now.clone())),
            sentinel: Rc::new(VirtualSentinel::default()),
            now,
        }
    }

    pub fn clock(&self) -> Rc<dyn Clock> {
        self.clock.clone()
    }

    pub fn timers(&self) -> Rc<dyn TimerDriver> {
        self.timers.clone()
    }

    pub fn intersections(&self) -> Rc<dyn IntersectionDriver> {
        self.sentinel.clone()
    }

    /// Current virtual time.
    pub fn now_millis(&self) -> u64 {
        self.now.get()
    }

    /// Advances virtual time, delivering every due tick in order.
    pub fn advance(&self, delta: Duration) {
        let target = self.now.get() + delta.as_millis() as u64;
        self.timers.advance_to(target);
    }

    /// Fires a sentinel-visibility event.
    pub fn fire_sentinel(&self) {
        self.sentinel.fire();
    }

    pub fn active_timer_count(&self) -> usize {
        self.timers.active_count()
    }

    pub fn observer_count(&self) -> usize {
        self.sentinel.observer_count()
    }

    pub fn last_observed_margin(&self) -> Option<f32> {
        self.sentinel.last_margin()
    }
}

impl Default for VirtualRuntime {
    fn default() -> Self {
        Self::new()
    }
}
