//! Host-environment seams for the Vitrine product grid.
//!
//! The grid's state machines never talk to a real browser, window system, or
//! timer wheel directly. Everything the host owns (repeating timers,
//! viewport-intersection observation, wall-clock time) is reached through
//! the traits in this crate, so a deterministic test double can stand in for
//! the real environment.

mod clock;
mod intersection;
mod timer;

pub use clock::{Clock, SystemClock};
pub use intersection::{IntersectionDriver, ObserverId, ObserverRegistration};
pub use timer::{TimerDriver, TimerId, TimerRegistration};
