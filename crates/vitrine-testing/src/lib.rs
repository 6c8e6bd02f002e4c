//! Testing utilities for the Vitrine product grid.
//!
//! The grid's host seams (sentinel intersection, repeating timers, clock)
//! are replaced here with a fully deterministic [`VirtualRuntime`]: tests
//! fire sentinel visibility by hand and advance virtual time instead of
//! waiting on real timers. [`GridRobot`] drives a real mounted grid through
//! those doubles.

mod robot;
mod robot_assertions;
mod virtual_runtime;

pub use robot::GridRobot;
pub use robot_assertions::{
    assert_approx_eq, assert_no_duplicate_products, assert_single_opaque_layer,
};
pub use virtual_runtime::{VirtualClock, VirtualRuntime, VirtualSentinel, VirtualTimers};
