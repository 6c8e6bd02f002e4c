//! Robot-style harness for grid tests.
//!
//! A [`GridRobot`] owns a real [`ProductGrid`] mounted on the virtual
//! runtime and exposes the interactions a user (or host shell) performs:
//! scrolling far enough to expose the sentinel, hovering and leaving a
//! card, and letting time pass.

use std::rc::Rc;
use std::time::Duration;

use vitrine_foundation::{ProductCatalog, ProductId};
use vitrine_ui::{GridConfig, ProductGrid};

use crate::virtual_runtime::VirtualRuntime;

pub struct GridRobot {
    runtime: VirtualRuntime,
    grid: ProductGrid,
}

impl GridRobot {
    /// Launches a grid over `catalog` on a fresh virtual runtime and mounts
    /// it immediately.
    pub fn launch(catalog: Rc<ProductCatalog>, config: GridConfig) -> Self {
        let runtime = VirtualRuntime::new();
        let mut grid = ProductGrid::new(catalog, config, runtime.clock());
        grid.mount(runtime.intersections(), runtime.timers());
        Self { runtime, grid }
    }

    /// The grid under test.
    pub fn grid(&self) -> &ProductGrid {
        &self.grid
    }

    /// The virtual host, for leak checks and direct driver access.
    pub fn runtime(&self) -> &VirtualRuntime {
        &self.runtime
    }

    /// Scrolls until the sentinel reports visible: one page-load trigger.
    pub fn scroll_to_sentinel(&self) {
        self.runtime.fire_sentinel();
    }

    /// Fires `count` sentinel-visibility events back to back.
    pub fn scroll_to_sentinel_times(&self, count: usize) {
        for _ in 0..count {
            self.runtime.fire_sentinel();
        }
    }

    /// Moves the pointer onto the card for `id`.
    pub fn hover(&self, id: ProductId) {
        self.grid.hover_enter(id);
    }

    /// Moves the pointer off the card for `id`.
    pub fn unhover(&self, id: ProductId) {
        self.grid.hover_leave(id);
    }

    /// Lets virtual time pass, delivering due rotation ticks in order.
    pub fn advance_time(&self, delta: Duration) {
        self.runtime.advance(delta);
    }

    /// Advances time in whole rotation intervals of the grid's config.
    pub fn advance_rotations(&self, ticks: usize) {
        let interval = self.grid.config().carousel.interval;
        for _ in 0..ticks {
            self.runtime.advance(interval);
        }
    }

    /// Tears the grid down, as the surrounding shell would on navigation.
    pub fn unmount(&mut self) {
        self.grid.unmount();
    }
}
