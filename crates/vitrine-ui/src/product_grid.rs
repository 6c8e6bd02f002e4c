//! The product grid widget.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use rustc_hash::FxHashMap;

use vitrine_core::{Clock, IntersectionDriver, TimerDriver};
use vitrine_foundation::{
    CarouselConfig, HoverCarousel, PaginationLoader, PagingConfig, Product, ProductCatalog,
    ProductId,
};

use crate::crossfade::Crossfade;

/// Grid-wide configuration: the two tunable loader constants plus the
/// rotation interval and fade duration, all at their observed defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    pub paging: PagingConfig,
    pub carousel: CarouselConfig,
    /// Crossfade length for each rotation step. Zero disables the fade.
    pub fade_duration: Duration,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            paging: PagingConfig::default(),
            carousel: CarouselConfig::default(),
            fade_duration: Duration::from_millis(300),
        }
    }
}

/// Per-image presentation snapshot: one entry per image of a product, in
/// image order. When no fade is in flight exactly one layer has alpha 1.0
/// and the rest 0.0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageLayer {
    pub index: usize,
    pub alpha: f32,
}

impl ImageLayer {
    /// True if this layer is display-on (contributes any paint at all).
    pub fn is_visible(&self) -> bool {
        self.alpha > 0.0
    }
}

/// State owned by a mounted grid; dropping it is the teardown: the sentinel
/// observer detaches and every rotation timer cancels through its
/// registration.
struct MountedGrid {
    loader: PaginationLoader,
    carousel: HoverCarousel,
    fades: Rc<RefCell<FxHashMap<ProductId, Crossfade>>>,
}

/// A paginated product grid with hover-rotated images.
///
/// The grid owns all of its mutable state explicitly; nothing lives in
/// ambient module state. `mount` wires the state machines to the host's
/// drivers, `unmount` tears them down. Between a `new` and a `mount` (or
/// after an unmount) the grid renders nothing.
pub struct ProductGrid {
    catalog: Rc<ProductCatalog>,
    config: GridConfig,
    clock: Rc<dyn Clock>,
    mounted: Option<MountedGrid>,
}

impl ProductGrid {
    pub fn new(catalog: Rc<ProductCatalog>, config: GridConfig, clock: Rc<dyn Clock>) -> Self {
        Self {
            catalog,
            config,
            clock,
            mounted: None,
        }
    }

    /// Mounts the grid: starts a fresh visible set and cursor, attaches the
    /// sentinel observer, and arms the carousel. Remounting an already
    /// mounted grid tears the old instance down first.
    pub fn mount(
        &mut self,
        intersections: Rc<dyn IntersectionDriver>,
        timers: Rc<dyn TimerDriver>,
    ) {
        if self.mounted.is_some() {
            log::warn!("grid mounted twice; remounting with fresh state");
            self.mounted = None;
        }

        let loader = PaginationLoader::new(self.catalog.clone(), self.config.paging);
        loader.attach(intersections);

        let carousel = HoverCarousel::new(timers, self.config.carousel);
        let fades: Rc<RefCell<FxHashMap<ProductId, Crossfade>>> =
            Rc::new(RefCell::new(FxHashMap::default()));

        let fade_duration = self.config.fade_duration.as_millis() as u64;
        let fade_sink = fades.clone();
        let clock = self.clock.clone();
        carousel.set_on_advance(Box::new(move |id, from, to| {
            // A single-image rotation "advances" in place; nothing to fade.
            if from == to || fade_duration == 0 {
                return;
            }
            fade_sink
                .borrow_mut()
                .insert(id, Crossfade::begin(from, to, clock.now_millis(), fade_duration));
        }));

        self.mounted = Some(MountedGrid {
            loader,
            carousel,
            fades,
        });
        log::debug!(
            "grid mounted: {} products in catalog, page size {}",
            self.catalog.len(),
            self.config.paging.page_size
        );
    }

    /// Tears the grid down: detaches the sentinel observer and cancels all
    /// rotation timers. Safe to call when not mounted.
    pub fn unmount(&mut self) {
        if self.mounted.take().is_some() {
            log::debug!("grid unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Products currently rendered, in catalog order.
    pub fn visible_products(&self) -> Vec<Product> {
        self.mounted
            .as_ref()
            .map(|mounted| mounted.loader.visible_products())
            .unwrap_or_default()
    }

    pub fn visible_len(&self) -> usize {
        self.mounted
            .as_ref()
            .map(|mounted| mounted.loader.visible_len())
            .unwrap_or(0)
    }

    /// True once every catalog page has been merged.
    pub fn is_exhausted(&self) -> bool {
        self.mounted
            .as_ref()
            .map(|mounted| mounted.loader.is_exhausted())
            .unwrap_or(false)
    }

    /// Pointer entered the card for `id`. Only rendered products react; an
    /// id outside the visible set is ignored.
    pub fn hover_enter(&self, id: ProductId) {
        let Some(mounted) = self.mounted.as_ref() else {
            return;
        };
        let Some(product) = mounted.loader.with_visible(|set| set.get(id).cloned()) else {
            log::debug!("hover-enter for unrendered product {}, ignored", id);
            return;
        };
        // Entering snaps straight to image 0; any leftover fade is stale.
        mounted.fades.borrow_mut().remove(&id);
        mounted.carousel.hover_enter(&product);
    }

    /// Pointer left the card for `id`: rotation stops now.
    pub fn hover_leave(&self, id: ProductId) {
        if let Some(mounted) = self.mounted.as_ref() {
            mounted.carousel.hover_leave(id);
            mounted.fades.borrow_mut().remove(&id);
        }
    }

    /// Index of the image currently displayed for `id`.
    pub fn displayed_index(&self, id: ProductId) -> usize {
        self.mounted
            .as_ref()
            .map(|mounted| mounted.carousel.displayed_index(id))
            .unwrap_or(0)
    }

    /// True while a rotation timer runs for `id`.
    pub fn is_rotating(&self, id: ProductId) -> bool {
        self.mounted
            .as_ref()
            .map(|mounted| mounted.carousel.is_rotating(id))
            .unwrap_or(false)
    }

    /// Presentation snapshot for the card of `id`: an alpha per image at the
    /// current clock reading. Finished fades are pruned here, so steady
    /// state always shows exactly one fully-opaque layer.
    pub fn image_layers(&self, id: ProductId) -> Vec<ImageLayer> {
        let Some(mounted) = self.mounted.as_ref() else {
            return Vec::new();
        };
        let Some(image_count) =
            mounted.loader.with_visible(|set| set.get(id).map(Product::image_count))
        else {
            return Vec::new();
        };

        let now = self.clock.now_millis();
        let fade = {
            let mut fades = mounted.fades.borrow_mut();
            let current = fades.get(&id).copied();
            match current {
                Some(fade) if fade.is_finished(now) => {
                    fades.remove(&id);
                    None
                }
                other => other,
            }
        };
        let displayed = mounted.carousel.displayed_index(id);

        (0..image_count)
            .map(|index| {
                let alpha = match fade {
                    Some(fade) if index == fade.to => fade.incoming_alpha(now),
                    Some(fade) if index == fade.from => fade.outgoing_alpha(now),
                    Some(_) => 0.0,
                    None if index == displayed => 1.0,
                    None => 0.0,
                };
                ImageLayer { index, alpha }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmounted_grid_renders_nothing() {
        let grid = ProductGrid::new(
            ProductCatalog::sample(10, 2),
            GridConfig::default(),
            Rc::new(vitrine_core::SystemClock::new()),
        );
        assert!(!grid.is_mounted());
        assert!(grid.visible_products().is_empty());
        assert!(grid.image_layers(ProductId(1)).is_empty());
        assert_eq!(grid.displayed_index(ProductId(1)), 0);
    }

    #[test]
    fn default_config_carries_observed_constants() {
        let config = GridConfig::default();
        assert_eq!(config.paging.page_size, 12);
        assert_eq!(config.paging.prefetch_margin, 200.0);
        assert_eq!(config.carousel.interval, Duration::from_millis(2000));
        assert_eq!(config.fade_duration, Duration::from_millis(300));
    }
}
