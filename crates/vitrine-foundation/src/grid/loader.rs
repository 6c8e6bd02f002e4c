//! Pagination loader: sentinel-driven incremental page merging.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use vitrine_core::{IntersectionDriver, ObserverRegistration};

use crate::catalog::{Product, ProductCatalog};

use super::page_cursor::{PageCursor, PagingConfig};
use super::visible_set::VisibleSet;

/// Incremental pagination over a static catalog.
///
/// A cheap-Clone handle over shared inner state, so the sentinel callback
/// and the owning widget observe the same loader. Each sentinel-visibility
/// event merges the cursor's page slice into the visible set through the
/// dedup guard; the cursor advances only when the merge appended something,
/// which makes every firing past the end of the source a no-op. There is no
/// end-of-list signal and no retry: the catalog is static and finite.
#[derive(Clone)]
pub struct PaginationLoader {
    inner: Rc<RefCell<LoaderInner>>,
}

struct LoaderInner {
    catalog: Rc<ProductCatalog>,
    config: PagingConfig,
    cursor: PageCursor,
    visible: VisibleSet,
    observer: Option<ObserverRegistration>,
}

impl PaginationLoader {
    pub fn new(catalog: Rc<ProductCatalog>, config: PagingConfig) -> Self {
        assert!(config.page_size > 0, "page_size must be positive");
        Self {
            inner: Rc::new(RefCell::new(LoaderInner {
                catalog,
                config,
                cursor: PageCursor::new(),
                visible: VisibleSet::new(),
                observer: None,
            })),
        }
    }

    /// Attaches the sentinel observer with the configured pre-fetch margin.
    ///
    /// Re-attaching replaces (and thereby detaches) any previous observer.
    /// The callback holds only a weak backref, so dropping the last loader
    /// handle leaves nothing for the driver to call into.
    pub fn attach(&self, driver: Rc<dyn IntersectionDriver>) {
        let margin = self.inner.borrow().config.prefetch_margin;
        let weak: Weak<RefCell<LoaderInner>> = Rc::downgrade(&self.inner);
        let registration = ObserverRegistration::observe(
            driver,
            margin,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().step();
                }
            }),
        );
        self.inner.borrow_mut().observer = Some(registration);
    }

    /// Detaches the sentinel observer; further host firings go nowhere.
    pub fn detach(&self) {
        self.inner.borrow_mut().observer.take();
    }

    /// Handles one sentinel-visibility event directly (the same transition
    /// the attached observer performs).
    pub fn on_sentinel_visible(&self) {
        self.inner.borrow_mut().step();
    }

    /// Number of products currently visible.
    pub fn visible_len(&self) -> usize {
        self.inner.borrow().visible.len()
    }

    /// Snapshot of the visible products in render order.
    pub fn visible_products(&self) -> Vec<Product> {
        self.inner.borrow().visible.to_vec()
    }

    /// Runs `f` against the visible set without cloning it.
    pub fn with_visible<R>(&self, f: impl FnOnce(&VisibleSet) -> R) -> R {
        f(&self.inner.borrow().visible)
    }

    /// The page the next merge will draw from.
    pub fn current_page(&self) -> usize {
        self.inner.borrow().cursor.page()
    }

    /// True once the cursor's slice is empty: every further event is a no-op.
    pub fn is_exhausted(&self) -> bool {
        let inner = self.inner.borrow();
        inner
            .catalog
            .page(inner.cursor.page(), inner.config.page_size)
            .is_empty()
    }
}

impl LoaderInner {
    fn step(&mut self) {
        let page = self.cursor.page();
        let slice = self.catalog.page(page, self.config.page_size).to_vec();
        if slice.is_empty() {
            log::debug!("sentinel fired past end of catalog (page {}), no-op", page);
            return;
        }
        let appended = self.visible.merge(&slice);
        if appended == 0 {
            log::debug!("page {} held no new products, no-op", page);
            return;
        }
        self.cursor.advance();
        log::debug!(
            "merged page {}: {} new, {} visible of {}",
            page,
            appended,
            self.visible.len(),
            self.catalog.len()
        );
    }
}
