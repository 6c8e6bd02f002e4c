//! The accumulated, render-ready product list.

use indexmap::IndexMap;

use crate::catalog::{Product, ProductId};

/// Ordered, de-duplicated accumulation of rendered products.
///
/// Backed by an insertion-ordered map keyed by product id, so the ordering
/// guarantee and the dedup guard are the same structure: an id that is
/// already present is skipped on merge, and the set never shrinks or
/// reorders. Reset happens only by dropping the owning grid.
#[derive(Debug, Default)]
pub struct VisibleSet {
    products: IndexMap<ProductId, Product>,
}

impl VisibleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends every product from `page` whose id is not yet present.
    /// Returns how many were appended.
    pub fn merge(&mut self, page: &[Product]) -> usize {
        let before = self.products.len();
        for product in page {
            if self.products.contains_key(&product.id) {
                log::debug!("skipping duplicate product {}", product.id);
                continue;
            }
            self.products.insert(product.id, product.clone());
        }
        self.products.len() - before
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.products.contains_key(&id)
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    /// Products in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// Snapshot of the current ordering, for render passes that want an
    /// owned list.
    pub fn to_vec(&self) -> Vec<Product> {
        self.products.values().cloned().collect()
    }
}
