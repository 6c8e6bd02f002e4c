//! Assertion helpers for grid robot tests.

use rustc_hash::FxHashSet;

use vitrine_foundation::{Product, ProductId};
use vitrine_ui::{ImageLayer, ProductGrid};

/// Assert that a value is within an expected tolerance.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that no product id appears twice in a rendered list.
pub fn assert_no_duplicate_products(products: &[Product], msg: &str) {
    let mut seen: FxHashSet<ProductId> = FxHashSet::default();
    for product in products {
        assert!(
            seen.insert(product.id),
            "{}: duplicate product {} in visible set of {}",
            msg,
            product.id,
            products.len()
        );
    }
}

/// Assert that exactly one image layer of `id` is fully opaque and all
/// others are fully transparent (the steady-state display contract).
pub fn assert_single_opaque_layer(grid: &ProductGrid, id: ProductId, expected_index: usize) {
    let layers = grid.image_layers(id);
    assert!(
        !layers.is_empty(),
        "product {} is not rendered, no layers to check",
        id
    );
    let opaque: Vec<&ImageLayer> = layers.iter().filter(|layer| layer.alpha >= 1.0).collect();
    assert_eq!(
        opaque.len(),
        1,
        "product {}: expected one opaque layer, found {} in {:?}",
        id,
        opaque.len(),
        layers
    );
    assert_eq!(
        opaque[0].index, expected_index,
        "product {}: wrong image displayed",
        id
    );
    for layer in &layers {
        assert!(
            layer.alpha >= 1.0 || layer.alpha <= 0.0,
            "product {}: layer {} is mid-fade (alpha {}) in steady state",
            id,
            layer.index,
            layer.alpha
        );
    }
}
