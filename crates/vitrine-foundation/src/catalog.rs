//! Static product source.
//!
//! The grid is fed from a fully pre-loaded, ordered catalog; there is no
//! fetching and no mutation after construction. The catalog's only job is to
//! hand out page slices by position.

use std::rc::Rc;

use smallvec::SmallVec;

/// Unique, stable product identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(pub u64);

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Reference to a product image (URL or asset path).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Immutable product record.
///
/// `images` is guaranteed non-empty once the record has passed through
/// [`ProductCatalog::new`]; most products carry a handful of shots, so the
/// list is inline up to four entries.
#[derive(Clone, Debug, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub images: SmallVec<[ImageRef; 4]>,
}

impl Product {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        price: f64,
        images: impl IntoIterator<Item = ImageRef>,
    ) -> Self {
        Self {
            id: ProductId(id),
            name: name.into(),
            price,
            images: images.into_iter().collect(),
        }
    }

    /// Number of images, always ≥ 1 for catalog-held products.
    pub fn image_count(&self) -> usize {
        self.images.len()
    }
}

/// Ordered, immutable product source shared by loader and tests.
#[derive(Debug)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    /// Builds a catalog from an ordered product sequence.
    ///
    /// A product with an empty image list would break the "exactly one image
    /// visible" contract downstream, so it is patched with a placeholder
    /// reference and reported at warn level rather than rejected.
    pub fn new(products: impl IntoIterator<Item = Product>) -> Rc<Self> {
        let products = products
            .into_iter()
            .map(|mut product| {
                if product.images.is_empty() {
                    log::warn!(
                        "product {} ({}) has no images; inserting placeholder",
                        product.id,
                        product.name
                    );
                    product.images.push(ImageRef::new("placeholder.png"));
                }
                product
            })
            .collect();
        Rc::new(Self { products })
    }

    /// Total number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Product at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    /// The 1-based page `[(page - 1) * page_size, page * page_size)`,
    /// clamped to the catalog length. Out-of-range pages yield an empty
    /// slice.
    pub fn page(&self, page: usize, page_size: usize) -> &[Product] {
        debug_assert!(page >= 1, "pages are 1-based");
        let start = (page.saturating_sub(1)) * page_size;
        let end = (start + page_size).min(self.products.len());
        if start >= end {
            &[]
        } else {
            &self.products[start..end]
        }
    }

    /// Sample catalog for demos and tests: `count` products, each with
    /// `images_per_product` images.
    pub fn sample(count: usize, images_per_product: usize) -> Rc<Self> {
        Self::new((0..count).map(|i| {
            let id = i as u64 + 1;
            Product::new(
                id,
                format!("Product {}", id),
                9.99 + i as f64,
                (0..images_per_product.max(1))
                    .map(move |shot| ImageRef::new(format!("images/p{}-{}.jpg", id, shot))),
            )
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_slices_are_positional_and_clamped() {
        let catalog = ProductCatalog::sample(20, 3);
        assert_eq!(catalog.page(1, 8).len(), 8);
        assert_eq!(catalog.page(1, 8)[0].id, ProductId(1));
        assert_eq!(catalog.page(2, 8)[0].id, ProductId(9));
        // Last page is short.
        assert_eq!(catalog.page(3, 8).len(), 4);
        // Past the end is empty, repeatedly.
        assert!(catalog.page(4, 8).is_empty());
        assert!(catalog.page(100, 8).is_empty());
    }

    #[test]
    fn empty_image_list_gets_placeholder() {
        let catalog = ProductCatalog::new([Product::new(7, "Bare", 1.0, [])]);
        let product = catalog.get(0).unwrap();
        assert_eq!(product.image_count(), 1);
        assert_eq!(product.images[0].as_str(), "placeholder.png");
    }

    #[test]
    fn sample_images_are_ordered() {
        let catalog = ProductCatalog::sample(2, 3);
        let images: Vec<_> = catalog.get(0).unwrap().images.iter().collect();
        assert_eq!(images.len(), 3);
        assert_eq!(images[0].as_str(), "images/p1-0.jpg");
        assert_eq!(images[2].as_str(), "images/p1-2.jpg");
    }
}
