//! The Vitrine product grid widget.
//!
//! [`ProductGrid`] glues the foundation state machines together: the
//! pagination loader feeds the visible product list, the hover carousel
//! rotates a hovered product's images, and a short crossfade softens each
//! rotation step. All mutable state is owned by the grid instance with an
//! explicit mount/unmount lifecycle.

mod crossfade;
mod product_grid;

pub use crossfade::{Crossfade, Easing};
pub use product_grid::{GridConfig, ImageLayer, ProductGrid};
