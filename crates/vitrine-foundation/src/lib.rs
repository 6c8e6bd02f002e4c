//! Foundation state machines for the Vitrine product grid.
//!
//! Two mechanisms, both scoped to one grid instance and owned by it:
//!
//! - [`grid::PaginationLoader`] grows an ordered, de-duplicated set of
//!   visible products in fixed-size pages as a sentinel element intersects
//!   the viewport.
//! - [`grid::HoverCarousel`] rotates a hovered product's images on a
//!   repeating timer and cancels it deterministically on hover-leave.
//!
//! The static product source lives in [`catalog`].

pub mod catalog;
pub mod grid;

pub use catalog::{ImageRef, Product, ProductCatalog, ProductId};
pub use grid::{
    AdvanceListener, CarouselConfig, HoverCarousel, PageCursor, PaginationLoader, PagingConfig,
    VisibleSet,
};
