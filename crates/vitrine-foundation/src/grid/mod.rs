//! Grid state machines: pagination and hover rotation.

mod carousel;
mod loader;
mod page_cursor;
mod visible_set;

pub use carousel::{AdvanceListener, CarouselConfig, HoverCarousel};
pub use loader::PaginationLoader;
pub use page_cursor::{PageCursor, PagingConfig};
pub use visible_set::VisibleSet;
