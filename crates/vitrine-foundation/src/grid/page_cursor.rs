//! Page cursor and paging configuration.

/// Paging configuration for a grid instance.
///
/// Both values are fixed per instantiation. The observed page sizes are 12
/// (the refined grid) and 8 (the compact one); 12 is the default. The margin
/// extends the viewport's trailing edge so the next page starts loading
/// shortly before the sentinel scrolls into view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PagingConfig {
    /// Number of products merged per sentinel-visibility event.
    pub page_size: usize,

    /// Pre-fetch margin in pixels beyond the viewport's trailing edge.
    pub prefetch_margin: f32,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            page_size: 12,
            prefetch_margin: 200.0,
        }
    }
}

impl PagingConfig {
    /// Creates a config with the given page size and the default margin.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }
}

/// Monotonic 1-based page counter.
///
/// The cursor names the next page to merge. It advances only when a merge
/// actually appended something, so redundant sentinel firings at the end of
/// the source leave it untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageCursor {
    page: usize,
}

impl PageCursor {
    pub fn new() -> Self {
        Self { page: 1 }
    }

    /// The page the next merge will draw from.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Moves to the next page.
    pub fn advance(&mut self) {
        self.page += 1;
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_starts_at_one_and_advances_by_one() {
        let mut cursor = PageCursor::new();
        assert_eq!(cursor.page(), 1);
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.page(), 3);
    }

    #[test]
    fn default_config_matches_refined_grid() {
        let config = PagingConfig::default();
        assert_eq!(config.page_size, 12);
        assert_eq!(config.prefetch_margin, 200.0);
    }

    #[test]
    fn with_page_size_keeps_default_margin() {
        let config = PagingConfig::with_page_size(8);
        assert_eq!(config.page_size, 8);
        assert_eq!(config.prefetch_margin, 200.0);
    }
}
