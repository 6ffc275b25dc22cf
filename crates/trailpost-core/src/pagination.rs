//! Page bookkeeping for paged comment lists.

use serde::Serialize;

/// 1-based position within a paged list, recomputed from each response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageCursor {
    pub current_page: u32,
    pub total_pages: u32,
    pub page_size: u32,
}

impl PageCursor {
    pub const fn new(page_size: u32) -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            page_size: if page_size == 0 { 1 } else { page_size },
        }
    }

    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub const fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub const fn contains(&self, page: u32) -> bool {
        page >= 1 && page <= self.total_pages
    }

    /// Page to request for "next", or `None` on the last page.
    pub const fn next_target(&self) -> Option<u32> {
        if self.has_next() {
            Some(self.current_page + 1)
        } else {
            None
        }
    }

    pub const fn prev_target(&self) -> Option<u32> {
        if self.has_prev() {
            Some(self.current_page - 1)
        } else {
            None
        }
    }

    /// Parses free-form "jump to page" input.
    ///
    /// Non-digit characters are dropped. Empty or out-of-range input yields
    /// `None` and must not be requested.
    pub fn jump_target(&self, input: &str) -> Option<u32> {
        let digits = input
            .chars()
            .filter(char::is_ascii_digit)
            .collect::<String>();
        digits
            .parse::<u32>()
            .ok()
            .filter(|page| self.contains(*page))
    }

    /// Records the page that was loaded and the server's page count.
    pub fn apply_response(&mut self, page: u32, total_pages: u32) {
        self.total_pages = total_pages.max(1);
        self.current_page = page.clamp(1, self.total_pages);
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_COMMENT_PAGE_SIZE)
    }
}
