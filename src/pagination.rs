//! Page-number window shown under the results list.

use serde::{Deserialize, Serialize};

/// Results per page requested from the search API.
pub const PAGE_SIZE: u32 = 30;

/// The search API serves at most 1000 results, i.e. 34 pages of 30.
pub const API_MAX_PAGES: u32 = 34;

/// Windows with this many pages or fewer are shown without ellipses.
const FULL_WINDOW_LIMIT: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageMarker {
    Page(u32),
    Ellipsis,
}

/// Number of reachable pages, capped at `api_max_pages`.
pub fn total_pages(total_results: u64, page_size: u32, api_max_pages: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total_results.div_ceil(u64::from(page_size));
    pages.min(u64::from(api_max_pages)) as u32
}

/// Compressed sequence of page markers for `current_page`.
///
/// Numbers are strictly ascending, start at 1 and end at the last page, and
/// there are at most two ellipses. One page or none produces an empty window.
pub fn compute_window(
    current_page: u32,
    total_results: u64,
    page_size: u32,
    api_max_pages: u32,
) -> Vec<PageMarker> {
    let total = total_pages(total_results, page_size, api_max_pages);

    if total <= 1 {
        return Vec::new();
    }

    if total <= FULL_WINDOW_LIMIT {
        return (1..=total).map(PageMarker::Page).collect();
    }

    let mut markers = vec![PageMarker::Page(1)];
    if current_page > 3 {
        markers.push(PageMarker::Ellipsis);
    }

    let start = current_page.saturating_sub(1).max(2);
    let end = current_page.saturating_add(1).min(total - 1);
    markers.extend((start..=end).map(PageMarker::Page));

    if current_page < total - 2 {
        markers.push(PageMarker::Ellipsis);
    }
    markers.push(PageMarker::Page(total));

    markers
}

/// Page markers plus the state of the previous/next controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    pub markers: Vec<PageMarker>,
    pub current_page: u32,
    pub total_pages: u32,
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

impl PageWindow {
    pub fn compute(current_page: u32, total_results: u64, page_size: u32, api_max_pages: u32) -> Self {
        let total = total_pages(total_results, page_size, api_max_pages);
        Self {
            markers: compute_window(current_page, total_results, page_size, api_max_pages),
            current_page,
            total_pages: total,
            prev_disabled: current_page == 1,
            next_disabled: current_page == total,
        }
    }

    /// Whether pagination controls should be shown at all.
    pub fn is_visible(&self) -> bool {
        !self.markers.is_empty()
    }

    pub fn is_active(&self, page: u32) -> bool {
        page == self.current_page
    }

    /// Page the "previous" control leads to, if enabled.
    pub fn prev_page(&self) -> Option<u32> {
        (!self.prev_disabled && self.current_page > 1).then(|| self.current_page - 1)
    }

    /// Page the "next" control leads to, if enabled.
    pub fn next_page(&self) -> Option<u32> {
        (!self.next_disabled && self.current_page < self.total_pages).then(|| self.current_page + 1)
    }
}
