use std::ops::Range;

/// Number of page links shown in the navigation bar.
pub(crate) const WINDOW_SIZE: usize = 5;

/// Slice bounds and navigation window for one index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Pagination {
    pub page: usize,
    pub total_pages: usize,
    pub slice: Range<usize>,
    pub window: Vec<usize>,
}

pub(crate) fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size).max(1)
}

impl Pagination {
    /// `current_page` must already be within `1..=total_pages`; see
    /// [`Pagination::validate_page`].
    pub fn plan(total_items: usize, page_size: usize, current_page: usize) -> Self {
        debug_assert!(Self::validate_page(total_items, page_size, current_page).is_some());
        let total_pages = total_pages(total_items, page_size);

        let start = ((current_page - 1) * page_size).min(total_items);
        let end = (current_page * page_size).min(total_items);

        let anchor = current_page
            .saturating_sub(2)
            .clamp(1, total_pages.saturating_sub(WINDOW_SIZE - 1).max(1));
        let window = (anchor..anchor + WINDOW_SIZE)
            .filter(|p| *p <= total_pages)
            .collect();

        Pagination {
            page: current_page,
            total_pages,
            slice: start..end,
            window,
        }
    }

    /// Returns the page number back if it can be passed to [`Pagination::plan`].
    pub fn validate_page(total_items: usize, page_size: usize, page: usize) -> Option<usize> {
        (1..=total_pages(total_items, page_size))
            .contains(&page)
            .then_some(page)
    }

    pub fn is_first(&self) -> bool {
        self.page == 1
    }

    pub fn is_last(&self) -> bool {
        self.page == self.total_pages
    }
}

/// Site-relative URL of an index page. Page 1 is the home page.
pub(crate) fn page_href(page: usize) -> String {
    if page <= 1 {
        "/".to_string()
    } else {
        format!("/page/{page}")
    }
}
