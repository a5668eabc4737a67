//! Page-number pagination for post listings.
//!
//! Pages are 1-based. A missing or non-numeric page falls back to the first
//! page; a number outside the valid range falls back to the last one.

use serde::{Deserialize, Serialize};

/// Default number of posts per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// `?page=` query parameter, kept as raw text so malformed values degrade to page 1.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub num_pages: usize,
    pub count: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    per_page: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    pub fn new(per_page: usize) -> Self {
        Self {
            per_page: per_page.max(1),
        }
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn num_pages(&self, count: usize) -> usize {
        count.div_ceil(self.per_page).max(1)
    }

    /// Resolve a raw page parameter to a valid page number.
    pub fn page_number(&self, raw: Option<&str>, count: usize) -> usize {
        let last = self.num_pages(count);
        match raw.map(str::trim).map(str::parse::<i64>) {
            None | Some(Err(_)) => 1,
            Some(Ok(n)) if n < 1 || n as u64 > last as u64 => last,
            Some(Ok(n)) => n as usize,
        }
    }

    pub fn get_page<T>(&self, items: Vec<T>, raw: Option<&str>) -> Page<T> {
        let count = items.len();
        let num_pages = self.num_pages(count);
        let number = self.page_number(raw, count);
        let start = (number - 1) * self.per_page;

        let items: Vec<T> = items
            .into_iter()
            .skip(start)
            .take(self.per_page)
            .collect();

        Page {
            items,
            number,
            num_pages,
            count,
            has_next: number < num_pages,
            has_previous: number > 1,
        }
    }
}
