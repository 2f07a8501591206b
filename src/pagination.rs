//! Page request normalisation and the page envelope returned by list endpoints.

use serde::Serialize;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: usize = 25;
/// Upper bound for a requested page size.
pub const MAX_PAGE_SIZE: usize = 1000;

/// Zero-based page index and page size as understood by the repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page_index: usize,
    pub page_size: usize,
}

impl Pagination {
    /// Number of rows to skip. Saturates for pages far past any data.
    pub fn offset(&self) -> usize {
        self.page_index.saturating_mul(self.page_size)
    }

    /// Maximum number of rows to return.
    pub fn limit(&self) -> usize {
        self.page_size
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Turn user supplied (one-based) paging values into a [`Pagination`].
///
/// Page numbers below 1 select the first page. Missing sizes default to
/// [`DEFAULT_PAGE_SIZE`]; sizes are capped at [`MAX_PAGE_SIZE`] and raised to 1.
pub fn build_page_request(page_number: Option<i64>, page_size: Option<i64>) -> Pagination {
    let page_index = match page_number {
        Some(number) if number > 0 => usize::try_from(number - 1).unwrap_or(usize::MAX),
        _ => 0,
    };

    let page_size = match page_size {
        None => DEFAULT_PAGE_SIZE,
        Some(size) if size > MAX_PAGE_SIZE as i64 => MAX_PAGE_SIZE,
        Some(size) => size.max(1) as usize,
    };

    Pagination {
        page_index,
        page_size,
    }
}

/// A bounded slice of a larger result set.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    /// One-based page number.
    pub page_number: usize,
    pub page_size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, pagination: Pagination, total_elements: usize) -> Self {
        Self {
            content,
            page_number: pagination.page_index.saturating_add(1),
            page_size: pagination.page_size,
            total_elements,
            total_pages: total_elements.div_ceil(pagination.page_size),
        }
    }

    /// Convert every element, keeping the paging metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_25() {
        assert_eq!(
            build_page_request(None, None),
            Pagination {
                page_index: 0,
                page_size: 25
            }
        );
    }

    #[test]
    fn page_one_equals_no_page() {
        assert_eq!(build_page_request(Some(1), None), build_page_request(None, None));
        assert_eq!(build_page_request(Some(0), None).page_index, 0);
        assert_eq!(build_page_request(Some(-3), None).page_index, 0);
    }

    #[test]
    fn converts_to_zero_based_index() {
        let pagination = build_page_request(Some(2), Some(10));
        assert_eq!(pagination.page_index, 1);
        assert_eq!(pagination.offset(), 10);
    }

    #[test]
    fn caps_page_size() {
        assert_eq!(build_page_request(None, Some(5000)).page_size, MAX_PAGE_SIZE);
        assert_eq!(build_page_request(None, Some(1000)).page_size, 1000);
        assert_eq!(build_page_request(None, Some(0)).page_size, 1);
    }

    #[test]
    fn page_metadata() {
        let page = Page::new(vec![1, 2], build_page_request(Some(2), Some(2)), 5);
        assert_eq!(page.page_number, 2);
        assert_eq!(page.total_pages, 3);

        let doubled = page.map(|n| n * 2);
        assert_eq!(doubled.content, vec![2, 4]);
        assert_eq!(doubled.total_elements, 5);
    }

    #[test]
    fn huge_page_number_saturates_offset() {
        let pagination = build_page_request(Some(i64::MAX), Some(1000));
        assert_eq!(pagination.page_index, (i64::MAX - 1) as usize);
        assert_eq!(pagination.offset(), usize::MAX);

        let page: Page<i32> = Page::new(vec![], pagination, 3);
        assert_eq!(page.page_number, i64::MAX as usize);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn empty_page_has_no_pages() {
        let page: Page<i32> = Page::new(vec![], Pagination::default(), 0);
        assert_eq!(page.total_pages, 0);
    }
}
