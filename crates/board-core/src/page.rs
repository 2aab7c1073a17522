//! Offset pagination types.

use crate::sort::SortOrder;

/// Pagination request: zero-based page index, page size, and the requested
/// ordering (empty means storage order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
    pub sort: Vec<SortOrder>,
}

impl PageRequest {
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page,
            size,
            sort: Vec::new(),
        }
    }

    pub fn with_sort(page: u64, size: u64, sort: Vec<SortOrder>) -> Self {
        Self { page, size, sort }
    }

    /// Row offset of this page; saturates rather than overflowing on
    /// hostile page/size values.
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }
}

/// One page of results plus the total matching count.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_page_times_size() {
        assert_eq!(PageRequest::new(0, 10).offset(), 0);
        assert_eq!(PageRequest::new(3, 10).offset(), 30);
    }

    #[test]
    fn offset_saturates_instead_of_overflowing() {
        assert_eq!(PageRequest::new(u64::MAX, 2).offset(), u64::MAX);
    }
}
