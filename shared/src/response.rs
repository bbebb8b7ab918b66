//! Pagination types shared by list endpoints

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Paginated list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    /// Total number of matching records (before pagination)
    pub total: i64,
    /// Current page number (1-indexed)
    pub page: i64,
    /// Number of items per page
    pub page_size: i64,
    /// Total number of pages
    pub total_pages: i64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: i64, page: i64, page_size: i64) -> Self {
        let total_pages = if page_size > 0 {
            total.div_ceil(page_size)
        } else {
            1
        };
        Self {
            items,
            total,
            page,
            page_size,
            total_pages,
        }
    }
}

/// Pagination query parameters, defaulting to page 1 with 20 items
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl PageQuery {
    pub const DEFAULT_PAGE_SIZE: i64 = 20;
    pub const MAX_PAGE_SIZE: i64 = 100;

    /// Validate and resolve to `(page, page_size, offset)`
    pub fn resolve(&self) -> AppResult<(i64, i64, i64)> {
        let page = self.page.unwrap_or(1);
        let page_size = self.page_size.unwrap_or(Self::DEFAULT_PAGE_SIZE);

        if page < 1 {
            return Err(AppError::validation("Page must be >= 1"));
        }
        if page_size < 1 || page_size > Self::MAX_PAGE_SIZE {
            return Err(AppError::validation("Page size must be between 1 and 100"));
        }

        Ok((page, page_size, (page - 1) * page_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        let resp = PaginatedResponse::new(vec![1, 2, 3], 25, 1, 10);
        assert_eq!(resp.total_pages, 3);

        let resp = PaginatedResponse::new(Vec::<i32>::new(), 0, 1, 10);
        assert_eq!(resp.total_pages, 0);
    }

    #[test]
    fn test_page_query_defaults() {
        let q = PageQuery {
            page: None,
            page_size: None,
        };
        assert_eq!(q.resolve().unwrap(), (1, 20, 0));
    }

    #[test]
    fn test_page_query_bounds() {
        let q = PageQuery {
            page: Some(0),
            page_size: None,
        };
        assert!(q.resolve().is_err());

        let q = PageQuery {
            page: Some(1),
            page_size: Some(101),
        };
        assert!(q.resolve().is_err());

        let q = PageQuery {
            page: Some(3),
            page_size: Some(50),
        };
        assert_eq!(q.resolve().unwrap(), (3, 50, 100));
    }
}
