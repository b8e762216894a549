use serde::{Deserialize, Serialize};

use crate::error::DomainError;

pub const MAX_PAGE_SIZE: u64 = 100;

/// Pagination metadata included in list responses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Current page number (1-based).
    #[schema(example = 1)]
    pub page: u64,
    /// Number of items per page.
    #[schema(example = 20)]
    pub page_size: u64,
    /// Total number of matching items across all pages.
    #[schema(example = 47)]
    pub total_items: u64,
    /// Total number of pages.
    #[schema(example = 3)]
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PaginationMeta {
    pub fn new(page: u64, page_size: u64, total_items: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total_items.div_ceil(page_size)
        };
        Self {
            page,
            page_size,
            total_items,
            total_pages,
            has_next: page < total_pages,
            has_previous: total_pages > 0 && page > 1,
        }
    }
}

/// Number of items skipped before `page`.
pub fn calculate_offset(page: u64, page_size: u64) -> u64 {
    page.saturating_sub(1).saturating_mul(page_size)
}

/// Apply defaults and check `page >= 1` and `1 <= page_size <= 100`.
pub fn validate_page_request(
    page: Option<u64>,
    page_size: Option<u64>,
    default_page_size: u64,
) -> Result<(u64, u64), DomainError> {
    let page = page.unwrap_or(1);
    if page < 1 {
        return Err(DomainError::validation("page must be >= 1"));
    }
    let page_size = page_size.unwrap_or(default_page_size);
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(DomainError::Validation(format!(
            "pageSize must be 1-{MAX_PAGE_SIZE}"
        )));
    }
    Ok((page, page_size))
}
