use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::DomainError;
use crate::pagination;

/// Default page size of the seasoning listing.
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Maximum length of a search term, in characters after trimming.
pub const SEARCH_MAX_LENGTH: usize = 50;

/// Ordering applied to a seasoning listing.
///
/// Parsed from the query string through [`FromStr`], which owns the
/// accepted spellings and the rejection message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Soonest expiry first; unknown expiry last.
    ExpiryAsc,
    /// Latest expiry first; unknown expiry still last.
    ExpiryDesc,
    NameAsc,
    NameDesc,
}

impl SortOrder {
    pub const ALL: &'static [SortOrder] = &[
        Self::ExpiryAsc,
        Self::ExpiryDesc,
        Self::NameAsc,
        Self::NameDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExpiryAsc => "expiryAsc",
            Self::ExpiryDesc => "expiryDesc",
            Self::NameAsc => "nameAsc",
            Self::NameDesc => "nameDesc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an unknown sort order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSortOrderError(pub String);

impl fmt::Display for ParseSortOrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sort must be one of: expiryAsc, expiryDesc, nameAsc, nameDesc (got '{}')",
            self.0
        )
    }
}

impl std::error::Error for ParseSortOrderError {}

impl FromStr for SortOrder {
    type Err = ParseSortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|order| order.as_str() == s)
            .ok_or_else(|| ParseSortOrderError(s.to_string()))
    }
}

/// Raw listing parameters as they arrive on the query string.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListSeasoningsParams {
    /// Page number (1-based). Default: 1.
    pub page: Option<u64>,
    /// Items per page (1-100). Default: 20.
    pub page_size: Option<u64>,
    /// Only seasonings of this type.
    pub type_id: Option<i64>,
    /// Case-insensitive substring of the name (at most 50 characters).
    pub search: Option<String>,
    /// One of `expiryAsc`, `expiryDesc`, `nameAsc`, `nameDesc`.
    pub sort: Option<String>,
    /// Only seasonings expiring within this many days (expired ones included).
    pub expires_within_days: Option<i64>,
}

/// A validated seasoning listing query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListSeasoningsQuery {
    pub page: u64,
    pub page_size: u64,
    pub type_id: Option<i32>,
    /// Trimmed and non-empty when present.
    pub search: Option<String>,
    pub sort: Option<SortOrder>,
    pub expires_within_days: Option<i64>,
}

impl Default for ListSeasoningsQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            type_id: None,
            search: None,
            sort: None,
            expires_within_days: None,
        }
    }
}

impl ListSeasoningsQuery {
    pub fn from_params(params: ListSeasoningsParams) -> Result<Self, DomainError> {
        let (page, page_size) =
            pagination::validate_page_request(params.page, params.page_size, DEFAULT_PAGE_SIZE)?;

        let type_id = params
            .type_id
            .map(|id| {
                i32::try_from(id)
                    .ok()
                    .filter(|id| *id > 0)
                    .ok_or_else(|| DomainError::validation("typeId must be a positive integer"))
            })
            .transpose()?;

        let sort = params
            .sort
            .as_deref()
            .map(SortOrder::from_str)
            .transpose()
            .map_err(|e| DomainError::Validation(e.to_string()))?;

        if let Some(days) = params.expires_within_days
            && days < 0
        {
            return Err(DomainError::validation("expiresWithinDays must be >= 0"));
        }

        Ok(Self {
            page,
            page_size,
            type_id,
            search: normalize_search(params.search)?,
            sort,
            expires_within_days: params.expires_within_days,
        })
    }
}

/// Trim a search term; blank becomes `None`, overlong is rejected.
pub fn normalize_search(search: Option<String>) -> Result<Option<String>, DomainError> {
    let Some(search) = search else {
        return Ok(None);
    };
    let trimmed = search.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > SEARCH_MAX_LENGTH {
        return Err(DomainError::Validation(format!(
            "search must be at most {SEARCH_MAX_LENGTH} characters"
        )));
    }
    Ok(Some(trimmed.to_string()))
}
