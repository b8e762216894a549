pub mod collection;
pub mod error;
pub mod expiry;
pub mod listing;
pub mod mapper;
pub mod pagination;
pub mod query;
pub mod repository;
pub mod seasoning;

pub use collection::{Page, SeasoningCollection, SeasoningListItem};
pub use error::DomainError;
pub use expiry::{ExpiryInfo, ExpiryStatus, WARNING_DAYS};
pub use listing::{ListSeasoningsUseCase, SeasoningListResponse};
pub use pagination::PaginationMeta;
pub use query::{ListSeasoningsParams, ListSeasoningsQuery, SortOrder};
pub use repository::{InMemorySeasoningRepository, SeasoningRepository};
pub use seasoning::{Seasoning, SeasoningProps};
