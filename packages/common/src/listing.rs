use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::collection::SeasoningCollection;
use crate::error::DomainError;
use crate::mapper::{SeasoningListItemDto, to_list_item};
use crate::pagination::PaginationMeta;
use crate::query::ListSeasoningsQuery;
use crate::repository::{SeasoningCriteria, SeasoningRepository};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SeasoningListResponse {
    pub data: Vec<SeasoningListItemDto>,
    pub meta: PaginationMeta,
}

/// Loads seasonings, derives their expiry status and applies a listing query.
#[derive(Clone)]
pub struct ListSeasoningsUseCase {
    repository: Arc<dyn SeasoningRepository>,
}

impl ListSeasoningsUseCase {
    pub fn new(repository: Arc<dyn SeasoningRepository>) -> Self {
        Self { repository }
    }

    /// Every item is evaluated against the same `as_of` instant.
    /// Repository errors are returned as-is.
    pub async fn execute(
        &self,
        query: &ListSeasoningsQuery,
        as_of: DateTime<Utc>,
    ) -> Result<SeasoningListResponse, DomainError> {
        let criteria = SeasoningCriteria {
            type_id: query.type_id,
        };
        let seasonings = self.repository.find_all(&criteria).await?;
        let loaded = seasonings.len();

        let page = seasonings
            .iter()
            .map(|seasoning| to_list_item(seasoning, as_of))
            .collect::<SeasoningCollection>()
            .apply_query(query)
            .paginate(query.page, query.page_size);

        let meta = PaginationMeta::new(query.page, query.page_size, page.total_items);
        debug!(
            loaded,
            matched = page.total_items,
            returned = page.items.len(),
            page = query.page,
            "Listed seasonings"
        );

        Ok(SeasoningListResponse {
            data: page.items.iter().map(SeasoningListItemDto::from).collect(),
            meta,
        })
    }
}
