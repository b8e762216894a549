use chrono::{DateTime, Utc};
use common::repository::{NewSeasoning, SeasoningChanges};
use serde::Deserialize;

use super::shared::double_option;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSeasoningRequest {
    /// Display name, 1-256 characters after trimming.
    #[schema(example = "Soy Sauce")]
    pub name: String,
    #[schema(example = 3)]
    pub type_id: i32,
    pub image_id: Option<i32>,
    #[schema(example = "2024-06-30T00:00:00.000Z")]
    pub best_before_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub purchased_at: Option<DateTime<Utc>>,
}

/// Partial update. Omitted fields are kept; `null` clears a nullable field.
#[derive(Debug, Default, PartialEq, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSeasoningRequest {
    pub name: Option<String>,
    pub type_id: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub image_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub best_before_at: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub expires_at: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub purchased_at: Option<Option<DateTime<Utc>>>,
}

impl From<CreateSeasoningRequest> for NewSeasoning {
    fn from(req: CreateSeasoningRequest) -> Self {
        Self {
            name: req.name,
            type_id: req.type_id,
            image_id: req.image_id,
            best_before_at: req.best_before_at,
            expires_at: req.expires_at,
            purchased_at: req.purchased_at,
        }
    }
}

impl From<UpdateSeasoningRequest> for SeasoningChanges {
    fn from(req: UpdateSeasoningRequest) -> Self {
        Self {
            name: req.name,
            type_id: req.type_id,
            image_id: req.image_id,
            best_before_at: req.best_before_at,
            expires_at: req.expires_at,
            purchased_at: req.purchased_at,
        }
    }
}
