use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::collection::SeasoningListItem;
use crate::error::DomainError;
use crate::expiry::{ExpiryStatus, expiry_status_from};
use crate::seasoning::Seasoning;

/// API shape of a listed seasoning.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeasoningListItemDto {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Soy Sauce")]
    pub name: String,
    #[schema(example = 3)]
    pub type_id: i32,
    pub image_id: Option<i32>,
    /// ISO-8601 instant, or `null` when unknown.
    #[schema(example = "2024-06-30T00:00:00.000Z")]
    pub best_before_at: Option<String>,
    /// ISO-8601 instant, or `null` when unknown.
    pub expires_at: Option<String>,
    /// ISO-8601 instant, or `null` when unknown.
    pub purchased_at: Option<String>,
    /// `null` when neither `expiresAt` nor `bestBeforeAt` is set.
    #[schema(example = 12)]
    pub days_until_expiry: Option<i64>,
    pub expiry_status: ExpiryStatus,
}

/// Full API shape of a single seasoning.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeasoningDto {
    #[serde(flatten)]
    pub item: SeasoningListItemDto,
    pub created_at: String,
    pub updated_at: String,
}

/// Render an instant the way JavaScript's `toISOString` does
/// (millisecond precision, `Z` suffix).
pub fn to_iso_string(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_iso_string(value: &str) -> Result<DateTime<Utc>, DomainError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DomainError::Validation(format!("Invalid ISO-8601 date '{value}': {e}")))
}

/// Project an entity onto a list item, computing expiry against `as_of`.
pub fn to_list_item(seasoning: &Seasoning, as_of: DateTime<Utc>) -> SeasoningListItem {
    let expiry = seasoning.expiry_status(as_of);
    SeasoningListItem {
        id: seasoning.id(),
        name: seasoning.name().to_string(),
        type_id: seasoning.type_id(),
        image_id: seasoning.image_id(),
        best_before_at: seasoning.best_before_at(),
        expires_at: seasoning.expires_at(),
        purchased_at: seasoning.purchased_at(),
        days_until_expiry: expiry.days_until_expiry,
        expiry_status: expiry.status,
    }
}

pub fn to_list_item_dto(seasoning: &Seasoning, as_of: DateTime<Utc>) -> SeasoningListItemDto {
    SeasoningListItemDto::from(&to_list_item(seasoning, as_of))
}

pub fn to_seasoning_dto(seasoning: &Seasoning, as_of: DateTime<Utc>) -> SeasoningDto {
    SeasoningDto {
        item: to_list_item_dto(seasoning, as_of),
        created_at: to_iso_string(seasoning.created_at()),
        updated_at: to_iso_string(seasoning.updated_at()),
    }
}

impl From<&SeasoningListItem> for SeasoningListItemDto {
    fn from(item: &SeasoningListItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            type_id: item.type_id,
            image_id: item.image_id,
            best_before_at: item.best_before_at.map(to_iso_string),
            expires_at: item.expires_at.map(to_iso_string),
            purchased_at: item.purchased_at.map(to_iso_string),
            days_until_expiry: item.days_until_expiry,
            expiry_status: item.expiry_status,
        }
    }
}

impl TryFrom<SeasoningListItemDto> for SeasoningListItem {
    type Error = DomainError;

    /// Parses the dates back. The status is re-derived from the day count so
    /// a tampered `expiryStatus` cannot contradict it.
    fn try_from(dto: SeasoningListItemDto) -> Result<Self, Self::Error> {
        let parse = |value: Option<String>| value.as_deref().map(parse_iso_string).transpose();
        Ok(Self {
            id: dto.id,
            name: dto.name,
            type_id: dto.type_id,
            image_id: dto.image_id,
            best_before_at: parse(dto.best_before_at)?,
            expires_at: parse(dto.expires_at)?,
            purchased_at: parse(dto.purchased_at)?,
            days_until_expiry: dto.days_until_expiry,
            expiry_status: dto
                .days_until_expiry
                .map_or(ExpiryStatus::Unknown, expiry_status_from),
        })
    }
}
