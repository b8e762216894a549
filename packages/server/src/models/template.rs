use common::mapper::{SeasoningListItemDto, to_iso_string};
use common::pagination::PaginationMeta;
use common::seasoning::validate_name;
use serde::{Deserialize, Serialize};

use super::shared::validate_member_ids;
use crate::entity::seasoning_template;
use crate::error::AppError;

pub const DEFAULT_TEMPLATE_PAGE_SIZE: u64 = 10;
pub const MAX_TEMPLATE_SEASONINGS: usize = 100;
pub const TEMPLATE_DESCRIPTION_MAX_LENGTH: usize = 1000;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateRequest {
    #[schema(example = "Teriyaki")]
    pub name: String,
    pub description: Option<String>,
    /// Member seasonings in display order. Unique, at most 100.
    #[serde(default)]
    #[schema(example = json!([1, 2, 5]))]
    pub seasoning_ids: Vec<i32>,
}

impl CreateTemplateRequest {
    /// Trim text fields and check limits. A blank description becomes `None`.
    pub fn validate(mut self) -> Result<Self, AppError> {
        self.name = validate_name("Name", &self.name)?;
        self.description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        if let Some(ref d) = self.description
            && d.chars().count() > TEMPLATE_DESCRIPTION_MAX_LENGTH
        {
            return Err(AppError::Validation(format!(
                "Description must be at most {TEMPLATE_DESCRIPTION_MAX_LENGTH} characters"
            )));
        }
        validate_member_ids(&self.seasoning_ids, "seasoningIds", MAX_TEMPLATE_SEASONINGS)?;
        Ok(self)
    }
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TemplateListParams {
    /// Page number (1-based). Default: 1.
    pub page: Option<u64>,
    /// Items per page (1-100). Default: 10.
    pub page_size: Option<u64>,
    /// Case-insensitive substring of the template name.
    pub search: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TemplateListItem {
    pub id: i32,
    #[schema(example = "Teriyaki")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = 3)]
    pub seasoning_count: u64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TemplateListResponse {
    pub data: Vec<TemplateListItem>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDetail {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Members in template order, with expiry evaluated at request time.
    pub seasonings: Vec<SeasoningListItemDto>,
    pub created_at: String,
    pub updated_at: String,
}

impl TemplateListItem {
    pub fn new(m: seasoning_template::Model, seasoning_count: u64) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            seasoning_count,
            created_at: to_iso_string(m.created_at),
            updated_at: to_iso_string(m.updated_at),
        }
    }
}

impl TemplateDetail {
    pub fn new(m: seasoning_template::Model, seasonings: Vec<SeasoningListItemDto>) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            seasonings,
            created_at: to_iso_string(m.created_at),
            updated_at: to_iso_string(m.updated_at),
        }
    }
}
