use serde::{Deserialize, Serialize};

use crate::entity::seasoning_type;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateSeasoningTypeRequest {
    #[schema(example = "Mirin")]
    pub name: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SeasoningTypeResponse {
    #[schema(example = 3)]
    pub id: i32,
    #[schema(example = "Soy Sauce")]
    pub name: String,
}

impl From<seasoning_type::Model> for SeasoningTypeResponse {
    fn from(m: seasoning_type::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}
