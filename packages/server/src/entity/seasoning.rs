use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "seasoning")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    pub type_id: i32,
    #[sea_orm(belongs_to, from = "type_id", to = "id")]
    pub seasoning_type: HasOne<super::seasoning_type::Entity>,

    /// Opaque reference to an uploaded image; not resolved here.
    pub image_id: Option<i32>,

    pub best_before_at: Option<DateTimeUtc>,
    pub expires_at: Option<DateTimeUtc>,
    pub purchased_at: Option<DateTimeUtc>,

    #[sea_orm(has_many, via = "template_seasoning")]
    pub templates: HasMany<super::seasoning_template::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
