use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "template_seasoning")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub template_id: i32,
    #[sea_orm(primary_key)]
    pub seasoning_id: i32,
    #[sea_orm(belongs_to, from = "template_id", to = "id")]
    pub template: HasOne<super::seasoning_template::Entity>,
    #[sea_orm(belongs_to, from = "seasoning_id", to = "id")]
    pub seasoning: HasOne<super::seasoning::Entity>,

    /// Order of the seasoning within its template.
    #[sea_orm(default_value = 0)]
    pub position: i32,
}

impl ActiveModelBehavior for ActiveModel {}
