use sea_orm::sea_query::{Index, OnConflict};
use sea_orm::*;
use tracing::{info, warn};

use crate::entity::{seasoning, seasoning_type, template_seasoning};

/// Seasoning types seeded on startup, in id order for a fresh database.
pub const DEFAULT_SEASONING_TYPES: &[&str] = &[
    "Salt",
    "Sugar",
    "Soy Sauce",
    "Vinegar",
    "Miso",
    "Oil",
    "Spice",
    "Other",
];

/// Seed the `seasoning_type` table with defaults. Existing names are kept.
pub async fn seed_seasoning_types(db: &DatabaseConnection) -> Result<(), DbErr> {
    let mut inserted = 0u64;
    for &name in DEFAULT_SEASONING_TYPES {
        let model = seasoning_type::ActiveModel {
            name: Set(name.to_string()),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let result = seasoning_type::Entity::insert(model)
            .on_conflict(
                OnConflict::column(seasoning_type::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(rows) => inserted += rows,
            Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if inserted > 0 {
        info!("Seeded {} new seasoning types", inserted);
    }

    Ok(())
}

/// Ensure secondary indexes used by the listing and template lookups exist.
///
/// Schema sync only creates primary keys and unique constraints, so these
/// are created manually on startup. Failures are logged, not fatal.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();

    let indexes = [
        (
            "idx_seasoning_type_id",
            Index::create()
                .if_not_exists()
                .name("idx_seasoning_type_id")
                .table(seasoning::Entity)
                .col(seasoning::Column::TypeId)
                .to_owned(),
        ),
        (
            "idx_template_seasoning_seasoning_id",
            Index::create()
                .if_not_exists()
                .name("idx_template_seasoning_seasoning_id")
                .table(template_seasoning::Entity)
                .col(template_seasoning::Column::SeasoningId)
                .to_owned(),
        ),
    ];

    for (name, stmt) in indexes {
        match db.execute_raw(backend.build(&stmt)).await {
            Ok(_) => info!("Ensured index {} exists", name),
            Err(e) => warn!("Failed to create index {}: {}", name, e),
        }
    }

    Ok(())
}
