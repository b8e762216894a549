//! SeaORM adapter for the seasoning repository port.

use async_trait::async_trait;
use common::repository::{NewSeasoning, SeasoningChanges, SeasoningCriteria};
use common::{DomainError, Seasoning, SeasoningProps, SeasoningRepository};
use sea_orm::*;

use crate::entity::{seasoning, template_seasoning};

pub struct SeaOrmSeasoningRepository {
    db: DatabaseConnection,
}

impl SeaOrmSeasoningRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn into_domain(model: seasoning::Model) -> Result<Seasoning, DomainError> {
    Seasoning::new(SeasoningProps {
        id: model.id,
        name: model.name,
        type_id: model.type_id,
        image_id: model.image_id,
        best_before_at: model.best_before_at,
        expires_at: model.expires_at,
        purchased_at: model.purchased_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn into_domain_all(models: Vec<seasoning::Model>) -> Result<Vec<Seasoning>, DomainError> {
    models.into_iter().map(into_domain).collect()
}

#[async_trait]
impl SeasoningRepository for SeaOrmSeasoningRepository {
    async fn find_all(&self, criteria: &SeasoningCriteria) -> Result<Vec<Seasoning>, DomainError> {
        let mut select = seasoning::Entity::find();
        if let Some(type_id) = criteria.type_id {
            select = select.filter(seasoning::Column::TypeId.eq(type_id));
        }
        let models = select
            .order_by_asc(seasoning::Column::Id)
            .all(&self.db)
            .await
            .map_err(DomainError::storage)?;
        into_domain_all(models)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Seasoning>, DomainError> {
        seasoning::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(DomainError::storage)?
            .map(into_domain)
            .transpose()
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Seasoning>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = seasoning::Entity::find()
            .filter(seasoning::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(seasoning::Column::Id)
            .all(&self.db)
            .await
            .map_err(DomainError::storage)?;
        into_domain_all(models)
    }

    async fn create(&self, new: NewSeasoning) -> Result<Seasoning, DomainError> {
        let new = new.validate()?;
        let now = chrono::Utc::now();
        let model = seasoning::ActiveModel {
            name: Set(new.name),
            type_id: Set(new.type_id),
            image_id: Set(new.image_id),
            best_before_at: Set(new.best_before_at),
            expires_at: Set(new.expires_at),
            purchased_at: Set(new.purchased_at),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(DomainError::storage)?;
        into_domain(model)
    }

    async fn update(
        &self,
        id: i32,
        changes: SeasoningChanges,
    ) -> Result<Option<Seasoning>, DomainError> {
        let changes = changes.validate()?;
        let txn = self.db.begin().await.map_err(DomainError::storage)?;

        let Some(existing) = seasoning::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(DomainError::storage)?
        else {
            return Ok(None);
        };

        // Validate the merged entity before touching the row.
        let updated = changes.apply_to(&into_domain(existing.clone())?, chrono::Utc::now())?;

        let mut active: seasoning::ActiveModel = existing.into();
        active.name = Set(updated.name().to_string());
        active.type_id = Set(updated.type_id());
        active.image_id = Set(updated.image_id());
        active.best_before_at = Set(updated.best_before_at());
        active.expires_at = Set(updated.expires_at());
        active.purchased_at = Set(updated.purchased_at());
        active.updated_at = Set(updated.updated_at());

        let model = active.update(&txn).await.map_err(DomainError::storage)?;
        txn.commit().await.map_err(DomainError::storage)?;

        into_domain(model).map(Some)
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let txn = self.db.begin().await.map_err(DomainError::storage)?;

        template_seasoning::Entity::delete_many()
            .filter(template_seasoning::Column::SeasoningId.eq(id))
            .exec(&txn)
            .await
            .map_err(DomainError::storage)?;
        let result = seasoning::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(DomainError::storage)?;

        txn.commit().await.map_err(DomainError::storage)?;
        Ok(result.rows_affected > 0)
    }
}
