use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::error::DomainError;
use crate::seasoning::{Seasoning, SeasoningProps, validate_name, validate_type_id};

/// Narrowing applied to a bulk read.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeasoningCriteria {
    pub type_id: Option<i32>,
}

/// Fields of a seasoning that does not have an id yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewSeasoning {
    pub name: String,
    pub type_id: i32,
    pub image_id: Option<i32>,
    pub best_before_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub purchased_at: Option<DateTime<Utc>>,
}

impl NewSeasoning {
    /// Check invariants and trim the name in place.
    pub fn validate(mut self) -> Result<Self, DomainError> {
        self.name = validate_name("Name", &self.name)?;
        validate_type_id(self.type_id)?;
        Ok(self)
    }
}

/// Partial update. For nullable fields, `Some(None)` clears the value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeasoningChanges {
    pub name: Option<String>,
    pub type_id: Option<i32>,
    pub image_id: Option<Option<i32>>,
    pub best_before_at: Option<Option<DateTime<Utc>>>,
    pub expires_at: Option<Option<DateTime<Utc>>>,
    pub purchased_at: Option<Option<DateTime<Utc>>>,
}

impl SeasoningChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(mut self) -> Result<Self, DomainError> {
        if let Some(ref name) = self.name {
            self.name = Some(validate_name("Name", name)?);
        }
        if let Some(type_id) = self.type_id {
            validate_type_id(type_id)?;
        }
        Ok(self)
    }

    /// Build the updated entity, stamping `updated_at` with `now`.
    pub fn apply_to(&self, seasoning: &Seasoning, now: DateTime<Utc>) -> Result<Seasoning, DomainError> {
        let mut props = seasoning.to_props();
        if let Some(ref name) = self.name {
            props.name = name.clone();
        }
        if let Some(type_id) = self.type_id {
            props.type_id = type_id;
        }
        if let Some(image_id) = self.image_id {
            props.image_id = image_id;
        }
        if let Some(best_before_at) = self.best_before_at {
            props.best_before_at = best_before_at;
        }
        if let Some(expires_at) = self.expires_at {
            props.expires_at = expires_at;
        }
        if let Some(purchased_at) = self.purchased_at {
            props.purchased_at = purchased_at;
        }
        props.updated_at = now;
        Seasoning::new(props)
    }
}

/// Storage port for seasonings. One adapter per backend.
#[async_trait]
pub trait SeasoningRepository: Send + Sync {
    /// All seasonings matching `criteria`, ordered by id.
    async fn find_all(&self, criteria: &SeasoningCriteria) -> Result<Vec<Seasoning>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Seasoning>, DomainError>;

    /// Seasonings whose id is in `ids`, ordered by id. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Seasoning>, DomainError>;

    async fn create(&self, seasoning: NewSeasoning) -> Result<Seasoning, DomainError>;

    /// Returns `None` if no seasoning has this id.
    async fn update(
        &self,
        id: i32,
        changes: SeasoningChanges,
    ) -> Result<Option<Seasoning>, DomainError>;

    /// Returns `false` if no seasoning has this id.
    async fn delete(&self, id: i32) -> Result<bool, DomainError>;
}

/// Process-local seasoning store. Construct one per test or per embedding;
/// instances never share state.
#[derive(Debug)]
pub struct InMemorySeasoningRepository {
    seasonings: DashMap<i32, Seasoning>,
    next_id: AtomicI64,
}

impl Default for InMemorySeasoningRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySeasoningRepository {
    pub fn new() -> Self {
        Self {
            seasonings: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Pre-populate with existing entities. Later inserts get ids past the
    /// highest one given.
    pub fn with_seasonings(seasonings: impl IntoIterator<Item = Seasoning>) -> Self {
        let repo = Self::new();
        for seasoning in seasonings {
            repo.next_id.fetch_max(i64::from(seasoning.id()) + 1, Ordering::Relaxed);
            repo.seasonings.insert(seasoning.id(), seasoning);
        }
        repo
    }

    pub fn len(&self) -> usize {
        self.seasonings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seasonings.is_empty()
    }

    fn sorted(&self, keep: impl Fn(&Seasoning) -> bool) -> Vec<Seasoning> {
        let mut found: Vec<Seasoning> = self
            .seasonings
            .iter()
            .filter(|entry| keep(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        found.sort_by_key(Seasoning::id);
        found
    }
}

#[async_trait]
impl SeasoningRepository for InMemorySeasoningRepository {
    async fn find_all(&self, criteria: &SeasoningCriteria) -> Result<Vec<Seasoning>, DomainError> {
        Ok(self.sorted(|s| criteria.type_id.is_none_or(|type_id| s.type_id() == type_id)))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Seasoning>, DomainError> {
        Ok(self.seasonings.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Seasoning>, DomainError> {
        Ok(self.sorted(|s| ids.contains(&s.id())))
    }

    async fn create(&self, seasoning: NewSeasoning) -> Result<Seasoning, DomainError> {
        let seasoning = seasoning.validate()?;
        let now = Utc::now();
        let id = i32::try_from(self.next_id.fetch_add(1, Ordering::Relaxed))
            .map_err(|_| DomainError::Storage("seasoning id space exhausted".into()))?;
        let created = Seasoning::new(SeasoningProps {
            id,
            name: seasoning.name,
            type_id: seasoning.type_id,
            image_id: seasoning.image_id,
            best_before_at: seasoning.best_before_at,
            expires_at: seasoning.expires_at,
            purchased_at: seasoning.purchased_at,
            created_at: now,
            updated_at: now,
        })?;
        self.seasonings.insert(id, created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: i32,
        changes: SeasoningChanges,
    ) -> Result<Option<Seasoning>, DomainError> {
        let changes = changes.validate()?;
        let Some(mut entry) = self.seasonings.get_mut(&id) else {
            return Ok(None);
        };
        let updated = changes.apply_to(entry.value(), Utc::now())?;
        *entry.value_mut() = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        Ok(self.seasonings.remove(&id).is_some())
    }
}
