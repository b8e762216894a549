use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::expiry::{self, ExpiryInfo};

/// Maximum length of a seasoning or template name, in Unicode characters
/// after trimming.
pub const SEASONING_NAME_MAX_LENGTH: usize = 256;

/// Raw fields a [`Seasoning`] is built from, as read from storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeasoningProps {
    pub id: i32,
    pub name: String,
    pub type_id: i32,
    pub image_id: Option<i32>,
    pub best_before_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub purchased_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A persisted seasoning. Fields cannot change after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Seasoning {
    id: i32,
    name: String,
    type_id: i32,
    image_id: Option<i32>,
    best_before_at: Option<DateTime<Utc>>,
    expires_at: Option<DateTime<Utc>>,
    purchased_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Seasoning {
    /// Validates `props` and builds the entity. The name is stored trimmed.
    pub fn new(props: SeasoningProps) -> Result<Self, DomainError> {
        if props.id <= 0 {
            return Err(DomainError::validation("Seasoning id must be positive"));
        }
        let name = validate_name("Name", &props.name)?;
        validate_type_id(props.type_id)?;

        Ok(Self {
            id: props.id,
            name,
            type_id: props.type_id,
            image_id: props.image_id,
            best_before_at: props.best_before_at,
            expires_at: props.expires_at,
            purchased_at: props.purchased_at,
            created_at: props.created_at,
            updated_at: props.updated_at,
        })
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_id(&self) -> i32 {
        self.type_id
    }

    pub fn image_id(&self) -> Option<i32> {
        self.image_id
    }

    pub fn best_before_at(&self) -> Option<DateTime<Utc>> {
        self.best_before_at
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn purchased_at(&self) -> Option<DateTime<Utc>> {
        self.purchased_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// `expires_at` when known, otherwise `best_before_at`.
    pub fn effective_expiry_date(&self) -> Option<DateTime<Utc>> {
        self.expires_at.or(self.best_before_at)
    }

    pub fn expiry_status(&self, as_of: DateTime<Utc>) -> ExpiryInfo {
        expiry::expiry_status(self.effective_expiry_date(), as_of)
    }

    pub fn days_until_expiry(&self, as_of: DateTime<Utc>) -> Option<i64> {
        self.effective_expiry_date()
            .map(|date| expiry::days_until_expiry(date, as_of))
    }

    /// Copies the fields back out, e.g. to derive an updated entity.
    pub fn to_props(&self) -> SeasoningProps {
        SeasoningProps {
            id: self.id,
            name: self.name.clone(),
            type_id: self.type_id,
            image_id: self.image_id,
            best_before_at: self.best_before_at,
            expires_at: self.expires_at,
            purchased_at: self.purchased_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Validate a name field (1..=[`SEASONING_NAME_MAX_LENGTH`] characters after
/// trimming) and return the trimmed value.
pub fn validate_name(field: &str, name: &str) -> Result<String, DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.chars().count() > SEASONING_NAME_MAX_LENGTH {
        return Err(DomainError::Validation(format!(
            "{field} must be 1-{SEASONING_NAME_MAX_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

pub fn validate_type_id(type_id: i32) -> Result<(), DomainError> {
    if type_id <= 0 {
        return Err(DomainError::validation("typeId must be a positive integer"));
    }
    Ok(())
}
