use thiserror::Error;

/// Boxed error raised by a storage backend.
pub type StorageSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced by the seasoning domain and its repository port.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An entity or query violated one of its invariants.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A single-item lookup found nothing.
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i32 },

    /// A uniquely-named resource already exists.
    #[error("{0} already exists")]
    Duplicate(String),

    /// The storage backend failed. The original error is kept as the source.
    #[error("Storage error: {0}")]
    Storage(#[source] StorageSource),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage(Box::new(err))
    }
}
