use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use common_auth::{AdminRole, AuthError, UserRole};

/// Failures surfaced by record-store collaborators.
///
/// Transient transport failures are never retried here; they propagate to
/// the caller as [`AuthError::Store`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record violates a uniqueness constraint")]
    Conflict,
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for AuthError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Conflict => AuthError::DuplicateIdentity,
            StoreError::Unavailable(message) => AuthError::Store(message),
        }
    }
}

/// Stored reader/writer account.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub email: Option<String>,
    pub email_verified: bool,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// Stored publisher house account. Email is the unique identity key.
#[derive(Debug, Clone)]
pub struct PublisherRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Stored administrator account. Username and email are both unique.
#[derive(Debug, Clone)]
pub struct AdminRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: AdminRole,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError>;
    async fn insert(&self, record: UserRecord) -> Result<UserRecord, StoreError>;
    async fn update_role(&self, id: Uuid, role: UserRole)
        -> Result<Option<UserRecord>, StoreError>;
}

#[async_trait]
pub trait PublisherStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<PublisherRecord>, StoreError>;
    async fn insert(&self, record: PublisherRecord) -> Result<PublisherRecord, StoreError>;
}

#[async_trait]
pub trait AdminStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminRecord>, StoreError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<AdminRecord>, StoreError>;
    async fn insert(&self, record: AdminRecord) -> Result<AdminRecord, StoreError>;
}
