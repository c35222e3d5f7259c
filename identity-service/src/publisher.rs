use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use common_auth::{AuthError, AuthResult, ClaimSet, PublisherClaims};

use crate::password::{hash_password, verify_password};
use crate::store::{PublisherRecord, PublisherStore};

/// Registration input for a publisher house. Email is the unique key.
#[derive(Debug, Clone)]
pub struct NewPublisher {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Turns publisher house registration and login input into publisher
/// claim sets.
pub struct PublisherResolver {
    store: Arc<dyn PublisherStore>,
}

impl PublisherResolver {
    pub fn new(store: Arc<dyn PublisherStore>) -> Self {
        Self { store }
    }

    pub async fn register(&self, new_publisher: NewPublisher) -> AuthResult<ClaimSet> {
        if self
            .store
            .find_by_email(&new_publisher.email)
            .await?
            .is_some()
        {
            return Err(AuthError::DuplicateIdentity);
        }

        let password_hash = hash_password(&new_publisher.password)?;
        let record = self
            .store
            .insert(PublisherRecord {
                id: Uuid::new_v4(),
                name: new_publisher.name,
                email: new_publisher.email,
                password_hash,
                created_at: Utc::now(),
            })
            .await?;

        debug!(publisher_house_id = %record.id, "registered publisher house");
        claims_for(&record)
    }

    pub async fn login(&self, email: &str, password: &str) -> AuthResult<ClaimSet> {
        let record = match self.store.find_by_email(email).await? {
            Some(record) => record,
            None => return Err(AuthError::InvalidCredentials),
        };

        if !verify_password(password, &record.password_hash) {
            warn!(publisher_house_id = %record.id, "login attempt with bad password");
            return Err(AuthError::InvalidCredentials);
        }

        claims_for(&record)
    }
}

fn claims_for(record: &PublisherRecord) -> AuthResult<ClaimSet> {
    Ok(ClaimSet::Publisher(PublisherClaims::new(
        record.id,
        &record.name,
        &record.email,
    )?))
}
