use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use common_auth::{AdminClaims, AdminRole, AuthError, AuthResult, ClaimSet};

use crate::password::{hash_password, verify_password};
use crate::store::{AdminRecord, AdminStore};

/// Registration input for an administrator account.
///
/// There is deliberately no permissions field: capability flags are always
/// derived from `role` when the claims are built.
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: AdminRole,
}

/// Turns administrator registration and login input into admin claim sets.
pub struct AdminResolver {
    store: Arc<dyn AdminStore>,
    registration_code: String,
}

impl AdminResolver {
    pub fn new(store: Arc<dyn AdminStore>, registration_code: impl Into<String>) -> Self {
        Self {
            store,
            registration_code: registration_code.into(),
        }
    }

    /// The registration code gates the whole operation: it is checked before
    /// any store access so a bad code cannot be used to probe for existing
    /// admin usernames.
    pub async fn register(&self, new_admin: NewAdmin, supplied_code: &str) -> AuthResult<ClaimSet> {
        if supplied_code != self.registration_code {
            warn!("admin registration with invalid code");
            return Err(AuthError::InvalidRegistrationCode);
        }

        if self
            .store
            .find_by_username(&new_admin.username)
            .await?
            .is_some()
            || self.store.find_by_email(&new_admin.email).await?.is_some()
        {
            return Err(AuthError::DuplicateIdentity);
        }

        let password_hash = hash_password(&new_admin.password)?;
        let record = self
            .store
            .insert(AdminRecord {
                id: Uuid::new_v4(),
                username: new_admin.username,
                email: new_admin.email,
                password_hash,
                role: new_admin.role,
                created_at: Utc::now(),
            })
            .await?;

        debug!(admin_id = %record.id, role = record.role.as_str(), "registered admin");
        claims_for(&record)
    }

    pub async fn login(&self, username: &str, password: &str) -> AuthResult<ClaimSet> {
        let record = match self.store.find_by_username(username).await? {
            Some(record) => record,
            None => return Err(AuthError::InvalidCredentials),
        };

        if !verify_password(password, &record.password_hash) {
            warn!(admin_id = %record.id, "login attempt with bad password");
            return Err(AuthError::InvalidCredentials);
        }

        claims_for(&record)
    }
}

fn claims_for(record: &AdminRecord) -> AuthResult<ClaimSet> {
    Ok(ClaimSet::Admin(AdminClaims::new(
        record.id,
        &record.username,
        record.role,
    )?))
}
