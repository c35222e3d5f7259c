use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use common_auth::{AuthError, AuthResult, ClaimSet, UserClaims, UserRole};

use crate::otp::{generate_code, OtpChannel};
use crate::password::{hash_password, verify_password};
use crate::store::{UserRecord, UserStore};

/// Registration input for a reader/writer account.
///
/// When `email` is present the registration is OTP-gated: `otp` must carry
/// the code previously sent to that address, and the stored record is
/// marked email-verified.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub full_name: String,
    pub password: String,
    pub role: UserRole,
    pub email: Option<String>,
    pub otp: Option<String>,
}

/// Turns reader/writer registration and login input into user claim sets.
pub struct UserResolver {
    store: Arc<dyn UserStore>,
    otp: Arc<dyn OtpChannel>,
    otp_ttl: Duration,
}

impl UserResolver {
    pub fn new(store: Arc<dyn UserStore>, otp: Arc<dyn OtpChannel>, otp_ttl: Duration) -> Self {
        Self {
            store,
            otp,
            otp_ttl,
        }
    }

    pub async fn register(&self, new_user: NewUser) -> AuthResult<ClaimSet> {
        if self
            .store
            .find_by_username(&new_user.username)
            .await?
            .is_some()
        {
            return Err(AuthError::DuplicateIdentity);
        }

        let email_verified = match (&new_user.email, &new_user.otp) {
            (Some(email), Some(code)) => {
                self.verify_otp(email, code).await?;
                true
            }
            (Some(_), None) => return Err(AuthError::InvalidOtp),
            (None, _) => false,
        };

        let password_hash = hash_password(&new_user.password)?;
        let record = self
            .store
            .insert(UserRecord {
                id: Uuid::new_v4(),
                username: new_user.username,
                full_name: new_user.full_name,
                email: new_user.email,
                email_verified,
                password_hash,
                role: new_user.role,
                created_at: Utc::now(),
            })
            .await?;

        debug!(user_id = %record.id, role = record.role.as_str(), "registered user");
        Ok(claims_for(&record))
    }

    pub async fn login(&self, username: &str, password: &str) -> AuthResult<ClaimSet> {
        let record = self.authenticate(username, password).await?;
        Ok(claims_for(&record))
    }

    /// Login against a role-specific surface: correct credentials with the
    /// other role fail with `RoleMismatch`.
    pub async fn login_as(
        &self,
        username: &str,
        password: &str,
        expected: UserRole,
    ) -> AuthResult<ClaimSet> {
        let record = self.authenticate(username, password).await?;
        if record.role != expected {
            warn!(user_id = %record.id, "role-specific login with mismatched role");
            return Err(AuthError::RoleMismatch);
        }
        Ok(claims_for(&record))
    }

    /// Readers may promote themselves to writers; the new role is persisted
    /// and reflected in the returned claims.
    pub async fn promote_to_writer(&self, user_id: Uuid) -> AuthResult<ClaimSet> {
        let record = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;
        if record.role != UserRole::Reader {
            return Err(AuthError::RoleMismatch);
        }

        let updated = self
            .store
            .update_role(user_id, UserRole::Writer)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        debug!(user_id = %updated.id, "promoted reader to writer");
        Ok(claims_for(&updated))
    }

    /// Generate a fresh code for `target` and hand it to the delivery
    /// channel. Re-sending replaces any outstanding code.
    pub async fn send_otp(&self, target: &str) -> AuthResult<()> {
        let code = generate_code();
        let expires_at = Utc::now() + self.otp_ttl;
        self.otp.send(target, &code, expires_at).await?;

        debug!(target, "one-time code issued");
        Ok(())
    }

    /// Codes are single-use: consumed on success and on expiry. A mismatch
    /// leaves the stored code in place for another attempt.
    pub async fn verify_otp(&self, target: &str, code: &str) -> AuthResult<()> {
        let entry = match self.otp.stored(target).await? {
            Some(entry) => entry,
            None => return Err(AuthError::InvalidOtp),
        };

        if entry.expires_at <= Utc::now() {
            self.otp.discard(target).await?;
            return Err(AuthError::InvalidOtp);
        }

        if entry.code != code {
            return Err(AuthError::InvalidOtp);
        }

        self.otp.discard(target).await?;
        Ok(())
    }

    async fn authenticate(&self, username: &str, password: &str) -> AuthResult<UserRecord> {
        let record = match self.store.find_by_username(username).await? {
            Some(record) => record,
            None => return Err(AuthError::InvalidCredentials),
        };

        if !verify_password(password, &record.password_hash) {
            warn!(user_id = %record.id, "login attempt with bad password");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(record)
    }
}

fn claims_for(record: &UserRecord) -> ClaimSet {
    ClaimSet::User(UserClaims::new(record.id, record.role))
}
