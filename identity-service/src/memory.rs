use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use common_auth::UserRole;

use crate::otp::{OtpChannel, OtpEntry};
use crate::store::{
    AdminRecord, AdminStore, PublisherRecord, PublisherStore, StoreError, UserRecord, UserStore,
};

/// In-memory record store and OTP channel backing the test suites.
///
/// Enforces the same uniqueness constraints the real store must provide:
/// username (user), email (publisher), username+email (admin).
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, UserRecord>>,
    publishers: RwLock<HashMap<Uuid, PublisherRecord>>,
    admins: RwLock<HashMap<Uuid, AdminRecord>>,
    otps: RwLock<HashMap<String, OtpEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Codes are persisted but never delivered anywhere; tests read them
    /// back through this hook.
    pub fn stored_otp(&self, target: &str) -> Option<OtpEntry> {
        let guard = self.otps.read().expect("rwlock poisoned");
        guard.get(target).cloned()
    }

    /// Rewrite a stored code's expiry (test hook for the expiry paths).
    pub fn set_otp_expiry(&self, target: &str, expires_at: DateTime<Utc>) {
        let mut guard = self.otps.write().expect("rwlock poisoned");
        if let Some(entry) = guard.get_mut(target) {
            entry.expires_at = expires_at;
        }
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let guard = self.users.read().expect("rwlock poisoned");
        Ok(guard.values().find(|r| r.username == username).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        let guard = self.users.read().expect("rwlock poisoned");
        Ok(guard.get(&id).cloned())
    }

    async fn insert(&self, record: UserRecord) -> Result<UserRecord, StoreError> {
        let mut guard = self.users.write().expect("rwlock poisoned");
        if guard.values().any(|r| r.username == record.username) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_role(
        &self,
        id: Uuid,
        role: UserRole,
    ) -> Result<Option<UserRecord>, StoreError> {
        let mut guard = self.users.write().expect("rwlock poisoned");
        Ok(guard.get_mut(&id).map(|record| {
            record.role = role;
            record.clone()
        }))
    }
}

#[async_trait]
impl PublisherStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<PublisherRecord>, StoreError> {
        let guard = self.publishers.read().expect("rwlock poisoned");
        Ok(guard.values().find(|r| r.email == email).cloned())
    }

    async fn insert(&self, record: PublisherRecord) -> Result<PublisherRecord, StoreError> {
        let mut guard = self.publishers.write().expect("rwlock poisoned");
        if guard.values().any(|r| r.email == record.email) {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.id, record.clone());
        Ok(record)
    }
}

#[async_trait]
impl AdminStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminRecord>, StoreError> {
        let guard = self.admins.read().expect("rwlock poisoned");
        Ok(guard.values().find(|r| r.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<AdminRecord>, StoreError> {
        let guard = self.admins.read().expect("rwlock poisoned");
        Ok(guard.values().find(|r| r.email == email).cloned())
    }

    async fn insert(&self, record: AdminRecord) -> Result<AdminRecord, StoreError> {
        let mut guard = self.admins.write().expect("rwlock poisoned");
        if guard
            .values()
            .any(|r| r.username == record.username || r.email == record.email)
        {
            return Err(StoreError::Conflict);
        }
        guard.insert(record.id, record.clone());
        Ok(record)
    }
}

#[async_trait]
impl OtpChannel for MemoryStore {
    async fn send(
        &self,
        target: &str,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut guard = self.otps.write().expect("rwlock poisoned");
        guard.insert(
            target.to_string(),
            OtpEntry {
                code: code.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn stored(&self, target: &str) -> Result<Option<OtpEntry>, StoreError> {
        let guard = self.otps.read().expect("rwlock poisoned");
        Ok(guard.get(target).cloned())
    }

    async fn discard(&self, target: &str) -> Result<(), StoreError> {
        let mut guard = self.otps.write().expect("rwlock poisoned");
        guard.remove(target);
        Ok(())
    }
}
