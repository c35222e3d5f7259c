use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AuthError, AuthResult};
use crate::roles::{AdminPermissions, AdminRole, UserRole};

/// Closed set of principal categories a verified token can represent.
///
/// Readers and writers are sub-roles of the `user` entity type; publisher
/// and admin are distinct entity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrincipalKind {
    Reader,
    Writer,
    Publisher,
    Admin,
}

/// Identity facts for a reader/writer account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaims {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl UserClaims {
    pub fn new(user_id: Uuid, role: UserRole) -> Self {
        Self { user_id, role }
    }
}

/// Identity facts for a publisher house account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublisherClaims {
    pub publisher_house_id: Uuid,
    pub name: String,
    pub email: String,
}

impl PublisherClaims {
    pub fn new(
        publisher_house_id: Uuid,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> AuthResult<Self> {
        let name = name.into();
        let email = email.into();
        if name.trim().is_empty() {
            return Err(AuthError::MalformedClaims("name"));
        }
        if email.trim().is_empty() {
            return Err(AuthError::MalformedClaims("email"));
        }
        Ok(Self {
            publisher_house_id,
            name,
            email,
        })
    }
}

/// Identity facts for an administrator account.
///
/// `is_super_admin` and `permissions` are derived from the role at
/// construction time; there is no way to issue an admin claim set whose
/// flags disagree with the permission matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminClaims {
    pub admin_id: Uuid,
    pub username: String,
    pub role: AdminRole,
    pub is_super_admin: bool,
    pub permissions: AdminPermissions,
}

impl AdminClaims {
    pub fn new(admin_id: Uuid, username: impl Into<String>, role: AdminRole) -> AuthResult<Self> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(AuthError::MalformedClaims("username"));
        }
        Ok(Self {
            admin_id,
            username,
            role,
            is_super_admin: role.is_super_admin(),
            permissions: AdminPermissions::for_role(role),
        })
    }
}

/// The signed payload, one shape per principal kind.
///
/// Serialized with `entity_type` as the discriminating tag, so each wire
/// payload carries exactly the fields of its kind's shape and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "entity_type", rename_all = "snake_case")]
pub enum ClaimSet {
    User(UserClaims),
    Publisher(PublisherClaims),
    Admin(AdminClaims),
}

impl ClaimSet {
    pub fn kind(&self) -> PrincipalKind {
        match self {
            ClaimSet::User(claims) => match claims.role {
                UserRole::Reader => PrincipalKind::Reader,
                UserRole::Writer => PrincipalKind::Writer,
            },
            ClaimSet::Publisher(_) => PrincipalKind::Publisher,
            ClaimSet::Admin(_) => PrincipalKind::Admin,
        }
    }
}
