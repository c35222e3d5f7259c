use std::sync::Arc;

use tracing::warn;

use common_auth::{AuthError, AuthResult, ClaimSet, Principal, PrincipalKind, TokenCodec, UserRole};

use crate::publisher::PublisherResolver;
use crate::user::UserResolver;

/// The login surface shared by users and publisher houses.
///
/// Admin identities are refused here outright; admins authenticate through
/// their own resolver only.
pub struct UnifiedDispatcher {
    users: Arc<UserResolver>,
    publishers: Arc<PublisherResolver>,
    codec: TokenCodec,
}

impl UnifiedDispatcher {
    pub fn new(
        users: Arc<UserResolver>,
        publishers: Arc<PublisherResolver>,
        codec: TokenCodec,
    ) -> Self {
        Self {
            users,
            publishers,
            codec,
        }
    }

    /// Attempt the user resolver first, then the publisher resolver with the
    /// identifier as email. The order is a compatibility policy, not a
    /// correctness requirement. Both misses collapse into one generic
    /// `InvalidCredentials` so callers cannot tell which resolver almost
    /// matched.
    pub async fn login(&self, identifier: &str, password: &str) -> AuthResult<ClaimSet> {
        match self.users.login(identifier, password).await {
            Ok(claims) => return Ok(claims),
            Err(AuthError::InvalidCredentials) => {}
            Err(other) => return Err(other),
        }

        match self.publishers.login(identifier, password).await {
            Ok(claims) => Ok(claims),
            Err(AuthError::InvalidCredentials) => {
                warn!("unified login failed for both principal kinds");
                Err(AuthError::InvalidCredentials)
            }
            Err(other) => Err(other),
        }
    }

    /// Call the named resolver directly, skipping the probe order.
    pub async fn login_as(
        &self,
        kind: PrincipalKind,
        identifier: &str,
        password: &str,
    ) -> AuthResult<ClaimSet> {
        match kind {
            PrincipalKind::Reader => {
                self.users
                    .login_as(identifier, password, UserRole::Reader)
                    .await
            }
            PrincipalKind::Writer => {
                self.users
                    .login_as(identifier, password, UserRole::Writer)
                    .await
            }
            PrincipalKind::Publisher => self.publishers.login(identifier, password).await,
            PrincipalKind::Admin => Err(AuthError::UnsupportedKind),
        }
    }

    /// Verify an inbound bearer token and reject admin-shaped claims.
    ///
    /// The rejection is unconditional: an admin token is refused here even
    /// when the codec itself accepts it as perfectly valid.
    pub fn resolve_identity(&self, token: &str) -> AuthResult<Principal> {
        let principal = self.codec.verify(token)?;

        if matches!(principal.claims, ClaimSet::Admin(_)) {
            warn!("admin token presented on the unified surface");
            return Err(AuthError::AdminNotAllowed);
        }

        Ok(principal)
    }
}
