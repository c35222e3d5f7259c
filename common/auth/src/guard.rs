use tracing::warn;

use crate::claims::{ClaimSet, PrincipalKind};
use crate::codec::{Principal, TokenCodec};
use crate::error::{AuthError, AuthResult};
use crate::roles::Capability;

/// What an endpoint demands of an inbound bearer token.
///
/// Capabilities only exist for admin tokens; requiring one denies every
/// other principal kind outright.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessRequirement {
    pub kind: Option<PrincipalKind>,
    pub capability: Option<Capability>,
}

impl AccessRequirement {
    /// Any verified principal is acceptable.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn of_kind(kind: PrincipalKind) -> Self {
        Self {
            kind: Some(kind),
            capability: None,
        }
    }

    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capability = Some(capability);
        self
    }
}

/// Verify `token` and check it against `required`, returning the active
/// principal for downstream use.
///
/// Stateless: every call re-verifies from scratch; no session state is
/// consulted or written.
pub fn authorize(
    codec: &TokenCodec,
    token: &str,
    required: &AccessRequirement,
) -> AuthResult<Principal> {
    let principal = codec.verify(token)?;

    if let Some(kind) = required.kind {
        if principal.kind() != kind {
            warn!(required = ?kind, actual = ?principal.kind(), "principal kind check failed");
            return Err(AuthError::Forbidden);
        }
    }

    if let Some(capability) = required.capability {
        let allowed = match &principal.claims {
            ClaimSet::Admin(admin) => admin.permissions.allows(capability),
            _ => false,
        };
        if !allowed {
            warn!(?capability, kind = ?principal.kind(), "capability check failed");
            return Err(AuthError::Forbidden);
        }
    }

    Ok(principal)
}
