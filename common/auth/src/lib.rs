pub mod claims;
pub mod codec;
pub mod config;
pub mod error;
pub mod guard;
pub mod roles;

pub use claims::{AdminClaims, ClaimSet, PrincipalKind, PublisherClaims, UserClaims};
pub use codec::{IssuedToken, Principal, TokenCodec};
pub use config::TokenConfig;
pub use error::{AuthError, AuthResult};
pub use guard::{authorize, AccessRequirement};
pub use roles::{AdminPermissions, AdminRole, Capability, UserRole};
