use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

/// Failure taxonomy shared by the codec, the resolvers, and the guard.
///
/// Login failures are deliberately collapsed into the single
/// [`AuthError::InvalidCredentials`] shape so callers cannot distinguish an
/// unknown identity from a wrong password.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("identity already registered")]
    DuplicateIdentity,
    #[error("credentials do not carry the requested role")]
    RoleMismatch,
    #[error("invalid admin registration code")]
    InvalidRegistrationCode,
    #[error("malformed claims: missing or empty '{0}'")]
    MalformedClaims(&'static str),
    #[error("token signature verification failed")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
    #[error("token is structurally malformed")]
    Malformed,
    #[error("admin tokens are not accepted on the unified surface")]
    AdminNotAllowed,
    #[error("insufficient privileges for the requested operation")]
    Forbidden,
    #[error("principal kind not supported by this entry point")]
    UnsupportedKind,
    #[error("invalid or expired one-time code")]
    InvalidOtp,
    #[error("credential hashing failed: {0}")]
    Hashing(String),
    #[error("record store failure: {0}")]
    Store(String),
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(value: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match value.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            _ => AuthError::Malformed,
        }
    }
}
