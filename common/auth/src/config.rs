/// Runtime configuration for token signing and verification.
///
/// Constructed explicitly and passed into [`crate::TokenCodec`]; there is
/// no implicit global lookup, so test suites can inject ephemeral keys.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Symmetric HS256 signing secret, shared process-wide. Rotating it
    /// invalidates all outstanding tokens.
    pub secret: String,
    /// Lifetime applied to newly issued tokens.
    pub ttl_minutes: i64,
    /// Allowable clock skew in seconds when validating exp.
    pub leeway_seconds: u64,
}

impl TokenConfig {
    /// Construct config with the default 90 minute lifetime and no leeway.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ttl_minutes: 90,
            leeway_seconds: 0,
        }
    }

    pub fn with_ttl_minutes(mut self, minutes: i64) -> Self {
        self.ttl_minutes = minutes;
        self
    }

    /// Adjust the allowed leeway.
    pub fn with_leeway(mut self, seconds: u64) -> Self {
        self.leeway_seconds = seconds;
        self
    }
}
