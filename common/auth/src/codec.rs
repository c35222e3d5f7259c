use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::claims::{ClaimSet, PrincipalKind};
use crate::config::TokenConfig;
use crate::error::{AuthError, AuthResult};

/// A freshly signed bearer token together with its validity window.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// The verified view of a bearer token: the claim set plus the timestamps
/// recovered from the wire envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub claims: ClaimSet,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Principal {
    pub fn kind(&self) -> PrincipalKind {
        self.claims.kind()
    }
}

#[derive(Serialize, Deserialize)]
struct WireClaims {
    #[serde(flatten)]
    body: ClaimSet,
    iat: i64,
    exp: i64,
}

/// Signs claim sets into opaque bearer tokens and verifies them back.
///
/// Holds the process-wide symmetric secret. Verification is all-or-nothing:
/// no claim field leaves this type before the signature and expiry checks
/// have passed.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
    leeway_seconds: u64,
}

impl TokenCodec {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl: Duration::minutes(config.ttl_minutes),
            leeway_seconds: config.leeway_seconds,
        }
    }

    /// Sign `claims` with the configured lifetime.
    pub fn issue(&self, claims: &ClaimSet) -> AuthResult<IssuedToken> {
        self.issue_with_ttl(claims, self.ttl)
    }

    /// Sign `claims` with an explicit lifetime. Tokens embed their issuance
    /// time, so two issuances of the same claims at different instants
    /// yield different strings.
    pub fn issue_with_ttl(&self, claims: &ClaimSet, ttl: Duration) -> AuthResult<IssuedToken> {
        let issued_at = Utc::now();
        let expires_at = issued_at + ttl;

        let wire = WireClaims {
            body: claims.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &wire, &self.encoding_key)?;

        debug!(kind = ?claims.kind(), "issued bearer token");
        Ok(IssuedToken {
            token,
            issued_at,
            expires_at,
        })
    }

    /// Validate the signature and expiry of `token`, then decode its claim
    /// set. Fails with `InvalidSignature`, `Expired`, or `Malformed`.
    pub fn verify(&self, token: &str) -> AuthResult<Principal> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway_seconds;

        let data = decode::<WireClaims>(token, &self.decoding_key, &validation)?;
        let issued_at = Utc
            .timestamp_opt(data.claims.iat, 0)
            .single()
            .ok_or(AuthError::Malformed)?;
        let expires_at = Utc
            .timestamp_opt(data.claims.exp, 0)
            .single()
            .ok_or(AuthError::Malformed)?;

        debug!(kind = ?data.claims.body.kind(), "verified bearer token");
        Ok(Principal {
            claims: data.claims.body,
            issued_at,
            expires_at,
        })
    }
}
