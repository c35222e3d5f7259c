use anyhow::{anyhow, Context, Result};
use chrono::Duration;
use std::env;

use common_auth::TokenConfig;

const DEFAULT_TOKEN_TTL_MINUTES: i64 = 90;
const DEFAULT_OTP_TTL_MINUTES: i64 = 5;

/// Process configuration for the identity core.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    pub token: TokenConfig,
    pub admin_registration_code: String,
    pub otp_ttl: Duration,
}

/// Load configuration from the environment. Test suites bypass this and
/// build [`IdentityConfig`] directly with ephemeral keys.
pub fn load_identity_config() -> Result<IdentityConfig> {
    let secret = env::var("IDENTITY_SECRET_KEY").context("IDENTITY_SECRET_KEY must be set")?;
    if secret.trim().is_empty() {
        return Err(anyhow!("IDENTITY_SECRET_KEY must not be empty"));
    }

    let admin_registration_code = env::var("IDENTITY_ADMIN_REGISTRATION_CODE")
        .context("IDENTITY_ADMIN_REGISTRATION_CODE must be set")?;

    let ttl_minutes =
        minutes_from_env("IDENTITY_TOKEN_TTL_MINUTES")?.unwrap_or(DEFAULT_TOKEN_TTL_MINUTES);
    let otp_ttl_minutes =
        minutes_from_env("IDENTITY_OTP_TTL_MINUTES")?.unwrap_or(DEFAULT_OTP_TTL_MINUTES);

    Ok(IdentityConfig {
        token: TokenConfig::new(secret).with_ttl_minutes(ttl_minutes),
        admin_registration_code,
        otp_ttl: Duration::minutes(otp_ttl_minutes),
    })
}

fn minutes_from_env(key: &str) -> Result<Option<i64>> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(None),
    };

    let minutes = value
        .trim()
        .parse::<i64>()
        .map_err(|err| anyhow!("Invalid {key} '{value}': {err}"))?;
    if minutes <= 0 {
        return Err(anyhow!("{key} must be positive"));
    }
    Ok(Some(minutes))
}
