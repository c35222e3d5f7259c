use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand_core::{OsRng, RngCore};

use crate::store::StoreError;

/// A one-time code held by the delivery collaborator.
#[derive(Debug, Clone)]
pub struct OtpEntry {
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

/// Delivery and short-term persistence of one-time codes.
///
/// The channel owns sending and storage; validation timing (expiry,
/// single use) stays with the user resolver.
#[async_trait]
pub trait OtpChannel: Send + Sync {
    async fn send(
        &self,
        target: &str,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;
    async fn stored(&self, target: &str) -> Result<Option<OtpEntry>, StoreError>;
    async fn discard(&self, target: &str) -> Result<(), StoreError>;
}

/// Six decimal digits, leading zeros allowed.
pub(crate) fn generate_code() -> String {
    let value = OsRng.next_u32() % 1_000_000;
    format!("{value:06}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_six_digits() {
        for _ in 0..32 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|ch| ch.is_ascii_digit()));
        }
    }
}
