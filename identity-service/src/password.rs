use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand_core::OsRng;

use common_auth::{AuthError, AuthResult};

/// Hash a plaintext password into a salted argon2id PHC string.
///
/// The work factor is argon2's fixed default, so a flood of registrations
/// or logins degrades throughput predictably.
pub fn hash_password(password: &str) -> AuthResult<String> {
    if password.trim().is_empty() {
        return Err(AuthError::MalformedClaims("password"));
    }

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| AuthError::Hashing(err.to_string()))
}

/// Verify a plaintext against a stored digest.
///
/// Fails closed: a malformed digest yields `false` rather than an error so
/// login failure paths stay uniform.
pub fn verify_password(password: &str, digest: &str) -> bool {
    match PasswordHash::new(digest) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashing_salts_every_call() {
        let first = hash_password("pw123456").unwrap();
        let second = hash_password("pw123456").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("pw123456", &first));
        assert!(verify_password("pw123456", &second));
    }

    #[test]
    fn wrong_password_fails() {
        let digest = hash_password("pw123456").unwrap();
        assert!(!verify_password("pw654321", &digest));
    }

    #[test]
    fn malformed_digest_fails_closed() {
        assert!(!verify_password("pw123456", "not-a-phc-string"));
        assert!(!verify_password("pw123456", ""));
    }

    #[test]
    fn empty_password_is_rejected() {
        let err = hash_password("   ").unwrap_err();
        assert!(matches!(err, AuthError::MalformedClaims("password")));
    }
}
