// Password hashing and verification

use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::auth::error::AuthError;

// Fixed work factor: 19 MiB memory, 2 iterations, 1 lane
const MEMORY_COST_KIB: u32 = 19_456;
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;

// Stands in for a stored hash when the login email is unknown
const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-accounts";

/// Password service for hashing and verification
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordService;

impl PasswordService {
    pub fn new() -> Self {
        Self
    }

    fn argon2() -> Result<Argon2<'static>, AuthError> {
        let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, None)
            .map_err(|_| AuthError::PasswordHashError)?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    /// Hash a password with a fresh random salt. Returns a PHC-format string.
    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Self::argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| AuthError::PasswordHashError)
    }

    /// Verify a password against a stored hash.
    ///
    /// Comparison happens inside argon2 in constant time. A stored value that
    /// is not a parseable hash never verifies.
    pub fn verify_password(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            tracing::warn!("Stored password hash could not be parsed");
            return false;
        };
        match Self::argon2() {
            Ok(argon2) => argon2.verify_password(password.as_bytes(), &parsed).is_ok(),
            Err(_) => false,
        }
    }

    /// Run a full verification against a fixed hash and report failure.
    ///
    /// Used when no account matches, so the unknown-email path costs the same
    /// argon2 work as a wrong password.
    pub fn verify_missing(&self, password: &str) -> bool {
        if let Some(hash) = self.dummy_hash() {
            let _ = self.verify_password(password, hash);
        }
        false
    }

    fn dummy_hash(&self) -> Option<&'static str> {
        static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();
        DUMMY_HASH
            .get_or_init(|| match self.hash_password(DUMMY_PASSWORD) {
                Ok(hash) => Some(hash),
                Err(e) => {
                    tracing::error!("Failed to build dummy password hash: {}", e);
                    None
                }
            })
            .as_deref()
    }
}
