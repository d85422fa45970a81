// Session token issuing and verification

use chrono::Utc;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::accounts::models::Account;
use crate::auth::{error::AuthError, models::Role};
use crate::config::SigningKey;

/// Session lifetime in seconds (1 hour)
pub const SESSION_TTL_SECONDS: i64 = 3600;

/// Claim set carried by the session token: the account's public fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub account_id: i32,
    pub account_firstname: String,
    pub account_lastname: String,
    pub account_email: String,
    pub account_type: Role,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    pub fn role(&self) -> Role {
        self.account_type
    }
}

/// Token service for JWT operations
#[derive(Debug, Clone)]
pub struct TokenService {
    key: SigningKey,
    ttl_seconds: i64,
}

impl TokenService {
    pub fn new(key: SigningKey) -> Self {
        Self::with_ttl(key, SESSION_TTL_SECONDS)
    }

    pub fn with_ttl(key: SigningKey, ttl_seconds: i64) -> Self {
        Self { key, ttl_seconds }
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Issue a session token for an account, valid from now
    pub fn issue(&self, account: &Account) -> Result<String, AuthError> {
        self.issue_at(account, Utc::now().timestamp())
    }

    /// Issue a session token as if the current time were `now`
    pub fn issue_at(&self, account: &Account, now: i64) -> Result<String, AuthError> {
        let claims = SessionClaims {
            account_id: account.account_id,
            account_firstname: account.account_firstname.clone(),
            account_lastname: account.account_lastname.clone(),
            account_email: account.account_email.clone(),
            account_type: account.account_type,
            iat: now,
            exp: now + self.ttl_seconds,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.key.as_bytes()),
        )
        .map_err(|e| AuthError::TokenGenerationError(e.to_string()))
    }

    /// Verify a token against the current time
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify signature and structure, then check expiry against `now`.
    ///
    /// A token is valid up to and including its `exp` second; no leeway.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<SessionClaims, AuthError> {
        let mut validation = Validation::default();
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let claims = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.key.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        })?;

        if now > claims.exp {
            return Err(AuthError::ExpiredToken);
        }
        Ok(claims)
    }
}
