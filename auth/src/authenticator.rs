use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::SigningConfig;
use crate::jwt::TokenError;
use crate::jwt::TokenService;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Holds only read-only state, so a single instance can be shared across
/// concurrent requests behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_service: TokenService,
    token_ttl: Duration,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed session token
    pub access_token: String,
    /// Instant after which the token no longer verifies
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `signing` - Validated signing algorithm and secret
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(signing: &SigningConfig, token_ttl: Duration) -> Self {
        let password_hasher = PasswordHasher::new();
        password_hasher.warm_up();

        Self {
            password_hasher,
            token_service: TokenService::new(signing),
            token_ttl,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token for `subject`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Principal identifier to embed in the token
    /// * `now` - Issuance instant
    ///
    /// # Returns
    /// AuthenticationResult with access token and its expiry
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match, or the stored hash is unusable
    /// * `Token` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
        now: DateTime<Utc>,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.generate_token(subject, now)?;
        let expires_at = now.checked_add_signed(self.token_ttl).ok_or_else(|| {
            TokenError::EncodingFailed("token expiry is out of range".to_string())
        })?;

        Ok(AuthenticationResult {
            access_token,
            expires_at,
        })
    }

    /// Spend the same hashing effort as `authenticate` without a stored hash.
    ///
    /// Used when the identifier is unknown so both rejection paths take
    /// comparable time.
    pub fn reject(&self, password: &str) {
        self.password_hasher.verify_dummy(password);
    }

    /// Issue a token without password verification.
    ///
    /// # Errors
    /// * `TokenError` - Token generation failed
    pub fn generate_token(&self, subject: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        self.token_service.issue(subject, now, self.token_ttl)
    }

    /// Verify a token at `now` and return its subject.
    ///
    /// # Errors
    /// * `TokenError` - Token is malformed, expired, or has no subject
    pub fn validate_token(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        self.token_service.verify(token, now)
    }
}
