use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::config::SigningConfig;
use super::errors::TokenError;

/// Issues and verifies signed session tokens.
///
/// Tokens are compact JWS strings carrying `sub`, `iat` and `exp`. The
/// algorithm is pinned to the configured one: a token whose header names any
/// other algorithm is rejected, never negotiated.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenService {
    /// Create a token service from validated signing settings.
    ///
    /// # Arguments
    /// * `config` - Signing algorithm and shared secret
    ///
    /// # Returns
    /// TokenService bound to that algorithm and key for its whole lifetime
    pub fn new(config: &SigningConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret()),
            decoding_key: DecodingKey::from_secret(config.secret()),
            algorithm: config.algorithm(),
        }
    }

    /// Issue a token for `subject` valid from `now` until `now + ttl`.
    ///
    /// # Arguments
    /// * `subject` - Principal identifier to embed as `sub`
    /// * `now` - Issuance instant
    /// * `ttl` - Token lifetime; zero yields a token that is already expired
    ///
    /// # Returns
    /// Compact token string
    ///
    /// # Errors
    /// * `MissingClaim` - Subject is empty
    /// * `EncodingFailed` - Expiry is out of range, or signing failed
    pub fn issue(
        &self,
        subject: &str,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        if subject.is_empty() {
            return Err(TokenError::MissingClaim("sub".to_string()));
        }

        let claims = Claims::for_subject(subject, now, ttl).ok_or_else(|| {
            TokenError::EncodingFailed("token expiry is out of range".to_string())
        })?;

        self.sign(&claims)
    }

    /// Verify a presented token at instant `now` and return its subject.
    ///
    /// # Arguments
    /// * `token` - Compact token string
    /// * `now` - Verification instant
    ///
    /// # Returns
    /// Subject claim
    ///
    /// # Errors
    /// * `Malformed` - Unparseable, wrong algorithm, bad signature, or no `exp`
    /// * `Expired` - `now` is at or past `exp`
    /// * `MissingClaim` - `sub` is absent or empty
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = self.decode(token)?;

        if claims.exp.is_none() {
            return Err(TokenError::Malformed("missing exp claim".to_string()));
        }

        if claims.is_expired(now.timestamp()) {
            return Err(TokenError::Expired);
        }

        claims
            .subject()
            .map(str::to_string)
            .ok_or_else(|| TokenError::MissingClaim("sub".to_string()))
    }

    fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked against the caller's clock in `verify`.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| TokenError::Malformed(e.to_string()))
    }
}
