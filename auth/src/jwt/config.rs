use std::fmt;
use std::str::FromStr;

use jsonwebtoken::Algorithm;

use super::errors::ConfigurationError;

/// Immutable signing settings shared by token issuance and verification.
///
/// Built once at startup from the `jwt.algorithm` and `jwt.secret` settings.
/// Only HMAC algorithms are accepted because the key is a shared secret.
#[derive(Clone)]
pub struct SigningConfig {
    algorithm: Algorithm,
    secret: Vec<u8>,
}

impl SigningConfig {
    /// Validate raw settings into a signing configuration.
    ///
    /// # Arguments
    /// * `algorithm` - Algorithm name as it appears in the JWT header (e.g. `HS256`)
    /// * `secret` - Shared signing secret
    ///
    /// # Errors
    /// * `MissingAlgorithm` - Algorithm is empty
    /// * `MissingSecret` - Secret is empty or whitespace
    /// * `UnsupportedAlgorithm` - Unknown name, or not an HMAC algorithm
    pub fn new(algorithm: &str, secret: &str) -> Result<Self, ConfigurationError> {
        let algorithm = algorithm.trim();
        if algorithm.is_empty() {
            return Err(ConfigurationError::MissingAlgorithm);
        }

        if secret.trim().is_empty() {
            return Err(ConfigurationError::MissingSecret);
        }

        let algorithm = Algorithm::from_str(algorithm)
            .map_err(|_| ConfigurationError::UnsupportedAlgorithm(algorithm.to_string()))?;

        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(Self {
                algorithm,
                secret: secret.as_bytes().to_vec(),
            }),
            other => Err(ConfigurationError::UnsupportedAlgorithm(format!(
                "{:?}",
                other
            ))),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub(crate) fn secret(&self) -> &[u8] {
        &self.secret
    }
}

impl fmt::Debug for SigningConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningConfig")
            .field("algorithm", &self.algorithm)
            .field("secret", &"[redacted]")
            .finish()
    }
}
