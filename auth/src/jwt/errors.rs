use thiserror::Error;

/// Error type for token issuance and verification.
///
/// Every verification failure is terminal for the presented token; none of
/// these are transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    /// Unparseable token, wrong algorithm, bad signature, or no `exp`.
    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Missing required claim: {0}")]
    MissingClaim(String),
}

/// Signing configuration is absent or unusable.
///
/// Raised while building the process-wide signing configuration. Callers
/// treat it as fatal and abort startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("Signing algorithm is not configured")]
    MissingAlgorithm,

    #[error("Signing secret is not configured")]
    MissingSecret,

    #[error("Unsupported signing algorithm: {0} (expected HS256, HS384 or HS512)")]
    UnsupportedAlgorithm(String),

    #[error("Token lifetime must be between 1 and {max} minutes, got {actual}")]
    InvalidTokenLifetime { max: i64, actual: i64 },
}
