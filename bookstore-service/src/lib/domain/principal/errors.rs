use auth::PasswordError;
use auth::TokenError;
use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for display name validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for login, request authentication and registration.
///
/// `PrincipalNotFound` and `InvalidCredentials` stay distinct here for
/// diagnostics; the HTTP layer presents them identically.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid email: {0}")]
    InvalidIdentifier(#[from] EmailError),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] NameError),

    // Authentication outcomes
    #[error("Principal not found: {0}")]
    PrincipalNotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    // Registration
    #[error("Email already registered: {0}")]
    IdentifierAlreadyExists(String),

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token issuance failed: {0}")]
    TokenIssuance(TokenError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
