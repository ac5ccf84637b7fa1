use async_trait::async_trait;

use crate::domain::principal::models::AuthenticatedPrincipal;
use crate::domain::principal::models::Credential;
use crate::domain::principal::models::EmailAddress;
use crate::domain::principal::models::IssuedToken;
use crate::domain::principal::models::Principal;
use crate::domain::principal::models::RegisterPrincipalCommand;
use crate::principal::errors::AuthError;

/// Port for authentication gate operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new principal with a hashed password.
    ///
    /// # Arguments
    /// * `command` - Validated command containing name, email, and password
    ///
    /// # Returns
    /// Created principal
    ///
    /// # Errors
    /// * `IdentifierAlreadyExists` - Email is already registered
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterPrincipalCommand) -> Result<Principal, AuthError>;

    /// Verify a credential and issue a session token.
    ///
    /// # Arguments
    /// * `credential` - Identifier and plaintext secret
    ///
    /// # Returns
    /// Signed token and its expiry
    ///
    /// # Errors
    /// * `PrincipalNotFound` - No principal with this identifier
    /// * `InvalidCredentials` - Secret does not match
    /// * `TokenIssuance` - Token signing failed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, credential: Credential) -> Result<IssuedToken, AuthError>;

    /// Verify a presented bearer token and resolve its principal.
    ///
    /// # Arguments
    /// * `token` - Raw token string from the Authorization header
    ///
    /// # Returns
    /// Principal the token was issued to
    ///
    /// # Errors
    /// * `InvalidToken` - Token is malformed, expired, or lacks a subject
    /// * `PrincipalNotFound` - Principal was removed after the token was issued
    /// * `DatabaseError` - Database operation failed
    async fn authenticate(&self, token: &str) -> Result<AuthenticatedPrincipal, AuthError>;
}

/// Credential store: persistence operations for principals.
#[async_trait]
pub trait PrincipalRepository: Send + Sync + 'static {
    /// Point lookup by unique identifier.
    ///
    /// # Arguments
    /// * `email` - Canonical email address
    ///
    /// # Returns
    /// Optional principal (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_identifier(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Principal>, AuthError>;

    /// Persist a new principal.
    ///
    /// # Arguments
    /// * `principal` - Principal with hashed password
    ///
    /// # Returns
    /// Created principal
    ///
    /// # Errors
    /// * `IdentifierAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, principal: Principal) -> Result<Principal, AuthError>;
}
