use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::principal::clock::Clock;
use crate::domain::principal::clock::SystemClock;
use crate::domain::principal::models::AuthenticatedPrincipal;
use crate::domain::principal::models::Credential;
use crate::domain::principal::models::EmailAddress;
use crate::domain::principal::models::IssuedToken;
use crate::domain::principal::models::Principal;
use crate::domain::principal::models::PrincipalId;
use crate::domain::principal::models::RegisterPrincipalCommand;
use crate::principal::errors::AuthError;
use crate::principal::ports::AuthServicePort;
use crate::principal::ports::PrincipalRepository;

/// Authentication gate.
///
/// Composes the credential store, password verification and token handling
/// into login and per-request authentication. Holds no mutable state.
pub struct AuthService<PR, C = SystemClock>
where
    PR: PrincipalRepository,
    C: Clock,
{
    repository: Arc<PR>,
    authenticator: Arc<Authenticator>,
    clock: C,
}

impl<PR> AuthService<PR, SystemClock>
where
    PR: PrincipalRepository,
{
    /// Create a gate that reads the wall clock.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `authenticator` - Shared hashing and token coordinator
    pub fn new(repository: Arc<PR>, authenticator: Arc<Authenticator>) -> Self {
        Self::with_clock(repository, authenticator, SystemClock)
    }
}

impl<PR, C> AuthService<PR, C>
where
    PR: PrincipalRepository,
    C: Clock,
{
    pub fn with_clock(repository: Arc<PR>, authenticator: Arc<Authenticator>, clock: C) -> Self {
        Self {
            repository,
            authenticator,
            clock,
        }
    }

    /// Burn the cost of a password check, then report the principal as unknown.
    fn reject_unknown(&self, identifier: String, secret: &str) -> AuthError {
        self.authenticator.reject(secret);
        AuthError::PrincipalNotFound(identifier)
    }
}

#[async_trait]
impl<PR, C> AuthServicePort for AuthService<PR, C>
where
    PR: PrincipalRepository,
    C: Clock,
{
    async fn register(&self, command: RegisterPrincipalCommand) -> Result<Principal, AuthError> {
        let password_hash = self.authenticator.hash_password(&command.password)?;

        let principal = Principal {
            id: PrincipalId::new(),
            name: command.name,
            email: command.email,
            password_hash,
            created_at: self.clock.now(),
        };

        let created = self.repository.create(principal).await?;
        tracing::info!(principal_id = %created.id, "Principal registered");

        Ok(created)
    }

    async fn login(&self, credential: Credential) -> Result<IssuedToken, AuthError> {
        let email = match EmailAddress::new(&credential.identifier) {
            Ok(email) => email,
            Err(e) => {
                tracing::warn!(error = %e, "Login rejected: identifier is not an email address");
                return Err(self.reject_unknown(credential.identifier, &credential.secret));
            }
        };

        let principal = match self.repository.find_by_identifier(&email).await? {
            Some(principal) => principal,
            None => {
                tracing::warn!(identifier = %email, "Login rejected: unknown identifier");
                return Err(self.reject_unknown(email.to_string(), &credential.secret));
            }
        };

        let now = self.clock.now();
        let result = self
            .authenticator
            .authenticate(
                &credential.secret,
                &principal.password_hash,
                principal.email.as_str(),
                now,
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::warn!(principal_id = %principal.id, "Login rejected: password mismatch");
                    AuthError::InvalidCredentials
                }
                AuthenticationError::Token(err) => {
                    tracing::error!(error = %err, "Token issuance failed");
                    AuthError::TokenIssuance(err)
                }
            })?;

        tracing::info!(principal_id = %principal.id, expires_at = %result.expires_at, "Login succeeded");

        Ok(IssuedToken {
            token: result.access_token,
            expires_at: result.expires_at,
        })
    }

    async fn authenticate(&self, token: &str) -> Result<AuthenticatedPrincipal, AuthError> {
        let subject = self
            .authenticator
            .validate_token(token, self.clock.now())
            .map_err(|e| {
                tracing::warn!(error = %e, "Token rejected");
                AuthError::InvalidToken
            })?;

        let email = EmailAddress::new(&subject).map_err(|e| {
            tracing::warn!(error = %e, "Token subject is not an email address");
            AuthError::InvalidToken
        })?;

        let principal = self
            .repository
            .find_by_identifier(&email)
            .await?
            .ok_or_else(|| {
                tracing::warn!(identifier = %email, "Token subject no longer exists");
                AuthError::PrincipalNotFound(subject.clone())
            })?;

        Ok(principal.into())
    }
}
