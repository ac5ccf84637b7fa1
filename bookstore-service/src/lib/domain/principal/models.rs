use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::principal::errors::EmailError;
use crate::principal::errors::NameError;

/// Registered identity that can log in.
///
/// The password hash never leaves the service: `Debug` redacts it and no
/// response type carries it.
#[derive(Clone)]
pub struct Principal {
    pub id: PrincipalId,
    pub name: DisplayName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Principal")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"[redacted]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Principal unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrincipalId(pub Uuid);

impl PrincipalId {
    /// Generate a new random principal ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PrincipalId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type
///
/// Non-empty after trimming, at most 100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    const MAX_LENGTH: usize = 100;

    /// Create a validated display name.
    ///
    /// # Errors
    /// * `Empty` - Name is empty or whitespace
    /// * `TooLong` - Name longer than 100 characters
    pub fn new(name: String) -> Result<Self, NameError> {
        let name = name.trim().to_string();
        let length = name.chars().count();

        if length == 0 {
            Err(NameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Email address type, the principal's login identifier.
///
/// Validated with an RFC 5322 parser, then trimmed and lowercased so that
/// storage and lookup always compare the same canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated, canonical email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// Lowercased EmailAddress value object
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: &str) -> Result<Self, EmailError> {
        let canonical = email.trim().to_lowercase();

        email_address::EmailAddress::from_str(&canonical)
            .map(|_| EmailAddress(canonical))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier and secret supplied for one login attempt.
pub struct Credential {
    pub identifier: String,
    pub secret: String,
}

impl Credential {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("identifier", &self.identifier)
            .field("secret", &"[redacted]")
            .finish()
    }
}

/// Token handed back after a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Principal resolved from a verified token for the duration of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedPrincipal {
    pub id: PrincipalId,
    pub name: String,
    pub email: EmailAddress,
    pub created_at: DateTime<Utc>,
}

impl From<Principal> for AuthenticatedPrincipal {
    fn from(principal: Principal) -> Self {
        Self {
            id: principal.id,
            name: principal.name.as_str().to_string(),
            email: principal.email,
            created_at: principal.created_at,
        }
    }
}

/// Command to register a new principal with domain types
#[derive(Debug)]
pub struct RegisterPrincipalCommand {
    pub name: DisplayName,
    pub email: EmailAddress,
    pub password: String,
}

impl RegisterPrincipalCommand {
    /// Construct a new registration command.
    ///
    /// # Arguments
    /// * `name` - Validated display name
    /// * `email` - Validated email address
    /// * `password` - Plain text password (will be hashed by service)
    pub fn new(name: DisplayName, email: EmailAddress, password: String) -> Self {
        Self {
            name,
            email,
            password,
        }
    }
}
