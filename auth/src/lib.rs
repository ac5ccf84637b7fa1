//! Authentication utilities library
//!
//! Provides the credential and session-token primitives of the bookstore backend:
//! - Password hashing (Argon2id)
//! - Signed session tokens (JWT, HMAC family) with pinned algorithm and explicit clock
//! - Authentication coordination
//!
//! The service defines its own credential-store port and adapts these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{SigningConfig, TokenService};
//! use chrono::{Duration, Utc};
//!
//! let signing = SigningConfig::new("HS256", "secret_key_at_least_32_bytes_long!").unwrap();
//! let tokens = TokenService::new(&signing);
//!
//! let now = Utc::now();
//! let token = tokens.issue("alice@example.com", now, Duration::minutes(30)).unwrap();
//! assert_eq!(tokens.verify(&token, now).unwrap(), "alice@example.com");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, SigningConfig};
//! use chrono::{Duration, Utc};
//!
//! let signing = SigningConfig::new("HS256", "secret_key_at_least_32_bytes_long!").unwrap();
//! let auth = Authenticator::new(&signing, Duration::minutes(30));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let now = Utc::now();
//! let result = auth.authenticate("password123", &hash, "alice@example.com", now).unwrap();
//!
//! // Validate token
//! let subject = auth.validate_token(&result.access_token, now).unwrap();
//! assert_eq!(subject, "alice@example.com");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::ConfigurationError;
pub use jwt::SigningConfig;
pub use jwt::TokenError;
pub use jwt::TokenService;
pub use password::PasswordError;
pub use password::PasswordHasher;
