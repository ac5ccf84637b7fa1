use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::principal::models::EmailAddress;
use crate::domain::principal::models::Principal;
use crate::domain::principal::ports::PrincipalRepository;
use crate::principal::errors::AuthError;

/// Process-local credential store keyed by canonical email.
///
/// Used when no database is configured, and by the API tests.
#[derive(Default)]
pub struct InMemoryPrincipalRepository {
    principals: RwLock<HashMap<EmailAddress, Principal>>,
}

impl InMemoryPrincipalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop a principal outside the service's operations.
    ///
    /// Not part of `PrincipalRepository`; tests use it to simulate a row
    /// deleted by another process while its tokens are still live.
    pub async fn remove(&self, email: &EmailAddress) -> Option<Principal> {
        self.principals.write().await.remove(email)
    }
}

#[async_trait]
impl PrincipalRepository for InMemoryPrincipalRepository {
    async fn find_by_identifier(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Principal>, AuthError> {
        Ok(self.principals.read().await.get(email).cloned())
    }

    async fn create(&self, principal: Principal) -> Result<Principal, AuthError> {
        let mut principals = self.principals.write().await;

        if principals.contains_key(&principal.email) {
            return Err(AuthError::IdentifierAlreadyExists(
                principal.email.to_string(),
            ));
        }

        principals.insert(principal.email.clone(), principal.clone());
        Ok(principal)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::principal::models::DisplayName;
    use crate::domain::principal::models::PrincipalId;

    fn principal(email: &str) -> Principal {
        Principal {
            id: PrincipalId::new(),
            name: DisplayName::new("Test".to_string()).unwrap(),
            email: EmailAddress::new(email).unwrap(),
            password_hash: "$argon2id$placeholder".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repository = InMemoryPrincipalRepository::new();
        let created = repository
            .create(principal("alice@example.com"))
            .await
            .unwrap();

        let found = repository
            .find_by_identifier(&EmailAddress::new("ALICE@example.com").unwrap())
            .await
            .unwrap()
            .expect("principal should exist");
        assert_eq!(found.id, created.id);
    }

    #[tokio::test]
    async fn test_find_missing() {
        let repository = InMemoryPrincipalRepository::new();
        let found = repository
            .find_by_identifier(&EmailAddress::new("nobody@example.com").unwrap())
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_create_duplicate() {
        let repository = InMemoryPrincipalRepository::new();
        repository
            .create(principal("alice@example.com"))
            .await
            .unwrap();

        let result = repository.create(principal("alice@example.com")).await;
        assert!(matches!(result, Err(AuthError::IdentifierAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_remove() {
        let repository = InMemoryPrincipalRepository::new();
        let email = EmailAddress::new("alice@example.com").unwrap();
        repository
            .create(principal("alice@example.com"))
            .await
            .unwrap();

        assert!(repository.remove(&email).await.is_some());
        assert!(repository
            .find_by_identifier(&email)
            .await
            .unwrap()
            .is_none());
    }
}
