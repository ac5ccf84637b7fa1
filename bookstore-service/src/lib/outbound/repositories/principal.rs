use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::principal::models::DisplayName;
use crate::domain::principal::models::EmailAddress;
use crate::domain::principal::models::Principal;
use crate::domain::principal::models::PrincipalId;
use crate::domain::principal::ports::PrincipalRepository;
use crate::principal::errors::AuthError;

pub struct PostgresPrincipalRepository {
    pool: PgPool,
}

impl PostgresPrincipalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn principal_from_row(row: &PgRow) -> Result<Principal, AuthError> {
    let database_error = |e: sqlx::Error| AuthError::DatabaseError(e.to_string());

    let id: Uuid = row.try_get("id").map_err(database_error)?;
    let name: String = row.try_get("name").map_err(database_error)?;
    let email: String = row.try_get("email").map_err(database_error)?;
    let password_hash: String = row.try_get("password_hash").map_err(database_error)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(database_error)?;

    Ok(Principal {
        id: PrincipalId(id),
        name: DisplayName::new(name)?,
        email: EmailAddress::new(&email)?,
        password_hash,
        created_at,
    })
}

#[async_trait]
impl PrincipalRepository for PostgresPrincipalRepository {
    async fn find_by_identifier(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Principal>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        row.as_ref().map(principal_from_row).transpose()
    }

    async fn create(&self, principal: Principal) -> Result<Principal, AuthError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(principal.id.0)
        .bind(principal.name.as_str())
        .bind(principal.email.as_str())
        .bind(&principal.password_hash)
        .bind(principal.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some("users_email_key") {
                    return AuthError::IdentifierAlreadyExists(principal.email.to_string());
                }
            }
            AuthError::DatabaseError(e.to_string())
        })?;

        Ok(principal)
    }
}
