use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::principal::models::EmailAddress;
use crate::domain::principal::models::PersonName;
use crate::domain::principal::models::Principal;
use crate::domain::principal::models::PrincipalId;
use crate::domain::principal::models::Role;
use crate::domain::principal::ports::PrincipalRepository;
use crate::principal::errors::AuthError;

const EMAIL_UNIQUE_CONSTRAINT: &str = "principals_email_key";

pub struct PostgresPrincipalRepository {
    pool: PgPool,
}

impl PostgresPrincipalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_principal(row: PgRow) -> Result<Principal, AuthError> {
        let id: Uuid = row.try_get("id").map_err(Self::database_error)?;
        let first_name: String = row.try_get("first_name").map_err(Self::database_error)?;
        let last_name: String = row.try_get("last_name").map_err(Self::database_error)?;
        let email: String = row.try_get("email").map_err(Self::database_error)?;
        let password_hash: String = row.try_get("password_hash").map_err(Self::database_error)?;
        let role: String = row.try_get("role").map_err(Self::database_error)?;
        let created_at: DateTime<Utc> = row.try_get("created_at").map_err(Self::database_error)?;

        Ok(Principal {
            id: PrincipalId(id),
            first_name: PersonName::new(first_name)?,
            last_name: PersonName::new(last_name)?,
            email: EmailAddress::new(email)?,
            password_hash,
            role: role.parse::<Role>()?,
            created_at,
        })
    }

    fn database_error(e: sqlx::Error) -> AuthError {
        AuthError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl PrincipalRepository for PostgresPrincipalRepository {
    async fn insert(&self, principal: Principal) -> Result<Principal, AuthError> {
        sqlx::query(
            r#"
            INSERT INTO principals (id, first_name, last_name, email, password_hash, role, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(principal.id.0)
        .bind(principal.first_name.as_str())
        .bind(principal.last_name.as_str())
        .bind(principal.email.as_str())
        .bind(principal.password_hash.as_str())
        .bind(principal.role.as_str())
        .bind(principal.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
                {
                    return AuthError::DuplicateEmail(principal.email.to_string());
                }
            }
            Self::database_error(e)
        })?;

        Ok(principal)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Principal>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, email, password_hash, role, created_at
            FROM principals
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::database_error)?;

        row.map(Self::row_to_principal).transpose()
    }

    async fn find_by_id(&self, id: &PrincipalId) -> Result<Option<Principal>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, email, password_hash, role, created_at
            FROM principals
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::database_error)?;

        row.map(Self::row_to_principal).transpose()
    }
}
