//! PostgreSQL implementation of UserDirectory.
//!
//! Read-only view over the `users` table the identity collaborator
//! maintains. The booking core never writes to it.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{CounselorProfile, UserContact, UserDirectory};

/// PostgreSQL implementation of the UserDirectory port.
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    hourly_rate_minor: Option<i64>,
}

fn parse_user_id(s: String) -> Result<UserId, DomainError> {
    UserId::new(s)
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Invalid user id: {}", e)))
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find_counselor(
        &self,
        id: &UserId,
    ) -> Result<Option<CounselorProfile>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, name, email, hourly_rate_minor
            FROM users
            WHERE id = $1 AND role = 'counselor'
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find counselor: {}", e),
            )
        })?;

        row.map(|row| {
            Ok(CounselorProfile {
                id: parse_user_id(row.id)?,
                name: row.name,
                email: row.email,
                hourly_rate_minor: row.hourly_rate_minor.unwrap_or_default(),
            })
        })
        .transpose()
    }

    async fn find_contact(&self, id: &UserId) -> Result<Option<UserContact>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, name, email, hourly_rate_minor
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find contact: {}", e),
            )
        })?;

        row.map(|row| {
            Ok(UserContact {
                id: parse_user_id(row.id)?,
                name: row.name,
                email: row.email,
            })
        })
        .transpose()
    }
}
