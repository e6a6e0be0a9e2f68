//! PostgreSQL implementation of AvailabilityRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::availability::{Availability, ScheduleException, WeeklyTemplate};
use crate::domain::foundation::{AvailabilityId, DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::AvailabilityRepository;

/// PostgreSQL implementation of the AvailabilityRepository port.
///
/// One row per counselor, enforced by a unique constraint; upsert is a
/// single `ON CONFLICT` statement.
pub struct PostgresAvailabilityRepository {
    pool: PgPool,
}

impl PostgresAvailabilityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AvailabilityRow {
    id: Uuid,
    counselor_id: String,
    weekly_template: serde_json::Value,
    exceptions: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AvailabilityRow> for Availability {
    type Error = DomainError;

    fn try_from(row: AvailabilityRow) -> Result<Self, Self::Error> {
        let weekly_template: WeeklyTemplate = serde_json::from_value(row.weekly_template)
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Invalid weekly_template JSON: {}", e),
                )
            })?;
        let exceptions: Vec<ScheduleException> =
            serde_json::from_value(row.exceptions).map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Invalid exceptions JSON: {}", e),
                )
            })?;

        Ok(Availability {
            id: AvailabilityId::from_uuid(row.id),
            counselor_id: UserId::new(row.counselor_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid counselor_id: {}", e))
            })?,
            weekly_template,
            exceptions,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[async_trait]
impl AvailabilityRepository for PostgresAvailabilityRepository {
    async fn find_by_counselor(
        &self,
        counselor_id: &UserId,
    ) -> Result<Option<Availability>, DomainError> {
        let row: Option<AvailabilityRow> = sqlx::query_as(
            r#"
            SELECT id, counselor_id, weekly_template, exceptions, created_at, updated_at
            FROM availability
            WHERE counselor_id = $1
            "#,
        )
        .bind(counselor_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find availability: {}", e),
            )
        })?;

        row.map(Availability::try_from).transpose()
    }

    async fn upsert(&self, availability: &Availability) -> Result<(), DomainError> {
        let weekly_template = serde_json::to_value(&availability.weekly_template).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to serialize weekly_template: {}", e),
            )
        })?;
        let exceptions = serde_json::to_value(&availability.exceptions).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to serialize exceptions: {}", e),
            )
        })?;

        sqlx::query(
            r#"
            INSERT INTO availability (
                id, counselor_id, weekly_template, exceptions, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (counselor_id) DO UPDATE SET
                weekly_template = EXCLUDED.weekly_template,
                exceptions = EXCLUDED.exceptions,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(availability.id.as_uuid())
        .bind(availability.counselor_id.as_str())
        .bind(weekly_template)
        .bind(exceptions)
        .bind(availability.created_at.as_datetime())
        .bind(availability.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to upsert availability: {}", e),
            )
        })?;

        Ok(())
    }
}
