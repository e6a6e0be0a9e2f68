//! PostgreSQL implementation of PaymentRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    AppointmentId, DomainError, ErrorCode, PaymentRecordId, Timestamp, UserId,
};
use crate::domain::payment::{PaymentRecord, PaymentRecordStatus};
use crate::ports::PaymentRepository;

/// Unique constraint on the gateway order id.
const ORDER_ID_CONSTRAINT: &str = "payments_order_id_key";

/// PostgreSQL implementation of the PaymentRepository port.
pub struct PostgresPaymentRepository {
    pool: PgPool,
}

impl PostgresPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    appointment_id: Uuid,
    client_id: String,
    counselor_id: String,
    amount_minor: i64,
    currency: String,
    order_id: String,
    payment_id: Option<String>,
    signature: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for PaymentRecord {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        Ok(PaymentRecord {
            id: PaymentRecordId::from_uuid(row.id),
            appointment_id: AppointmentId::from_uuid(row.appointment_id),
            client_id: parse_user_id(row.client_id)?,
            counselor_id: parse_user_id(row.counselor_id)?,
            amount_minor: row.amount_minor,
            currency: row.currency,
            order_id: row.order_id,
            payment_id: row.payment_id,
            signature: row.signature,
            status: parse_status(&row.status)?,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_user_id(s: String) -> Result<UserId, DomainError> {
    UserId::new(s)
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Invalid user id: {}", e)))
}

fn parse_status(s: &str) -> Result<PaymentRecordStatus, DomainError> {
    match s {
        "pending" => Ok(PaymentRecordStatus::Pending),
        "succeeded" => Ok(PaymentRecordStatus::Succeeded),
        "failed" => Ok(PaymentRecordStatus::Failed),
        "cancelled" => Ok(PaymentRecordStatus::Cancelled),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid payment status value: {}", s),
        )),
    }
}

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn insert(&self, record: &PaymentRecord) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                id, appointment_id, client_id, counselor_id, amount_minor,
                currency, order_id, payment_id, signature, status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.appointment_id.as_uuid())
        .bind(record.client_id.as_str())
        .bind(record.counselor_id.as_str())
        .bind(record.amount_minor)
        .bind(&record.currency)
        .bind(&record.order_id)
        .bind(&record.payment_id)
        .bind(&record.signature)
        .bind(record.status.as_str())
        .bind(record.created_at.as_datetime())
        .bind(record.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some(ORDER_ID_CONSTRAINT) {
                    return DomainError::new(
                        ErrorCode::DuplicateOrder,
                        "A payment record already exists for this order",
                    )
                    .with_detail("order_id", record.order_id.clone());
                }
            }
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert payment record: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, record: &PaymentRecord) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE payments SET
                payment_id = $2,
                signature = $3,
                status = $4,
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(&record.payment_id)
        .bind(&record.signature)
        .bind(record.status.as_str())
        .bind(record.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update payment record: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::PaymentNotFound,
                "Payment record not found",
            ));
        }

        Ok(())
    }

    async fn find_by_order_id(
        &self,
        order_id: &str,
    ) -> Result<Option<PaymentRecord>, DomainError> {
        let row: Option<PaymentRow> = sqlx::query_as(
            r#"
            SELECT id, appointment_id, client_id, counselor_id, amount_minor,
                   currency, order_id, payment_id, signature, status, created_at, updated_at
            FROM payments
            WHERE order_id = $1
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find payment record: {}", e),
            )
        })?;

        row.map(PaymentRecord::try_from).transpose()
    }

    async fn find_by_appointment(
        &self,
        appointment_id: &AppointmentId,
    ) -> Result<Option<PaymentRecord>, DomainError> {
        let row: Option<PaymentRow> = sqlx::query_as(
            r#"
            SELECT id, appointment_id, client_id, counselor_id, amount_minor,
                   currency, order_id, payment_id, signature, status, created_at, updated_at
            FROM payments
            WHERE appointment_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(appointment_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find payment record: {}", e),
            )
        })?;

        row.map(PaymentRecord::try_from).transpose()
    }
}
