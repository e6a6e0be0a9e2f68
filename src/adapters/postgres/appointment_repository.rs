//! PostgreSQL implementation of AppointmentRepository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::appointment::{
    Appointment, AppointmentStatus, Attachment, NotificationLog, PaymentStatus, ServiceType,
    SessionType,
};
use crate::domain::availability::TimeOfDay;
use crate::domain::foundation::{AppointmentId, DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::AppointmentRepository;

/// Name of the partial unique index guarding the active slot. A violation
/// means a concurrent booking won the slot first.
const ACTIVE_SLOT_CONSTRAINT: &str = "appointments_active_slot_key";

/// PostgreSQL implementation of the AppointmentRepository port.
pub struct PostgresAppointmentRepository {
    pool: PgPool,
}

impl PostgresAppointmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an appointment.
#[derive(Debug, sqlx::FromRow)]
struct AppointmentRow {
    id: Uuid,
    client_id: String,
    counselor_id: String,
    service_type: String,
    appointment_date: NaiveDate,
    appointment_time: i32,
    session_type: String,
    amount_minor: i64,
    status: String,
    payment_status: String,
    notes: Option<String>,
    counselor_notes: Option<String>,
    attachments: serde_json::Value,
    notifications: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AppointmentRow> for Appointment {
    type Error = DomainError;

    fn try_from(row: AppointmentRow) -> Result<Self, Self::Error> {
        let appointment_time = u16::try_from(row.appointment_time)
            .ok()
            .and_then(|m| TimeOfDay::from_minutes(m).ok())
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Invalid appointment_time: {}", row.appointment_time),
                )
            })?;
        let attachments: Vec<Attachment> =
            serde_json::from_value(row.attachments).map_err(invalid_json("attachments"))?;
        let notifications: NotificationLog =
            serde_json::from_value(row.notifications).map_err(invalid_json("notifications"))?;

        Ok(Appointment {
            id: AppointmentId::from_uuid(row.id),
            client_id: parse_user_id(row.client_id)?,
            counselor_id: parse_user_id(row.counselor_id)?,
            service_type: parse_service_type(&row.service_type)?,
            appointment_date: row.appointment_date,
            appointment_time,
            session_type: parse_session_type(&row.session_type)?,
            amount_minor: row.amount_minor,
            status: parse_status(&row.status)?,
            payment_status: parse_payment_status(&row.payment_status)?,
            notes: row.notes,
            counselor_notes: row.counselor_notes,
            attachments,
            notifications,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn invalid_json(column: &'static str) -> impl Fn(serde_json::Error) -> DomainError {
    move |e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid {} JSON: {}", column, e),
        )
    }
}

fn parse_user_id(s: String) -> Result<UserId, DomainError> {
    UserId::new(s)
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Invalid user id: {}", e)))
}

fn parse_service_type(s: &str) -> Result<ServiceType, DomainError> {
    match s {
        "mental-health" => Ok(ServiceType::MentalHealth),
        "relationship" => Ok(ServiceType::Relationship),
        "career" => Ok(ServiceType::Career),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid service_type value: {}", s),
        )),
    }
}

fn parse_session_type(s: &str) -> Result<SessionType, DomainError> {
    match s {
        "video" => Ok(SessionType::Video),
        "chat" => Ok(SessionType::Chat),
        "email" => Ok(SessionType::Email),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid session_type value: {}", s),
        )),
    }
}

fn parse_status(s: &str) -> Result<AppointmentStatus, DomainError> {
    match s {
        "pending" => Ok(AppointmentStatus::Pending),
        "confirmed" => Ok(AppointmentStatus::Confirmed),
        "rejected" => Ok(AppointmentStatus::Rejected),
        "completed" => Ok(AppointmentStatus::Completed),
        "cancelled" => Ok(AppointmentStatus::Cancelled),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid status value: {}", s),
        )),
    }
}

fn parse_payment_status(s: &str) -> Result<PaymentStatus, DomainError> {
    match s {
        "pending" => Ok(PaymentStatus::Pending),
        "completed" => Ok(PaymentStatus::Completed),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid payment_status value: {}", s),
        )),
    }
}

fn payment_status_to_string(status: &PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Pending => "pending",
        PaymentStatus::Completed => "completed",
    }
}

fn to_json<T: serde::Serialize>(value: &T, column: &'static str) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(value).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to serialize {}: {}", column, e),
        )
    })
}

#[async_trait]
impl AppointmentRepository for PostgresAppointmentRepository {
    async fn insert(&self, appointment: &Appointment) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO appointments (
                id, client_id, counselor_id, service_type, appointment_date,
                appointment_time, session_type, amount_minor, status, payment_status,
                notes, counselor_notes, attachments, notifications, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(appointment.id.as_uuid())
        .bind(appointment.client_id.as_str())
        .bind(appointment.counselor_id.as_str())
        .bind(appointment.service_type.as_str())
        .bind(appointment.appointment_date)
        .bind(i32::from(appointment.appointment_time.minutes()))
        .bind(appointment.session_type.as_str())
        .bind(appointment.amount_minor)
        .bind(appointment.status.as_str())
        .bind(payment_status_to_string(&appointment.payment_status))
        .bind(&appointment.notes)
        .bind(&appointment.counselor_notes)
        .bind(to_json(&appointment.attachments, "attachments")?)
        .bind(to_json(&appointment.notifications, "notifications")?)
        .bind(appointment.created_at.as_datetime())
        .bind(appointment.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some(ACTIVE_SLOT_CONSTRAINT) {
                    return DomainError::new(
                        ErrorCode::SlotConflict,
                        "This time slot is already booked",
                    );
                }
            }
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert appointment: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, appointment: &Appointment) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE appointments SET
                status = $2,
                payment_status = $3,
                notes = $4,
                counselor_notes = $5,
                attachments = $6,
                notifications = $7,
                updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(appointment.id.as_uuid())
        .bind(appointment.status.as_str())
        .bind(payment_status_to_string(&appointment.payment_status))
        .bind(&appointment.notes)
        .bind(&appointment.counselor_notes)
        .bind(to_json(&appointment.attachments, "attachments")?)
        .bind(to_json(&appointment.notifications, "notifications")?)
        .bind(appointment.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update appointment: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::AppointmentNotFound,
                "Appointment not found",
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &AppointmentId) -> Result<Option<Appointment>, DomainError> {
        let row: Option<AppointmentRow> = sqlx::query_as(
            r#"
            SELECT id, client_id, counselor_id, service_type, appointment_date,
                   appointment_time, session_type, amount_minor, status, payment_status,
                   notes, counselor_notes, attachments, notifications, created_at, updated_at
            FROM appointments
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find appointment: {}", e),
            )
        })?;

        row.map(Appointment::try_from).transpose()
    }

    async fn slot_is_booked(
        &self,
        counselor_id: &UserId,
        date: NaiveDate,
        time: TimeOfDay,
    ) -> Result<bool, DomainError> {
        let exists: Option<(i32,)> = sqlx::query_as(
            r#"
            SELECT 1 FROM appointments
            WHERE counselor_id = $1
              AND appointment_date = $2
              AND appointment_time = $3
              AND status IN ('pending', 'confirmed')
            LIMIT 1
            "#,
        )
        .bind(counselor_id.as_str())
        .bind(date)
        .bind(i32::from(time.minutes()))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to probe slot: {}", e),
            )
        })?;

        Ok(exists.is_some())
    }

    async fn list_by_client(&self, client_id: &UserId) -> Result<Vec<Appointment>, DomainError> {
        let rows: Vec<AppointmentRow> = sqlx::query_as(
            r#"
            SELECT id, client_id, counselor_id, service_type, appointment_date,
                   appointment_time, session_type, amount_minor, status, payment_status,
                   notes, counselor_notes, attachments, notifications, created_at, updated_at
            FROM appointments
            WHERE client_id = $1
            ORDER BY appointment_date DESC, appointment_time DESC
            "#,
        )
        .bind(client_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list appointments: {}", e),
            )
        })?;

        rows.into_iter().map(Appointment::try_from).collect()
    }

    async fn list_by_counselor(
        &self,
        counselor_id: &UserId,
    ) -> Result<Vec<Appointment>, DomainError> {
        let rows: Vec<AppointmentRow> = sqlx::query_as(
            r#"
            SELECT id, client_id, counselor_id, service_type, appointment_date,
                   appointment_time, session_type, amount_minor, status, payment_status,
                   notes, counselor_notes, attachments, notifications, created_at, updated_at
            FROM appointments
            WHERE counselor_id = $1
            ORDER BY appointment_date DESC, appointment_time DESC
            "#,
        )
        .bind(counselor_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list appointments: {}", e),
            )
        })?;

        rows.into_iter().map(Appointment::try_from).collect()
    }

    async fn list_client_records(
        &self,
        counselor_id: &UserId,
        client_id: &UserId,
    ) -> Result<Vec<Appointment>, DomainError> {
        let rows: Vec<AppointmentRow> = sqlx::query_as(
            r#"
            SELECT id, client_id, counselor_id, service_type, appointment_date,
                   appointment_time, session_type, amount_minor, status, payment_status,
                   notes, counselor_notes, attachments, notifications, created_at, updated_at
            FROM appointments
            WHERE counselor_id = $1
              AND client_id = $2
              AND status IN ('confirmed', 'completed')
            ORDER BY appointment_date DESC, appointment_time DESC
            "#,
        )
        .bind(counselor_id.as_str())
        .bind(client_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list client records: {}", e),
            )
        })?;

        rows.into_iter().map(Appointment::try_from).collect()
    }
}
