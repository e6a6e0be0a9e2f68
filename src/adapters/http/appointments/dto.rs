//! JSON request/response types for appointment endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::appointment::{
    Appointment, AppointmentStatus, Attachment, PaymentStatus, ServiceType, SessionType,
};

/// Request to book an appointment.
#[derive(Debug, Clone, Deserialize)]
pub struct BookAppointmentRequest {
    pub counselor_id: String,
    pub service_type: ServiceType,
    /// ISO date, e.g. `2026-09-01`.
    pub appointment_date: NaiveDate,
    /// Wall-clock time, `HH:MM`.
    pub appointment_time: String,
    pub session_type: SessionType,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request to complete an appointment, optionally recording session notes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompleteAppointmentRequest {
    #[serde(default)]
    pub counselor_notes: Option<String>,
}

/// Request to replace the counselor's notes.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateNotesRequest {
    pub counselor_notes: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttachmentResponse {
    pub file_name: String,
    pub file_url: String,
    pub uploaded_at: String,
}

impl From<&Attachment> for AttachmentResponse {
    fn from(a: &Attachment) -> Self {
        Self {
            file_name: a.file_name.clone(),
            file_url: a.file_url.clone(),
            uploaded_at: a.uploaded_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Full appointment view returned by every appointment endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentResponse {
    pub id: String,
    pub client_id: String,
    pub counselor_id: String,
    pub service_type: ServiceType,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    pub session_type: SessionType,
    pub amount_minor: i64,
    pub status: AppointmentStatus,
    pub payment_status: PaymentStatus,
    pub notes: Option<String>,
    pub counselor_notes: Option<String>,
    pub attachments: Vec<AttachmentResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Appointment> for AppointmentResponse {
    fn from(a: &Appointment) -> Self {
        Self {
            id: a.id.to_string(),
            client_id: a.client_id.to_string(),
            counselor_id: a.counselor_id.to_string(),
            service_type: a.service_type,
            appointment_date: a.appointment_date,
            appointment_time: a.appointment_time.to_string(),
            session_type: a.session_type,
            amount_minor: a.amount_minor,
            status: a.status,
            payment_status: a.payment_status,
            notes: a.notes.clone(),
            counselor_notes: a.counselor_notes.clone(),
            attachments: a.attachments.iter().map(AttachmentResponse::from).collect(),
            created_at: a.created_at.to_string(),
            updated_at: a.updated_at.to_string(),
        }
    }
}

/// List of appointments, most recent date first.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentListResponse {
    pub appointments: Vec<AppointmentResponse>,
}

/// Session-join authorization decision.
#[derive(Debug, Clone, Serialize)]
pub struct SessionAuthorizationResponse {
    pub authorized: bool,
    pub appointment: AppointmentResponse,
}
