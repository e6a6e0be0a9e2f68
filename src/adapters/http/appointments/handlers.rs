//! HTTP handlers for appointment endpoints.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use uuid::Uuid;

use crate::application::handlers::appointment::{
    AttachFileCommand, AuthorizeSessionQuery, BookAppointmentCommand, CancelAppointmentCommand,
    CompleteAppointmentCommand, ConfirmAppointmentCommand, ListAppointmentsQuery,
    ListClientRecordsQuery, RejectAppointmentCommand, UpdateNotesCommand,
};
use crate::domain::appointment::BookingError;
use crate::domain::availability::TimeOfDay;
use crate::domain::foundation::{AppointmentId, UserId};

use super::super::auth::AuthenticatedUser;
use super::super::error::ApiError;
use super::super::state::ApiState;
use super::dto::{
    AppointmentListResponse, AppointmentResponse, BookAppointmentRequest,
    CompleteAppointmentRequest, SessionAuthorizationResponse, UpdateNotesRequest,
};

fn parse_appointment_id(raw: &str) -> Result<AppointmentId, ApiError> {
    Uuid::parse_str(raw)
        .map(AppointmentId::from_uuid)
        .map_err(|_| BookingError::validation("appointment_id", "not a valid UUID").into())
}

/// POST /api/appointments - Book an appointment
pub async fn book_appointment(
    State(state): State<ApiState>,
    user: AuthenticatedUser,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.book_appointment_handler();
    let cmd = BookAppointmentCommand {
        identity: user.identity,
        counselor_id: UserId::new(request.counselor_id).map_err(BookingError::from)?,
        service_type: request.service_type,
        appointment_date: request.appointment_date,
        appointment_time: TimeOfDay::parse(&request.appointment_time)
            .map_err(BookingError::from)?,
        session_type: request.session_type,
        notes: request.notes,
    };

    let result = handler.handle(cmd).await?;

    Ok((
        StatusCode::CREATED,
        Json(AppointmentResponse::from(&result.appointment)),
    ))
}

/// GET /api/appointments - List the caller's appointments
pub async fn list_appointments(
    State(state): State<ApiState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.list_appointments_handler();
    let result = handler
        .handle(ListAppointmentsQuery {
            identity: user.identity,
        })
        .await?;

    Ok(Json(AppointmentListResponse {
        appointments: result
            .appointments
            .iter()
            .map(AppointmentResponse::from)
            .collect(),
    }))
}

/// PUT /api/appointments/:id/confirm - Confirm a pending appointment
pub async fn confirm_appointment(
    State(state): State<ApiState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.confirm_appointment_handler();
    let result = handler
        .handle(ConfirmAppointmentCommand {
            identity: user.identity,
            appointment_id: parse_appointment_id(&id)?,
        })
        .await?;

    Ok(Json(AppointmentResponse::from(&result.appointment)))
}

/// PUT /api/appointments/:id/reject - Reject a pending appointment
pub async fn reject_appointment(
    State(state): State<ApiState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.reject_appointment_handler();
    let result = handler
        .handle(RejectAppointmentCommand {
            identity: user.identity,
            appointment_id: parse_appointment_id(&id)?,
        })
        .await?;

    Ok(Json(AppointmentResponse::from(&result.appointment)))
}

/// PUT /api/appointments/:id/cancel - Cancel an active appointment
pub async fn cancel_appointment(
    State(state): State<ApiState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.cancel_appointment_handler();
    let result = handler
        .handle(CancelAppointmentCommand {
            identity: user.identity,
            appointment_id: parse_appointment_id(&id)?,
        })
        .await?;

    Ok(Json(AppointmentResponse::from(&result.appointment)))
}

/// PUT /api/appointments/:id/complete - Complete a confirmed appointment
pub async fn complete_appointment(
    State(state): State<ApiState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(request): Json<CompleteAppointmentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.complete_appointment_handler();
    let result = handler
        .handle(CompleteAppointmentCommand {
            identity: user.identity,
            appointment_id: parse_appointment_id(&id)?,
            counselor_notes: request.counselor_notes,
        })
        .await?;

    Ok(Json(AppointmentResponse::from(&result.appointment)))
}

/// PUT /api/appointments/:id/notes - Replace the counselor's notes
pub async fn update_notes(
    State(state): State<ApiState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateNotesRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.update_notes_handler();
    let result = handler
        .handle(UpdateNotesCommand {
            identity: user.identity,
            appointment_id: parse_appointment_id(&id)?,
            notes: request.counselor_notes,
        })
        .await?;

    Ok(Json(AppointmentResponse::from(&result.appointment)))
}

/// POST /api/appointments/:id/attachments - Upload an attachment
///
/// Multipart form data; the first file field is stored.
pub async fn attach_file(
    State(state): State<ApiState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let appointment_id = parse_appointment_id(&id)?;

    let field = multipart
        .next_field()
        .await
        .map_err(|e| BookingError::validation("file", e.to_string()))?
        .ok_or_else(|| BookingError::validation("file", "no file field in request"))?;

    let file_name = field
        .file_name()
        .map(str::to_string)
        .ok_or_else(|| BookingError::validation("file", "file name is required"))?;
    let bytes = field
        .bytes()
        .await
        .map_err(|e| BookingError::validation("file", e.to_string()))?
        .to_vec();

    let handler = state.attach_file_handler();
    let result = handler
        .handle(AttachFileCommand {
            identity: user.identity,
            appointment_id,
            file_name,
            bytes,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AppointmentResponse::from(&result.appointment)),
    ))
}

/// GET /api/appointments/:id/session - Authorize a session join
pub async fn authorize_session(
    State(state): State<ApiState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.authorize_session_handler();
    let result = handler
        .handle(AuthorizeSessionQuery {
            identity: user.identity,
            appointment_id: parse_appointment_id(&id)?,
        })
        .await?;

    Ok(Json(SessionAuthorizationResponse {
        authorized: true,
        appointment: AppointmentResponse::from(&result.appointment),
    }))
}

/// GET /api/appointments/clients/:client_id - A counselor's records for one client
pub async fn list_client_records(
    State(state): State<ApiState>,
    user: AuthenticatedUser,
    Path(client_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.list_client_records_handler();
    let result = handler
        .handle(ListClientRecordsQuery {
            identity: user.identity,
            client_id: UserId::new(client_id).map_err(BookingError::from)?,
        })
        .await?;

    Ok(Json(AppointmentListResponse {
        appointments: result
            .appointments
            .iter()
            .map(AppointmentResponse::from)
            .collect(),
    }))
}
