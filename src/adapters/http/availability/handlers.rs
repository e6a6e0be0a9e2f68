//! HTTP handlers for availability endpoints.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Json};

use crate::application::handlers::availability::{GetAvailabilityQuery, UpdateAvailabilityCommand};
use crate::domain::appointment::BookingError;
use crate::domain::foundation::UserId;

use super::super::auth::AuthenticatedUser;
use super::super::error::ApiError;
use super::super::state::ApiState;
use super::dto::{AvailabilityResponse, UpdateAvailabilityRequest};

/// GET /api/availability/:counselor_id - Read a counselor's schedule
///
/// Readable by any authenticated caller; clients consult it when picking
/// a slot.
pub async fn get_availability(
    State(state): State<ApiState>,
    _user: AuthenticatedUser,
    Path(counselor_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.get_availability_handler();
    let result = handler
        .handle(GetAvailabilityQuery {
            counselor_id: UserId::new(counselor_id).map_err(BookingError::from)?,
        })
        .await?;

    Ok(Json(AvailabilityResponse::from(&result.availability)))
}

/// PUT /api/availability - Create or fully replace the caller's schedule
pub async fn update_availability(
    State(state): State<ApiState>,
    user: AuthenticatedUser,
    Json(request): Json<UpdateAvailabilityRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let weekly_template = request
        .weekly_template
        .into_iter()
        .map(|dto| dto.into_domain())
        .collect::<Result<Vec<_>, _>>()?;
    let exceptions = request
        .exceptions
        .into_iter()
        .map(|dto| dto.into_domain())
        .collect::<Result<Vec<_>, _>>()?;

    let handler = state.update_availability_handler();
    let result = handler
        .handle(UpdateAvailabilityCommand {
            identity: user.identity,
            weekly_template,
            exceptions,
        })
        .await?;

    Ok(Json(AvailabilityResponse::from(&result.availability)))
}
