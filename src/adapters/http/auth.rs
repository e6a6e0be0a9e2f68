//! Caller identity extraction.
//!
//! Credentials are verified by the upstream identity gateway, which forwards
//! the caller's id and role in trusted headers. The extractor turns those
//! headers into a domain [`Identity`]; requests missing either header are
//! rejected before any handler runs.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use crate::domain::foundation::{Identity, Role, UserId};

use super::error::ErrorResponse;

pub const USER_ID_HEADER: &str = "X-User-Id";
pub const USER_ROLE_HEADER: &str = "X-User-Role";

/// Authenticated caller context extracted from the gateway headers.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub identity: Identity,
}

/// Rejection for requests without a valid identity.
pub struct AuthenticationRequired;

impl IntoResponse for AuthenticationRequired {
    fn into_response(self) -> Response {
        let body = ErrorResponse::new("AUTHENTICATION_REQUIRED", "Authentication is required");
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthenticationRequired;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let user_id = parts
                .headers
                .get(USER_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| UserId::new(s).ok())
                .ok_or(AuthenticationRequired)?;

            let role = parts
                .headers
                .get(USER_ROLE_HEADER)
                .and_then(|v| v.to_str().ok())
                .and_then(Role::parse)
                .ok_or(AuthenticationRequired)?;

            Ok(AuthenticatedUser {
                identity: Identity::new(user_id, role),
            })
        })
    }
}
