//! Caller identity extraction.
//!
//! Authentication happens upstream. The gateway forwards the authenticated
//! caller in request headers, which this extractor turns into an [`Actor`].

use axum::{
    async_trait,
    extract::{FromRequestParts, Request},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;
use uuid::Uuid;

use crate::error::PayrollError;
use crate::models::{Actor, Role};

use super::response::{ApiError, ApiErrorResponse};

/// Authenticated user id. Required.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Username recorded on writes. Defaults to `user<id>`.
pub const USERNAME_HEADER: &str = "x-username";
/// `employee` or `admin`. Defaults to `employee`.
pub const ROLE_HEADER: &str = "x-user-role";
/// Correlation id. Generated when absent.
pub const REQUEST_ID_HEADER: &str = "x-request-id";
/// Client address chain. The first entry is used.
pub const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// The calling user, extracted from the identity headers.
#[derive(Debug, Clone)]
pub struct CallerIdentity(pub Actor);

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn unauthenticated(message: impl Into<String>) -> ApiErrorResponse {
    ApiErrorResponse::new(StatusCode::UNAUTHORIZED, ApiError::new("UNAUTHENTICATED", message))
}

#[async_trait]
impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiErrorResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = header(parts, USER_ID_HEADER)
            .ok_or_else(|| unauthenticated(format!("missing {} header", USER_ID_HEADER)))?
            .parse::<i64>()
            .map_err(|_| unauthenticated(format!("{} must be an integer", USER_ID_HEADER)))?;

        let role = match header(parts, ROLE_HEADER).map(str::to_ascii_lowercase).as_deref() {
            None | Some("employee") => Role::Employee,
            Some("admin") => Role::Admin,
            Some(other) => {
                return Err(unauthenticated(format!("unknown role '{}'", other)));
            }
        };

        let username = header(parts, USERNAME_HEADER)
            .map(str::to_string)
            .unwrap_or_else(|| format!("user{}", user_id));

        let request_id = header(parts, REQUEST_ID_HEADER)
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let ip_address = header(parts, FORWARDED_FOR_HEADER)
            .and_then(|chain| chain.split(',').next())
            .map(|ip| ip.trim().to_string());

        Ok(CallerIdentity(Actor {
            user_id,
            username,
            role,
            request_id,
            ip_address,
        }))
    }
}

/// Middleware rejecting callers without the admin role.
pub async fn require_admin_role(
    CallerIdentity(actor): CallerIdentity,
    request: Request,
    next: Next,
) -> Response {
    if actor.is_admin() {
        return next.run(request).await;
    }

    warn!(
        request_id = %actor.request_id,
        user_id = actor.user_id,
        path = %request.uri().path(),
        "admin route called without admin role"
    );
    ApiErrorResponse::from(PayrollError::AdminRequired).into_response()
}
