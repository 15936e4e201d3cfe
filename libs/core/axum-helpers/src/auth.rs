//! Caller role resolution from the `X-User-Role` request header.
//!
//! Authentication for this API is a single header carrying the caller's role,
//! restricted to the literal values `user` and `admin`. A missing or invalid
//! value yields 401; a valid but insufficient role yields 403 on admin-only
//! routes.

use crate::errors::AppError;
use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Request header carrying the caller's role.
pub const ROLE_HEADER: &str = "x-user-role";

/// Caller classification, gating visibility and write access.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    /// Regular caller; sees public products only
    User,
    /// Administrator; full visibility and write access
    Admin,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

fn role_from_parts(parts: &Parts) -> Result<Role, Response> {
    let Some(value) = parts.headers.get(ROLE_HEADER) else {
        return Err(AppError::Unauthorized(
            "Unauthorized: No role provided in X-User-Role header".to_string(),
        )
        .into_response());
    };

    let raw = value.to_str().map_err(|_| {
        AppError::Unauthorized("Unauthorized: Invalid role header value".to_string())
            .into_response()
    })?;

    raw.parse::<Role>().map_err(|_| {
        AppError::Unauthorized(format!(
            "Unauthorized: Invalid role '{}'. Must be one of: user, admin",
            raw
        ))
        .into_response()
    })
}

/// Extractor for the caller's role.
///
/// Rejects with 401 when the header is missing or carries anything other than
/// the literal `user`/`admin` values.
///
/// # Example
/// ```ignore
/// use axum_helpers::auth::CallerRole;
///
/// async fn list_items(CallerRole(role): CallerRole) {
///     // role-aware filtering
/// }
/// ```
pub struct CallerRole(pub Role);

impl<S> FromRequestParts<S> for CallerRole
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        role_from_parts(parts).map(CallerRole)
    }
}

/// Extractor gating a route to administrators.
///
/// Resolves the role like [`CallerRole`], then rejects non-admin callers with
/// 403.
pub struct AdminRole(pub Role);

impl<S> FromRequestParts<S> for AdminRole
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let role = role_from_parts(parts)?;

        if role.is_admin() {
            Ok(AdminRole(role))
        } else {
            Err(AppError::Forbidden(
                "Forbidden: Insufficient permissions. Required role: admin".to_string(),
            )
            .into_response())
        }
    }
}
