use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::models::User;
use crate::schema::users;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use diesel::prelude::*;
use std::convert::Infallible;
use std::sync::Arc;

use super::token::{verify_token, TokenError};

/// Extractor that validates the Authorization header and provides the
/// authenticated user.
///
/// Use this in any handler that requires authentication:
/// ```ignore
/// async fn my_handler(AuthUser(user): AuthUser) -> impl IntoResponse {
///     // user is the authenticated User
/// }
/// ```
pub struct AuthUser(pub User);

/// Variant that never hard-fails: a missing or invalid token simply yields
/// `None`, leaving the request unauthenticated.
pub struct OptionalAuthUser(pub Option<User>);

pub enum AuthError {
    MissingHeader,
    InvalidHeader,
    InvalidFormat,
    InvalidToken,
    ExpiredToken,
    UserNotFound,
    Internal,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingHeader => (StatusCode::UNAUTHORIZED, "Access token required"),
            AuthError::InvalidHeader => (StatusCode::UNAUTHORIZED, "Invalid Authorization header"),
            AuthError::InvalidFormat => (
                StatusCode::UNAUTHORIZED,
                "Invalid Authorization header format",
            ),
            // A token that fails to decode is treated differently from one
            // that merely expired; clients use the 401 to trigger a re-login.
            AuthError::InvalidToken => (StatusCode::FORBIDDEN, "Invalid token"),
            AuthError::ExpiredToken => (StatusCode::UNAUTHORIZED, "Token expired"),
            AuthError::UserNotFound => (StatusCode::UNAUTHORIZED, "User not found"),
            AuthError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Authentication error"),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// Decode the bearer token and re-check that its user still exists.
async fn authenticate(parts: &Parts, pool: &DbPool) -> Result<User, AuthError> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?;

    let auth_str = auth_header.to_str().map_err(|_| AuthError::InvalidHeader)?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidFormat)?;

    let claims = verify_token(token).map_err(|err| match err {
        TokenError::Expired => AuthError::ExpiredToken,
        TokenError::Invalid => AuthError::InvalidToken,
    })?;

    let mut conn = pool.get().map_err(|_| AuthError::Internal)?;

    users::table
        .find(claims.user_id)
        .select(User::as_select())
        .first(&mut conn)
        .optional()
        .map_err(|_| AuthError::Internal)?
        .ok_or(AuthError::UserNotFound)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<DbPool>: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pool = Arc::<DbPool>::from_ref(state);
        authenticate(parts, &pool).await.map(AuthUser)
    }
}

impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    Arc<DbPool>: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pool = Arc::<DbPool>::from_ref(state);
        Ok(OptionalAuthUser(authenticate(parts, &pool).await.ok()))
    }
}
