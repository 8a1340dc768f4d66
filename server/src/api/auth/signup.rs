use crate::api::auth::UserResponse;
use crate::api::{ErrorResponse, FieldError};
use crate::auth::{hash_password, is_valid_email, issue_token, normalize_email};
use crate::db::DbPool;
use crate::get_conn;
use crate::models::{NewUser, User};
use crate::schema::users;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SignupResponse {
    pub message: String,
    pub user: UserResponse,
    pub token: String,
}

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "auth",
    request_body(content = SignupRequest, example = json!({"email": "user@example.com", "password": "password123"})),
    responses(
        (status = 201, description = "User created successfully", body = SignupResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn signup(
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<SignupRequest>,
) -> impl IntoResponse {
    let email = normalize_email(&req.email);

    let mut details = Vec::new();
    if !is_valid_email(&email) {
        details.push(FieldError::new("email", "Valid email is required"));
    }
    if req.password.chars().count() < 6 {
        details.push(FieldError::new(
            "password",
            "Password must be at least 6 characters long",
        ));
    }
    if !details.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::validation(details)),
        )
            .into_response();
    }

    let mut conn = get_conn!(pool);

    let password_hash = match hash_password(&req.password) {
        Ok(h) => h,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to hash password")),
            )
                .into_response()
        }
    };

    // The unique index on email is the authority; a racing duplicate signup
    // surfaces here as a violation rather than through a pre-check.
    let user: User = match diesel::insert_into(users::table)
        .values(&NewUser {
            email: &email,
            password_hash: &password_hash,
        })
        .returning(User::as_returning())
        .get_result(&mut conn)
    {
        Ok(u) => u,
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        )) => {
            return (
                StatusCode::CONFLICT,
                Json(ErrorResponse::new("User with this email already exists")),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to create user: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Internal server error")),
            )
                .into_response();
        }
    };

    let token = match issue_token(user.id, &user.email) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("Failed to issue token: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Internal server error")),
            )
                .into_response();
        }
    };

    (
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created successfully".to_string(),
            user: user.into(),
            token,
        }),
    )
        .into_response()
}
