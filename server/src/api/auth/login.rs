use crate::api::auth::UserResponse;
use crate::api::{ErrorResponse, FieldError};
use crate::auth::{is_valid_email, issue_token, normalize_email, verify_password};
use crate::db::DbPool;
use crate::get_conn;
use crate::models::User;
use crate::schema::users;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub user: UserResponse,
    pub token: String,
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body(content = LoginRequest, example = json!({"email": "user@example.com", "password": "password123"})),
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    let email = normalize_email(&req.email);

    let mut details = Vec::new();
    if !is_valid_email(&email) {
        details.push(FieldError::new("email", "Valid email is required"));
    }
    if req.password.is_empty() {
        details.push(FieldError::new("password", "Password is required"));
    }
    if !details.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::validation(details)),
        )
            .into_response();
    }

    let mut conn = get_conn!(pool);

    // Same message for unknown email and wrong password
    let user: User = match users::table
        .filter(users::email.eq(&email))
        .select(User::as_select())
        .first(&mut conn)
    {
        Ok(u) => u,
        Err(diesel::NotFound) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("Invalid email or password")),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to fetch user: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Internal server error")),
            )
                .into_response();
        }
    };

    if !verify_password(&req.password, &user.password_hash) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("Invalid email or password")),
        )
            .into_response();
    }

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
        StatusCode::OK,
        Json(LoginResponse {
            message: "Login successful".to_string(),
            user: user.into(),
            token,
        }),
    )
        .into_response()
}
