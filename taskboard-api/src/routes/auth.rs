/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /api/auth/register` - Create an account and issue a token
/// - `POST /api/auth/login` - Verify credentials and issue a token
/// - `GET /api/auth/me` - Resolve the current user from the bearer token

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
    extract::Json,
    response::Envelope,
};
use axum::{extract::State, http::StatusCode, Extension};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::{jwt, middleware::CurrentUser, password},
    models::user::{CreateUser, User, UserSummary},
};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name
    #[validate(length(min = 2, max = 255, message = "Name must be between 2 and 255 characters"))]
    pub name: String,

    /// Email address
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,

    /// Password (strength-checked separately)
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Token + user payload returned by register and login
#[derive(Debug, Serialize)]
pub struct AuthPayload {
    /// Bearer token (30-day expiry)
    pub token: String,

    /// Public user summary
    pub user: UserSummary,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/register
/// Content-Type: application/json
///
/// { "name": "Ada", "email": "ada@example.com", "password": "secret1" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: validation failed
/// - `409 Conflict`: email already exists
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<Envelope<AuthPayload>>)> {
    req.validate()?;

    password::validate_password_strength(&req.password).map_err(|message| {
        ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "password".to_string(),
            message,
        }])
    })?;

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            name: req.name,
            email: req.email,
            password_hash,
        },
    )
    .await?;

    let token = jwt::create_token(&jwt::Claims::new(user.id), state.jwt_secret())?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::data(AuthPayload {
            token,
            user: user.summary(),
        })),
    ))
}

/// Login with email and password
///
/// A wrong email and a wrong password produce the same 401, so the endpoint
/// does not reveal which accounts exist.
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/login
/// Content-Type: application/json
///
/// { "email": "ada@example.com", "password": "secret1" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: validation failed
/// - `401 Unauthorized`: invalid credentials
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<Envelope<AuthPayload>>> {
    req.validate()?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = jwt::create_token(&jwt::Claims::new(user.id), state.jwt_secret())?;

    Ok(Json(Envelope::data(AuthPayload {
        token,
        user: user.summary(),
    })))
}

/// Resolve the current user from the bearer token
///
/// # Endpoint
///
/// ```text
/// GET /api/auth/me
/// Authorization: Bearer <token>
/// ```
pub async fn me(
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<Envelope<UserSummary>>> {
    Ok(Json(Envelope::data(UserSummary {
        id: current.id,
        name: current.name,
        email: current.email,
    })))
}
