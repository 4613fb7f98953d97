use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use super::require_auth;
use crate::application::ports::LlmClient;
use crate::domain::{User, UserId};
use crate::presentation::error::ApiError;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

#[tracing::instrument(skip(state, request))]
pub async fn register_handler<L>(
    State(state): State<AppState<L>>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    L: LlmClient + 'static,
{
    for (field, value) in [
        ("name", &request.name),
        ("email", &request.email),
        ("password", &request.password),
    ] {
        if value.trim().is_empty() {
            return Err(ApiError::Validation(format!("{field} must not be empty")));
        }
    }

    let (user, token) = state
        .auth_service
        .register(&request.name, &request.email, &request.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: user.into(),
            token,
        }),
    ))
}

#[tracing::instrument(skip(state, request))]
pub async fn login_handler<L>(
    State(state): State<AppState<L>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    L: LlmClient + 'static,
{
    let (user, token) = state
        .auth_service
        .login(&request.email, &request.password)
        .await?;

    Ok(Json(AuthResponse {
        user: user.into(),
        token,
    }))
}

#[tracing::instrument(skip(state, headers))]
pub async fn profile_handler<L>(
    State(state): State<AppState<L>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError>
where
    L: LlmClient + 'static,
{
    let principal = require_auth(&state.auth_service, &headers).await?;

    let user = state.auth_service.profile(principal.id).await?;
    Ok(Json(ProfileResponse { user: user.into() }))
}
