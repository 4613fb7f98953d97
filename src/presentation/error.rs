use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::{AuthError, ItineraryAccessError, PlannerError};
use crate::domain::TripRequestError;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Central error-to-status mapping for the whole HTTP surface. Upstream and
/// storage detail is logged server-side and never echoed to the client.
#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    Unauthorized,
    InvalidCredentials,
    Forbidden,
    NotFound(&'static str),
    DuplicateEmail,
    GenerationFailed(String),
    GenerationTimeout,
    Internal(String),
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, message.clone()),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "authentication required".to_string(),
            ),
            ApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "invalid credentials".to_string())
            }
            ApiError::Forbidden => (
                StatusCode::FORBIDDEN,
                "you do not have permission to access this itinerary".to_string(),
            ),
            ApiError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found")),
            ApiError::DuplicateEmail => (
                StatusCode::BAD_REQUEST,
                "email already registered".to_string(),
            ),
            ApiError::GenerationFailed(_) => (
                StatusCode::BAD_GATEWAY,
                "failed to generate itinerary".to_string(),
            ),
            ApiError::GenerationTimeout => (
                StatusCode::GATEWAY_TIMEOUT,
                "itinerary generation timed out".to_string(),
            ),
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::GenerationFailed(detail) | ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
            }
            ApiError::GenerationTimeout => {
                tracing::error!("Generation timed out");
            }
            _ => {}
        }

        let (status, message) = self.status_and_message();
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<TripRequestError> for ApiError {
    fn from(e: TripRequestError) -> Self {
        ApiError::Validation(e.to_string())
    }
}

impl From<PlannerError> for ApiError {
    fn from(e: PlannerError) -> Self {
        match e {
            PlannerError::ActivityIndexOutOfRange { .. } => ApiError::Validation(e.to_string()),
            PlannerError::Timeout(_) => ApiError::GenerationTimeout,
            PlannerError::Generation(inner) => ApiError::GenerationFailed(inner.to_string()),
            PlannerError::MalformedResponse(detail) => ApiError::GenerationFailed(detail),
        }
    }
}

impl From<ItineraryAccessError> for ApiError {
    fn from(e: ItineraryAccessError) -> Self {
        match e {
            ItineraryAccessError::NotFound => ApiError::NotFound("itinerary"),
            ItineraryAccessError::Forbidden => ApiError::Forbidden,
            ItineraryAccessError::Repository(inner) => ApiError::Internal(inner.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::DuplicateEmail => ApiError::DuplicateEmail,
            AuthError::InvalidCredentials => ApiError::InvalidCredentials,
            AuthError::Unauthorized => ApiError::Unauthorized,
            AuthError::NotFound => ApiError::NotFound("user"),
            AuthError::Repository(inner) => ApiError::Internal(inner.to_string()),
            AuthError::Hash(inner) => ApiError::Internal(inner.to_string()),
            AuthError::Token(inner) => ApiError::Internal(inner.to_string()),
        }
    }
}
