mod generate;
mod health;
mod itineraries;
mod regenerate;
mod users;

use axum::http::HeaderMap;

pub use generate::generate_itinerary_handler;
pub use health::health_handler;
pub use itineraries::{
    delete_itinerary_handler, get_itinerary_handler, list_itineraries_handler,
    save_itinerary_handler,
};
pub use regenerate::regenerate_activity_handler;
pub use users::{login_handler, profile_handler, register_handler};

use crate::application::services::AuthService;
use crate::domain::Principal;
use crate::presentation::error::ApiError;

/// Resolves the bearer credential on protected routes. Token verification
/// alone is not enough: the principal is re-resolved against the user store
/// so credentials of deleted accounts stop working.
pub(crate) async fn require_auth(
    auth_service: &AuthService,
    headers: &HeaderMap,
) -> Result<Principal, ApiError> {
    let authorization = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    Ok(auth_service.authenticate(authorization).await?)
}
