use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use serde::Deserialize;
use uuid::Uuid;

use super::require_auth;
use crate::application::ports::LlmClient;
use crate::domain::ItineraryId;
use crate::presentation::error::ApiError;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateActivityRequest {
    pub itinerary_id: Uuid,
    /// Flat, day-major index over the itinerary's activities.
    pub item_index: usize,
    #[serde(default)]
    pub budget: Option<f64>,
}

/// Replaces one activity of a stored itinerary, leaving everything else
/// untouched. Ownership is enforced before any upstream call.
#[tracing::instrument(skip(state, headers, request), fields(itinerary_id = %request.itinerary_id))]
pub async fn regenerate_activity_handler<L>(
    State(state): State<AppState<L>>,
    headers: HeaderMap,
    Json(request): Json<RegenerateActivityRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    L: LlmClient + 'static,
{
    let principal = require_auth(&state.auth_service, &headers).await?;

    let itinerary = state
        .itinerary_service
        .get_for_owner(principal.id, ItineraryId::from_uuid(request.itinerary_id))
        .await?;

    let (day_index, slot, replacement) = state
        .planner_service
        .regenerate_activity(&itinerary, request.item_index, request.budget)
        .await?;

    let updated = state
        .itinerary_service
        .apply_replacement(itinerary, day_index, slot, replacement)
        .await?;

    Ok(Json(updated))
}
