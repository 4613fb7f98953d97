use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::require_auth;
use crate::application::ports::LlmClient;
use crate::domain::{Itinerary, ItineraryId};
use crate::presentation::error::ApiError;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveItineraryRequest {
    /// The generated aggregate, round-tripped by the client.
    pub itinerary: Itinerary,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Serialize)]
pub struct ListItinerariesResponse {
    pub itineraries: Vec<Itinerary>,
}

#[tracing::instrument(skip(state, headers, request))]
pub async fn save_itinerary_handler<L>(
    State(state): State<AppState<L>>,
    headers: HeaderMap,
    Json(request): Json<SaveItineraryRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    L: LlmClient + 'static,
{
    let principal = require_auth(&state.auth_service, &headers).await?;

    let stored = state
        .itinerary_service
        .save(principal.id, request.itinerary, request.name)
        .await?;

    Ok((StatusCode::CREATED, Json(stored)))
}

#[tracing::instrument(skip(state, headers))]
pub async fn list_itineraries_handler<L>(
    State(state): State<AppState<L>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError>
where
    L: LlmClient + 'static,
{
    let principal = require_auth(&state.auth_service, &headers).await?;

    let itineraries = state.itinerary_service.list_for_owner(principal.id).await?;
    Ok(Json(ListItinerariesResponse { itineraries }))
}

#[tracing::instrument(skip(state, headers), fields(itinerary_id = %id))]
pub async fn get_itinerary_handler<L>(
    State(state): State<AppState<L>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
    L: LlmClient + 'static,
{
    let principal = require_auth(&state.auth_service, &headers).await?;

    let itinerary = state
        .itinerary_service
        .get_for_owner(principal.id, ItineraryId::from_uuid(id))
        .await?;

    Ok(Json(itinerary))
}

#[tracing::instrument(skip(state, headers), fields(itinerary_id = %id))]
pub async fn delete_itinerary_handler<L>(
    State(state): State<AppState<L>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
    L: LlmClient + 'static,
{
    let principal = require_auth(&state.auth_service, &headers).await?;

    state
        .itinerary_service
        .delete_for_owner(principal.id, ItineraryId::from_uuid(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
