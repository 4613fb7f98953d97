use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::application::ports::LlmClient;
use crate::domain::TripRequest;
use crate::infrastructure::observability::sanitize_for_log;
use crate::presentation::error::ApiError;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateItineraryRequest {
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub preferences: Vec<String>,
}

/// Public generation endpoint. Validation is rejected before any upstream
/// call; nothing is persisted.
#[tracing::instrument(skip(state, request))]
pub async fn generate_itinerary_handler<L>(
    State(state): State<AppState<L>>,
    Json(request): Json<GenerateItineraryRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    L: LlmClient + 'static,
{
    let start_date = parse_date(&request.start_date)?;
    let end_date = parse_date(&request.end_date)?;

    let trip = TripRequest::new(
        request.destination,
        start_date,
        end_date,
        request.budget,
        request.preferences,
    )?;

    tracing::debug!(
        destination = %sanitize_for_log(&trip.destination),
        days = trip.duration_days(),
        "Generating itinerary"
    );

    let itinerary = state.planner_service.generate(&trip).await?;
    Ok(Json(itinerary))
}

pub(super) fn parse_date(value: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ApiError::Validation(format!("invalid date: {value}, expected YYYY-MM-DD")))
}
