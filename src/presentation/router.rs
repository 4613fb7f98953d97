use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::LlmClient;
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    delete_itinerary_handler, generate_itinerary_handler, get_itinerary_handler, health_handler,
    list_itineraries_handler, login_handler, profile_handler, regenerate_activity_handler,
    register_handler, save_itinerary_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<L>(state: AppState<L>) -> Router
where
    L: LlmClient + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/v1/itineraries/generate",
            post(generate_itinerary_handler::<L>),
        )
        .route(
            "/api/v1/itineraries/regenerate-activity",
            post(regenerate_activity_handler::<L>),
        )
        .route(
            "/api/v1/itineraries",
            post(save_itinerary_handler::<L>).get(list_itineraries_handler::<L>),
        )
        .route(
            "/api/v1/itineraries/{id}",
            get(get_itinerary_handler::<L>).delete(delete_itinerary_handler::<L>),
        )
        .route("/api/v1/users/register", post(register_handler::<L>))
        .route("/api/v1/users/login", post(login_handler::<L>))
        .route("/api/v1/users/profile", get(profile_handler::<L>))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
