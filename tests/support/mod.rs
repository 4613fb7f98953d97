#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use chrono::{Duration as ChronoDuration, NaiveDate};
use tokio::sync::Mutex;

use wayfarer::application::ports::{LlmClient, LlmClientError};
use wayfarer::application::services::{AuthService, ItineraryService, PlannerService};
use wayfarer::domain::{Activity, ActivityId, DayPlan, Itinerary, ItineraryId};
use wayfarer::infrastructure::auth::{BcryptHasher, JwtTokenService};
use wayfarer::infrastructure::persistence::{InMemoryItineraryRepository, InMemoryUserRepository};
use wayfarer::presentation::{AppState, create_router};

pub const TEST_SECRET: &str = "test-signing-secret";
// low cost keeps the hashing tests fast
pub const TEST_BCRYPT_COST: u32 = 4;

/// LLM double that replays queued responses and records every prompt.
pub struct ScriptedLlmClient {
    responses: Mutex<VecDeque<Result<String, LlmClientError>>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedLlmClient {
    pub fn new(responses: Vec<Result<String, LlmClientError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn replying(response: &str) -> Self {
        Self::new(vec![Ok(response.to_string())])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl LlmClient for ScriptedLlmClient {
    async fn complete_json(&self, _system: &str, user: &str) -> Result<String, LlmClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().await.push(user.to_string());
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(LlmClientError::ApiRequestFailed("no scripted response".into())))
    }
}

/// LLM double that never answers within a short planner timeout.
pub struct SlowLlmClient;

#[async_trait::async_trait]
impl LlmClient for SlowLlmClient {
    async fn complete_json(&self, _system: &str, _user: &str) -> Result<String, LlmClientError> {
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        Ok("{}".to_string())
    }
}

pub fn token_service() -> JwtTokenService {
    JwtTokenService::new(TEST_SECRET, ChronoDuration::days(7))
}

/// Full app wired against in-memory stores and the given scripted client.
pub fn create_test_app(llm_client: Arc<ScriptedLlmClient>) -> Router {
    let itinerary_service = Arc::new(ItineraryService::new(Arc::new(
        InMemoryItineraryRepository::new(),
    )));
    let auth_service = Arc::new(AuthService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(BcryptHasher::new(TEST_BCRYPT_COST)),
        Arc::new(token_service()),
    ));
    let planner_service = Arc::new(PlannerService::new(
        llm_client,
        std::time::Duration::from_secs(5),
    ));

    create_router(AppState {
        planner_service,
        itinerary_service,
        auth_service,
    })
}

pub fn date(value: &str) -> NaiveDate {
    value.parse().expect("valid test date")
}

pub fn sample_activity(title: &str, price: f64) -> Activity {
    Activity {
        id: ActivityId::new(),
        time: "10:00".to_string(),
        title: title.to_string(),
        description: format!("{title} description"),
        location: "Lisbon".to_string(),
        price,
        currency: "USD".to_string(),
        booking_link: String::new(),
        is_paid: price > 0.0,
    }
}

/// Two-day itinerary with three activities, unsaved.
pub fn sample_itinerary() -> Itinerary {
    Itinerary {
        id: ItineraryId::new(),
        destination: "Lisbon".to_string(),
        start_date: date("2025-06-01"),
        end_date: date("2025-06-02"),
        budget: Some(500.0),
        owner_id: None,
        name: None,
        created_at: None,
        days: vec![
            DayPlan {
                day: 1,
                date: date("2025-06-01"),
                activities: vec![
                    sample_activity("Alfama walking tour", 0.0),
                    sample_activity("Fado dinner", 60.0),
                ],
            },
            DayPlan {
                day: 2,
                date: date("2025-06-02"),
                activities: vec![sample_activity("Belem Tower", 15.0)],
            },
        ],
    }
}

/// Single-activity envelope as the regeneration prompt requests it.
pub fn replacement_activity_json(title: &str, price: f64) -> String {
    format!(
        r#"{{"activity": {{"time": "14:00", "title": "{title}", "description": "Replacement pick", "location": "Lisbon", "price": {price}, "currency": "USD", "bookingLink": "https://example.com/booking", "isPaid": {is_paid}}}}}"#,
        is_paid = price > 0.0,
    )
}
