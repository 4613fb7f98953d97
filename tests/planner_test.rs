mod support;

use std::sync::Arc;
use std::time::Duration;

use support::{ScriptedLlmClient, SlowLlmClient, date, sample_itinerary, replacement_activity_json};
use wayfarer::application::ports::LlmClientError;
use wayfarer::application::services::{PlannerError, PlannerService};
use wayfarer::domain::TripRequest;
use wayfarer::infrastructure::llm::{MockLlmClient, SAMPLE_PLAN};

fn trip_request() -> TripRequest {
    TripRequest::new(
        "Lisbon",
        date("2025-06-01"),
        date("2025-06-03"),
        Some(500.0),
        vec!["food".to_string(), "history".to_string()],
    )
    .unwrap()
}

fn planner(llm: Arc<ScriptedLlmClient>) -> PlannerService<ScriptedLlmClient> {
    PlannerService::new(llm, Duration::from_secs(5))
}

#[tokio::test]
async fn given_model_plan_when_generating_then_days_pass_through_unchanged() {
    let llm = Arc::new(ScriptedLlmClient::replying(SAMPLE_PLAN));
    let service = planner(Arc::clone(&llm));

    let itinerary = service.generate(&trip_request()).await.unwrap();

    assert_eq!(itinerary.destination, "Lisbon");
    assert_eq!(itinerary.start_date, date("2025-06-01"));
    assert_eq!(itinerary.end_date, date("2025-06-03"));
    assert_eq!(itinerary.budget, Some(500.0));
    assert!(itinerary.owner_id.is_none());

    assert_eq!(itinerary.days.len(), 3);
    assert_eq!(itinerary.days[0].day, 1);
    assert_eq!(itinerary.days[0].date, date("2025-06-01"));
    assert_eq!(itinerary.days[0].activities.len(), 2);
    assert_eq!(itinerary.days[0].activities[0].title, "Alfama walking tour");
    assert_eq!(itinerary.days[2].activities[0].title, "Day trip to Sintra");
    assert_eq!(llm.calls(), 1);
}

#[tokio::test]
async fn given_model_plan_when_generating_then_identifiers_are_fresh_and_unique() {
    let service = planner(Arc::new(ScriptedLlmClient::replying(SAMPLE_PLAN)));

    let itinerary = service.generate(&trip_request()).await.unwrap();

    assert!(!itinerary.id.as_uuid().is_nil());
    let ids: Vec<_> = itinerary
        .days
        .iter()
        .flat_map(|d| d.activities.iter().map(|a| a.id))
        .collect();
    let unique: std::collections::HashSet<_> = ids.iter().copied().collect();
    assert_eq!(unique.len(), ids.len());
    assert_eq!(ids.len(), 4);
}

#[tokio::test]
async fn given_activity_missing_pricing_fields_when_generating_then_defaults_apply() {
    let plan = r#"{
      "items": [
        {
          "day": 1,
          "date": "2025-06-01",
          "activities": [
            {"time": "09:00", "title": "Free stroll", "description": "A walk.", "location": "Old town"}
          ]
        }
      ]
    }"#;
    let service = planner(Arc::new(ScriptedLlmClient::replying(plan)));

    let itinerary = service.generate(&trip_request()).await.unwrap();

    let activity = &itinerary.days[0].activities[0];
    assert_eq!(activity.price, 0.0);
    assert_eq!(activity.currency, "USD");
    assert_eq!(activity.booking_link, "");
    assert!(!activity.is_paid);
}

#[tokio::test]
async fn given_canned_client_when_generating_then_plan_parses_end_to_end() {
    // local runs fall back to this client when no API key is configured
    let service = PlannerService::new(Arc::new(MockLlmClient), Duration::from_secs(5));

    let itinerary = service.generate(&trip_request()).await.unwrap();

    assert_eq!(itinerary.days.len(), 3);
    assert_eq!(itinerary.days[0].activities[0].title, "Alfama walking tour");
}

#[tokio::test]
async fn given_non_json_reply_when_generating_then_malformed_response() {
    let service = planner(Arc::new(ScriptedLlmClient::replying("sorry, no can do")));

    let error = service.generate(&trip_request()).await.unwrap_err();

    assert!(matches!(error, PlannerError::MalformedResponse(_)));
}

#[tokio::test]
async fn given_upstream_failure_when_generating_then_generation_error() {
    let service = planner(Arc::new(ScriptedLlmClient::new(vec![Err(
        LlmClientError::RateLimited,
    )])));

    let error = service.generate(&trip_request()).await.unwrap_err();

    assert!(matches!(
        error,
        PlannerError::Generation(LlmClientError::RateLimited)
    ));
}

#[tokio::test]
async fn given_slow_upstream_when_generating_then_times_out() {
    let service = PlannerService::new(Arc::new(SlowLlmClient), Duration::from_millis(20));

    let error = service.generate(&trip_request()).await.unwrap_err();

    assert!(matches!(error, PlannerError::Timeout(_)));
}

#[tokio::test]
async fn given_trip_parameters_when_generating_then_prompt_carries_them() {
    let llm = Arc::new(ScriptedLlmClient::replying(SAMPLE_PLAN));
    let service = planner(Arc::clone(&llm));

    service.generate(&trip_request()).await.unwrap();

    let prompts = llm.recorded_prompts().await;
    assert_eq!(prompts.len(), 1);
    let prompt = &prompts[0];
    assert!(prompt.contains("3-day"));
    assert!(prompt.contains("Lisbon"));
    assert!(prompt.contains("2025-06-01"));
    assert!(prompt.contains("budget of 500"));
    assert!(prompt.contains("food, history"));
    assert!(prompt.contains("\"items\""));
}

#[tokio::test]
async fn given_no_budget_when_generating_then_prompt_says_so() {
    let llm = Arc::new(ScriptedLlmClient::replying(SAMPLE_PLAN));
    let service = planner(Arc::clone(&llm));
    let request =
        TripRequest::new("Lisbon", date("2025-06-01"), date("2025-06-03"), None, vec![]).unwrap();

    service.generate(&request).await.unwrap();

    let prompts = llm.recorded_prompts().await;
    assert!(prompts[0].contains("no specific budget"));
}

#[tokio::test]
async fn given_flat_index_when_regenerating_then_day_major_positions_resolve() {
    let llm = Arc::new(ScriptedLlmClient::replying(&replacement_activity_json(
        "Tram 28 ride",
        50.0,
    )));
    let service = planner(Arc::clone(&llm));
    let itinerary = sample_itinerary();

    // index 2 is the first activity of day two
    let (day_index, slot, activity) = service
        .regenerate_activity(&itinerary, 2, Some(100.0))
        .await
        .unwrap();

    assert_eq!(day_index, 1);
    assert_eq!(slot, 0);
    assert_eq!(activity.title, "Tram 28 ride");
    assert_eq!(activity.price, 50.0);
    assert!(activity.is_paid);

    let prompts = llm.recorded_prompts().await;
    assert!(prompts[0].contains("Belem Tower"));
    assert!(prompts[0].contains("budget of 100"));
}

#[tokio::test]
async fn given_out_of_range_index_when_regenerating_then_error_without_upstream_call() {
    let llm = Arc::new(ScriptedLlmClient::replying(&replacement_activity_json(
        "Tram 28 ride",
        50.0,
    )));
    let service = planner(Arc::clone(&llm));
    let itinerary = sample_itinerary();

    let error = service
        .regenerate_activity(&itinerary, 3, None)
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        PlannerError::ActivityIndexOutOfRange { index: 3, len: 3 }
    ));
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn given_replacement_when_regenerating_then_id_differs_from_replaced() {
    let service = planner(Arc::new(ScriptedLlmClient::replying(
        &replacement_activity_json("Tram 28 ride", 50.0),
    )));
    let itinerary = sample_itinerary();
    let replaced_id = itinerary.days[0].activities[0].id;

    let (_, _, activity) = service
        .regenerate_activity(&itinerary, 0, None)
        .await
        .unwrap();

    assert_ne!(activity.id, replaced_id);
}
