use crate::application::ports::{LlmClient, LlmClientError};

/// Canned three-day plan for local development and tests that only care
/// about pass-through behavior, not content.
pub struct MockLlmClient;

pub const SAMPLE_PLAN: &str = r#"{
  "items": [
    {
      "day": 1,
      "date": "2025-06-01",
      "activities": [
        {
          "time": "09:00",
          "title": "Alfama walking tour",
          "description": "Wander the oldest district of the city.",
          "location": "Alfama, Lisbon",
          "price": 0,
          "currency": "USD",
          "bookingLink": "",
          "isPaid": false
        },
        {
          "time": "13:00",
          "title": "Lunch at Time Out Market",
          "description": "Local food hall with two dozen kitchens.",
          "location": "Mercado da Ribeira, Lisbon",
          "price": 25,
          "currency": "USD",
          "bookingLink": "",
          "isPaid": true
        }
      ]
    },
    {
      "day": 2,
      "date": "2025-06-02",
      "activities": [
        {
          "time": "10:00",
          "title": "Belem Tower",
          "description": "Sixteenth century fortified tower on the Tagus.",
          "location": "Av. Brasilia, Lisbon",
          "price": 15,
          "currency": "USD",
          "bookingLink": "https://example.com/belem",
          "isPaid": true
        }
      ]
    },
    {
      "day": 3,
      "date": "2025-06-03",
      "activities": [
        {
          "time": "09:30",
          "title": "Day trip to Sintra",
          "description": "Palaces and gardens in the Sintra hills.",
          "location": "Sintra",
          "price": 40,
          "currency": "USD",
          "bookingLink": "https://example.com/sintra",
          "isPaid": true
        }
      ]
    }
  ]
}"#;

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete_json(&self, _system: &str, _user: &str) -> Result<String, LlmClientError> {
        Ok(SAMPLE_PLAN.to_string())
    }
}
