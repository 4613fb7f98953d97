use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::{Activity, ActivityId, DayPlan, Itinerary, ItineraryId, TripRequest};

const SYSTEM_PROMPT: &str =
    "You are a travel planning assistant that creates detailed, personalized itineraries. \
     Always respond with a single JSON object and nothing else.";

/// Builds prompts, invokes the text-generation port and turns the structured
/// payload into the domain model. Nothing is persisted here.
pub struct PlannerService<L>
where
    L: LlmClient,
{
    llm_client: Arc<L>,
    timeout: Duration,
}

impl<L> PlannerService<L>
where
    L: LlmClient,
{
    pub fn new(llm_client: Arc<L>, timeout: Duration) -> Self {
        Self {
            llm_client,
            timeout,
        }
    }

    /// Generates a day-by-day plan for the given trip parameters.
    ///
    /// Day ordinals, dates and activity order are passed through exactly as
    /// the model returned them; only identifiers are assigned fresh, since
    /// the upstream service is not trusted to supply stable unique ids.
    #[tracing::instrument(skip(self, request), fields(destination = %request.destination))]
    pub async fn generate(&self, request: &TripRequest) -> Result<Itinerary, PlannerError> {
        let prompt = build_generation_prompt(request);
        let content = self.complete(&prompt).await?;

        let payload: PlanPayload = serde_json::from_str(&content)
            .map_err(|e| PlannerError::MalformedResponse(e.to_string()))?;

        let days = payload
            .items
            .into_iter()
            .map(|day| DayPlan {
                day: day.day,
                date: day.date,
                activities: day
                    .activities
                    .into_iter()
                    .map(ActivityPayload::into_activity)
                    .collect(),
            })
            .collect::<Vec<_>>();

        tracing::info!(days = days.len(), "Itinerary generated");

        Ok(Itinerary {
            id: ItineraryId::new(),
            destination: request.destination.clone(),
            start_date: request.start_date,
            end_date: request.end_date,
            budget: request.budget,
            owner_id: None,
            name: None,
            created_at: None,
            days,
        })
    }

    /// Produces a single replacement for the activity at the flat, day-major
    /// `item_index` of an existing itinerary. Returns the day/slot positions
    /// alongside the fresh activity so the caller can apply the swap; every
    /// other day and activity is left untouched.
    #[tracing::instrument(skip(self, itinerary), fields(itinerary_id = %itinerary.id))]
    pub async fn regenerate_activity(
        &self,
        itinerary: &Itinerary,
        item_index: usize,
        budget: Option<f64>,
    ) -> Result<(usize, usize, Activity), PlannerError> {
        let (day_index, slot) = itinerary.locate_activity(item_index).ok_or_else(|| {
            PlannerError::ActivityIndexOutOfRange {
                index: item_index,
                len: itinerary.activity_count(),
            }
        })?;

        // locate_activity guarantees both lookups succeed
        let day = &itinerary.days[day_index];
        let replaced = &day.activities[slot];

        let prompt = build_regeneration_prompt(&itinerary.destination, day.date, replaced, budget);
        let content = self.complete(&prompt).await?;

        let payload: ActivityEnvelope = serde_json::from_str(&content)
            .map_err(|e| PlannerError::MalformedResponse(e.to_string()))?;

        tracing::info!(day = day.day, slot, "Activity regenerated");

        Ok((day_index, slot, payload.activity.into_activity()))
    }

    async fn complete(&self, prompt: &str) -> Result<String, PlannerError> {
        tokio::time::timeout(self.timeout, self.llm_client.complete_json(SYSTEM_PROMPT, prompt))
            .await
            .map_err(|_| PlannerError::Timeout(self.timeout))?
            .map_err(PlannerError::Generation)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("activity index {index} out of range for {len} activities")]
    ActivityIndexOutOfRange { index: usize, len: usize },
    #[error("generation failed: {0}")]
    Generation(LlmClientError),
    #[error("generation timed out after {0:?}")]
    Timeout(Duration),
    #[error("malformed generation payload: {0}")]
    MalformedResponse(String),
}

fn build_generation_prompt(request: &TripRequest) -> String {
    let budget_text = match request.budget {
        Some(budget) => format!("with a budget of {budget}"),
        None => "with no specific budget".to_string(),
    };
    let preferences_text = if request.preferences.is_empty() {
        String::new()
    } else {
        format!(
            "The traveler has the following preferences: {}.\n",
            request.preferences.join(", ")
        )
    };
    let budget_fit = if request.budget.is_some() {
        "Ensure the total cost of activities fits within the specified budget.\n"
    } else {
        ""
    };

    format!(
        "Create a detailed {days}-day travel itinerary for {destination} from {start} to {end} {budget_text}.\n\
         {preferences_text}\
         For each activity, include a specific time, a descriptive title, a brief description, \
         the exact location, price information, currency, and a booking link if applicable.\n\
         Format the response as a JSON object with the following structure:\n\
         {{\"items\": [{{\"day\": 1, \"date\": \"YYYY-MM-DD\", \"activities\": [{{\"time\": \"HH:MM\", \
         \"title\": \"Activity name\", \"description\": \"Brief description\", \"location\": \"Specific location\", \
         \"price\": 0, \"currency\": \"USD\", \"bookingLink\": \"\", \"isPaid\": false}}]}}]}}\n\
         Make sure to include a mix of popular attractions, local experiences, and dining options.\n\
         If an activity is paid, provide accurate price information and booking links when possible.\n\
         {budget_fit}",
        days = request.duration_days(),
        destination = request.destination,
        start = request.start_date,
        end = request.end_date,
    )
}

fn build_regeneration_prompt(
    destination: &str,
    date: NaiveDate,
    replaced: &Activity,
    budget: Option<f64>,
) -> String {
    let budget_text = match budget {
        Some(budget) => format!("Keep the price within a budget of {budget}."),
        None => "There is no specific budget.".to_string(),
    };

    format!(
        "Suggest one alternative activity for a traveler in {destination} on {date}, \
         replacing \"{title}\" at {time}. {budget_text}\n\
         Format the response as a JSON object with the following structure:\n\
         {{\"activity\": {{\"time\": \"HH:MM\", \"title\": \"Activity name\", \
         \"description\": \"Brief description\", \"location\": \"Specific location\", \
         \"price\": 0, \"currency\": \"USD\", \"bookingLink\": \"\", \"isPaid\": false}}}}\n\
         If the activity is paid, provide accurate price information and a booking link when possible.",
        title = replaced.title,
        time = replaced.time,
    )
}

#[derive(Deserialize)]
struct PlanPayload {
    items: Vec<DayPayload>,
}

#[derive(Deserialize)]
struct DayPayload {
    day: u32,
    date: NaiveDate,
    activities: Vec<ActivityPayload>,
}

#[derive(Deserialize)]
struct ActivityEnvelope {
    activity: ActivityPayload,
}

/// Activity as the model returns it: no identifier, placeholder defaults for
/// the pricing fields the model sometimes omits.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActivityPayload {
    time: String,
    title: String,
    description: String,
    location: String,
    #[serde(default)]
    price: f64,
    #[serde(default = "default_currency")]
    currency: String,
    #[serde(default)]
    booking_link: String,
    #[serde(default)]
    is_paid: bool,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl ActivityPayload {
    fn into_activity(self) -> Activity {
        let activity = Activity {
            id: ActivityId::new(),
            time: self.time,
            title: self.title,
            description: self.description,
            location: self.location,
            price: self.price,
            currency: self.currency,
            booking_link: self.booking_link,
            is_paid: self.is_paid,
        };

        if activity.has_inconsistent_pricing() {
            tracing::warn!(
                title = %activity.title,
                price = activity.price,
                is_paid = activity.is_paid,
                "Paid flag disagrees with price"
            );
        }

        activity
    }
}
