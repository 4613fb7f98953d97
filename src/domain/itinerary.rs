use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{Activity, DayPlan, ItineraryId, UserId};

/// The aggregate root: a full multi-day trip plan.
///
/// `owner_id`, `name` and `created_at` are absent on a freshly generated
/// itinerary and attached by the persistence gateway on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub id: ItineraryId,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Wire name kept from the original API contract.
    #[serde(rename = "items")]
    pub days: Vec<DayPlan>,
}

impl Itinerary {
    /// Total number of activities across all days.
    pub fn activity_count(&self) -> usize {
        self.days.iter().map(|d| d.activities.len()).sum()
    }

    /// Resolves a flat, day-major activity index to `(day, slot)` positions.
    pub fn locate_activity(&self, item_index: usize) -> Option<(usize, usize)> {
        let mut remaining = item_index;
        for (day_index, day) in self.days.iter().enumerate() {
            if remaining < day.activities.len() {
                return Some((day_index, remaining));
            }
            remaining -= day.activities.len();
        }
        None
    }

    pub fn activity_at(&self, day_index: usize, slot: usize) -> Option<&Activity> {
        self.days.get(day_index).and_then(|d| d.activities.get(slot))
    }
}
