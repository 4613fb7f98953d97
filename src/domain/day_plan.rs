use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Activity;

/// One calendar day of an itinerary. Activity order is meaningful and is
/// preserved end to end; it is never re-sorted for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// 1-based ordinal within the itinerary.
    pub day: u32,
    pub date: NaiveDate,
    pub activities: Vec<Activity>,
}
