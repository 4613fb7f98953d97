use serde::{Deserialize, Serialize};

use super::ActivityId;

/// One bookable or free action within a day. Immutable once created;
/// regeneration replaces the whole value.
///
/// `is_paid` and `price` are stored independently: upstream payloads are
/// allowed to disagree, and the parser only warns about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: ActivityId,
    /// Free text or HH:MM.
    pub time: String,
    pub title: String,
    pub description: String,
    /// Free-text address or place name.
    pub location: String,
    /// 0 if free.
    pub price: f64,
    /// Three-letter currency code.
    pub currency: String,
    /// URL, or empty string when not bookable.
    pub booking_link: String,
    pub is_paid: bool,
}

impl Activity {
    /// True when the paid flag contradicts the price.
    pub fn has_inconsistent_pricing(&self) -> bool {
        self.is_paid != (self.price > 0.0)
    }
}
