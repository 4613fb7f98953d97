use chrono::NaiveDate;

/// Validated generation input. Construction rejects bad parameters before
/// any upstream call is attempted.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRequest {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: Option<f64>,
    pub preferences: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TripRequestError {
    #[error("destination must not be empty")]
    EmptyDestination,
    #[error("end date must not be before start date")]
    EndBeforeStart,
    #[error("budget must be a positive number")]
    NonPositiveBudget,
}

impl TripRequest {
    pub fn new(
        destination: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        budget: Option<f64>,
        preferences: Vec<String>,
    ) -> Result<Self, TripRequestError> {
        let destination = destination.into();
        if destination.trim().is_empty() {
            return Err(TripRequestError::EmptyDestination);
        }
        if end_date < start_date {
            return Err(TripRequestError::EndBeforeStart);
        }
        if let Some(budget) = budget {
            if budget <= 0.0 {
                return Err(TripRequestError::NonPositiveBudget);
            }
        }

        Ok(Self {
            destination,
            start_date,
            end_date,
            budget,
            preferences,
        })
    }

    /// Trip length in whole days, inclusive of both endpoints.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}
