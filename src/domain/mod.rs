mod activity;
mod activity_id;
mod day_plan;
mod itinerary;
mod itinerary_id;
mod trip_request;
mod user;
mod user_id;

pub use activity::Activity;
pub use activity_id::ActivityId;
pub use day_plan::DayPlan;
pub use itinerary::Itinerary;
pub use itinerary_id::ItineraryId;
pub use trip_request::{TripRequest, TripRequestError};
pub use user::{Principal, User};
pub use user_id::UserId;
