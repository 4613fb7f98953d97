mod auth_service;
mod itinerary_service;
mod planner_service;

pub use auth_service::{AuthError, AuthService};
pub use itinerary_service::{ItineraryAccessError, ItineraryService};
pub use planner_service::{PlannerError, PlannerService};
