use std::sync::Arc;

use crate::application::ports::LlmClient;
use crate::application::services::{AuthService, ItineraryService, PlannerService};

pub struct AppState<L>
where
    L: LlmClient,
{
    pub planner_service: Arc<PlannerService<L>>,
    pub itinerary_service: Arc<ItineraryService>,
    pub auth_service: Arc<AuthService>,
}

impl<L> Clone for AppState<L>
where
    L: LlmClient,
{
    fn clone(&self) -> Self {
        Self {
            planner_service: Arc::clone(&self.planner_service),
            itinerary_service: Arc::clone(&self.itinerary_service),
            auth_service: Arc::clone(&self.auth_service),
        }
    }
}
