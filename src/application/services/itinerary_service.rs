use std::sync::Arc;

use crate::application::ports::{ItineraryRepository, RepositoryError};
use crate::domain::{Activity, Itinerary, ItineraryId, UserId};

/// Persistence orchestration and the single ownership boundary.
///
/// Every id-keyed read or write verifies the stored owner against the
/// requester. A mismatch is `Forbidden`, not `NotFound`: "exists but not
/// yours" and "does not exist" stay distinguishable.
pub struct ItineraryService {
    repository: Arc<dyn ItineraryRepository>,
}

impl ItineraryService {
    pub fn new(repository: Arc<dyn ItineraryRepository>) -> Self {
        Self { repository }
    }

    #[tracing::instrument(skip(self, itinerary), fields(owner_id = %owner_id))]
    pub async fn save(
        &self,
        owner_id: UserId,
        itinerary: Itinerary,
        name: Option<String>,
    ) -> Result<Itinerary, ItineraryAccessError> {
        let stored = self
            .repository
            .save(owner_id, &itinerary, name.as_deref())
            .await?;

        tracing::info!(itinerary_id = %stored.id, "Itinerary saved");
        Ok(stored)
    }

    #[tracing::instrument(skip(self), fields(owner_id = %owner_id))]
    pub async fn list_for_owner(
        &self,
        owner_id: UserId,
    ) -> Result<Vec<Itinerary>, ItineraryAccessError> {
        Ok(self.repository.list_by_owner(owner_id).await?)
    }

    #[tracing::instrument(skip(self), fields(itinerary_id = %id, requester = %requester))]
    pub async fn get_for_owner(
        &self,
        requester: UserId,
        id: ItineraryId,
    ) -> Result<Itinerary, ItineraryAccessError> {
        let itinerary = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ItineraryAccessError::NotFound)?;

        if itinerary.owner_id != Some(requester) {
            return Err(ItineraryAccessError::Forbidden);
        }

        Ok(itinerary)
    }

    #[tracing::instrument(skip(self), fields(itinerary_id = %id, requester = %requester))]
    pub async fn delete_for_owner(
        &self,
        requester: UserId,
        id: ItineraryId,
    ) -> Result<(), ItineraryAccessError> {
        // Ownership check first so a foreign id comes back 403, not 404.
        self.get_for_owner(requester, id).await?;
        self.repository.delete(id).await?;

        tracing::info!(itinerary_id = %id, "Itinerary deleted");
        Ok(())
    }

    /// Persists a regenerated activity and returns the aggregate with the
    /// swap applied. All other days and activities are untouched.
    #[tracing::instrument(skip(self, itinerary, replacement), fields(itinerary_id = %itinerary.id))]
    pub async fn apply_replacement(
        &self,
        mut itinerary: Itinerary,
        day_index: usize,
        slot: usize,
        replacement: Activity,
    ) -> Result<Itinerary, ItineraryAccessError> {
        let replaced_id = itinerary
            .activity_at(day_index, slot)
            .ok_or(ItineraryAccessError::NotFound)?
            .id;

        self.repository
            .replace_activity(itinerary.id, replaced_id, &replacement)
            .await?;

        itinerary.days[day_index].activities[slot] = replacement;
        Ok(itinerary)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ItineraryAccessError {
    #[error("itinerary not found")]
    NotFound,
    #[error("itinerary belongs to another user")]
    Forbidden,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
