use async_trait::async_trait;

use super::repository_error::RepositoryError;
use crate::domain::{Activity, ActivityId, Itinerary, ItineraryId, UserId};

/// Durable store for itinerary aggregates, scoped by owning user.
///
/// Activity order within a day is persisted through an explicit position
/// column; reads return activities in their original insertion order
/// regardless of how the underlying store orders rows.
#[async_trait]
pub trait ItineraryRepository: Send + Sync {
    /// Stores the aggregate and its day/activity records under fresh
    /// storage-assigned identifiers, attaching the owner and creation
    /// timestamp. Returns the stored aggregate; generation-time ids on the
    /// input are discarded, so saving one body twice yields two records.
    async fn save(
        &self,
        owner_id: UserId,
        itinerary: &Itinerary,
        name: Option<&str>,
    ) -> Result<Itinerary, RepositoryError>;

    /// All itineraries belonging to the owner, most recently created first,
    /// each with its full day/activity tree attached.
    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Itinerary>, RepositoryError>;

    async fn get_by_id(&self, id: ItineraryId) -> Result<Option<Itinerary>, RepositoryError>;

    /// Hard delete, cascading to day and activity records.
    async fn delete(&self, id: ItineraryId) -> Result<(), RepositoryError>;

    /// Swaps a single stored activity wholesale, keeping its position.
    async fn replace_activity(
        &self,
        itinerary_id: ItineraryId,
        activity_id: ActivityId,
        replacement: &Activity,
    ) -> Result<(), RepositoryError>;
}
