use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::application::ports::{ItineraryRepository, RepositoryError, UserRepository};
use crate::domain::{Activity, ActivityId, Itinerary, ItineraryId, User, UserId};

/// Stateful in-memory store for tests and local development without a
/// database. Insertion order doubles as the recency order.
#[derive(Default)]
pub struct InMemoryItineraryRepository {
    items: RwLock<Vec<Itinerary>>,
}

impl InMemoryItineraryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItineraryRepository for InMemoryItineraryRepository {
    async fn save(
        &self,
        owner_id: UserId,
        itinerary: &Itinerary,
        name: Option<&str>,
    ) -> Result<Itinerary, RepositoryError> {
        // Same contract as the Postgres store: fresh identifiers on save,
        // so one generated body can be stored twice as two records.
        let mut stored = itinerary.clone();
        stored.id = ItineraryId::new();
        stored.owner_id = Some(owner_id);
        stored.name = name.map(String::from);
        stored.created_at = Some(Utc::now());
        for day in &mut stored.days {
            for activity in &mut day.activities {
                activity.id = ActivityId::new();
            }
        }

        let mut items = self.items.write().await;
        items.push(stored.clone());
        Ok(stored)
    }

    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Itinerary>, RepositoryError> {
        let items = self.items.read().await;
        Ok(items
            .iter()
            .rev()
            .filter(|i| i.owner_id == Some(owner_id))
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: ItineraryId) -> Result<Option<Itinerary>, RepositoryError> {
        let items = self.items.read().await;
        Ok(items.iter().find(|i| i.id == id).cloned())
    }

    async fn delete(&self, id: ItineraryId) -> Result<(), RepositoryError> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|i| i.id != id);
        if items.len() == before {
            return Err(RepositoryError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn replace_activity(
        &self,
        itinerary_id: ItineraryId,
        activity_id: ActivityId,
        replacement: &Activity,
    ) -> Result<(), RepositoryError> {
        let mut items = self.items.write().await;
        let itinerary = items
            .iter_mut()
            .find(|i| i.id == itinerary_id)
            .ok_or_else(|| RepositoryError::NotFound(itinerary_id.to_string()))?;

        for day in &mut itinerary.days {
            if let Some(activity) = day.activities.iter_mut().find(|a| a.id == activity_id) {
                *activity = replacement.clone();
                return Ok(());
            }
        }

        Err(RepositoryError::NotFound(activity_id.to_string()))
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), RepositoryError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "email already registered: {}",
                user.email
            )));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }
}
