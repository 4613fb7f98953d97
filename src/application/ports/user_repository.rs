use async_trait::async_trait;

use super::repository_error::RepositoryError;
use crate::domain::{User, UserId};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new account. Fails with `ConstraintViolation` when the
    /// email is already registered.
    async fn insert(&self, user: &User) -> Result<(), RepositoryError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError>;
}
