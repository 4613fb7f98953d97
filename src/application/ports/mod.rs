mod itinerary_repository;
mod llm_client;
mod password_hasher;
mod repository_error;
mod token_service;
mod user_repository;

pub use itinerary_repository::ItineraryRepository;
pub use llm_client::{LlmClient, LlmClientError};
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use repository_error::RepositoryError;
pub use token_service::{TokenError, TokenService};
pub use user_repository::UserRepository;
