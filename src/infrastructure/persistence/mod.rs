mod in_memory;
mod pg_itinerary_repository;
mod pg_pool;
mod pg_user_repository;

pub use in_memory::{InMemoryItineraryRepository, InMemoryUserRepository};
pub use pg_itinerary_repository::PgItineraryRepository;
pub use pg_pool::{create_pool, ensure_schema};
pub use pg_user_repository::PgUserRepository;
