use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::application::ports::RepositoryError;

#[instrument(skip(url))]
pub async fn create_pool(url: &str, max_connections: u32) -> Result<PgPool, RepositoryError> {
    let mut retries = 5;
    let mut delay = Duration::from_millis(500);

    loop {
        match PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
        {
            Ok(pool) => {
                info!("PostgreSQL connection pool established");
                return Ok(pool);
            }
            Err(e) if retries > 0 => {
                retries -= 1;
                warn!(
                    error = %e,
                    retries_left = retries,
                    delay_ms = delay.as_millis(),
                    "PostgreSQL connection failed, retrying"
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
            Err(e) => {
                return Err(RepositoryError::ConnectionFailed(e.to_string()));
            }
        }
    }
}

/// Creates the schema on startup. Idempotent; stands in for migration
/// tooling, which is out of scope.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), RepositoryError> {
    const STATEMENTS: &[&str] = &[
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS itineraries (
            id UUID PRIMARY KEY,
            owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            name TEXT,
            destination TEXT NOT NULL,
            start_date DATE NOT NULL,
            end_date DATE NOT NULL,
            budget DOUBLE PRECISION,
            created_at TIMESTAMPTZ NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS itinerary_days (
            id UUID PRIMARY KEY,
            itinerary_id UUID NOT NULL REFERENCES itineraries(id) ON DELETE CASCADE,
            day_number INT NOT NULL,
            date DATE NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS itinerary_activities (
            id UUID PRIMARY KEY,
            day_id UUID NOT NULL REFERENCES itinerary_days(id) ON DELETE CASCADE,
            position INT NOT NULL,
            time TEXT NOT NULL,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            location TEXT NOT NULL,
            price DOUBLE PRECISION NOT NULL,
            currency TEXT NOT NULL,
            booking_link TEXT NOT NULL,
            is_paid BOOLEAN NOT NULL
        )
        "#,
    ];

    for statement in STATEMENTS {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
    }

    info!("Database schema ensured");
    Ok(())
}
