use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{ItineraryRepository, RepositoryError};
use crate::domain::{Activity, ActivityId, DayPlan, Itinerary, ItineraryId, UserId};

pub struct PgItineraryRepository {
    pool: PgPool,
}

impl PgItineraryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_days(&self, itinerary_id: Uuid) -> Result<Vec<DayPlan>, RepositoryError> {
        let day_rows = sqlx::query(
            r#"
            SELECT id, day_number, date
            FROM itinerary_days
            WHERE itinerary_id = $1
            ORDER BY day_number
            "#,
        )
        .bind(itinerary_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        let mut days = Vec::with_capacity(day_rows.len());
        for day_row in day_rows {
            let day_id: Uuid = day_row.get("id");
            let day_number: i32 = day_row.get("day_number");
            let date: NaiveDate = day_row.get("date");

            // position is the sort key; row order in the store is not trusted
            let activity_rows = sqlx::query(
                r#"
                SELECT id, time, title, description, location, price, currency,
                       booking_link, is_paid
                FROM itinerary_activities
                WHERE day_id = $1
                ORDER BY position
                "#,
            )
            .bind(day_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

            days.push(DayPlan {
                day: day_number as u32,
                date,
                activities: activity_rows.iter().map(activity_from_row).collect(),
            });
        }

        Ok(days)
    }

    fn itinerary_from_row(row: &PgRow) -> Itinerary {
        let id: Uuid = row.get("id");
        let owner_id: Uuid = row.get("owner_id");
        let created_at: DateTime<Utc> = row.get("created_at");

        Itinerary {
            id: ItineraryId::from_uuid(id),
            destination: row.get("destination"),
            start_date: row.get("start_date"),
            end_date: row.get("end_date"),
            budget: row.get("budget"),
            owner_id: Some(UserId::from_uuid(owner_id)),
            name: row.get("name"),
            created_at: Some(created_at),
            days: Vec::new(),
        }
    }
}

/// Checked conversion into the INT sort columns. Upstream payloads are not
/// trusted to keep ordinals in range, and a wrapped negative would silently
/// reorder on read.
fn ordinal_column<T>(value: T, what: &str) -> Result<i32, RepositoryError>
where
    T: TryInto<i32> + std::fmt::Display + Copy,
{
    value.try_into().map_err(|_| {
        RepositoryError::ConstraintViolation(format!("{what} {value} exceeds storage range"))
    })
}

fn activity_from_row(row: &PgRow) -> Activity {
    let id: Uuid = row.get("id");
    Activity {
        id: ActivityId::from_uuid(id),
        time: row.get("time"),
        title: row.get("title"),
        description: row.get("description"),
        location: row.get("location"),
        price: row.get("price"),
        currency: row.get("currency"),
        booking_link: row.get("booking_link"),
        is_paid: row.get("is_paid"),
    }
}

#[async_trait]
impl ItineraryRepository for PgItineraryRepository {
    #[instrument(skip(self, itinerary), fields(itinerary_id = %itinerary.id, owner_id = %owner_id))]
    async fn save(
        &self,
        owner_id: UserId,
        itinerary: &Itinerary,
        name: Option<&str>,
    ) -> Result<Itinerary, RepositoryError> {
        // Identifiers on the incoming aggregate came from the generation
        // step; the store assigns its own so the same generated body can be
        // saved more than once without colliding.
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

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO itineraries
                (id, owner_id, name, destination, start_date, end_date, budget, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(stored.id.as_uuid())
        .bind(owner_id.as_uuid())
        .bind(name)
        .bind(&stored.destination)
        .bind(stored.start_date)
        .bind(stored.end_date)
        .bind(stored.budget)
        .bind(stored.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        for day in &stored.days {
            let day_id = Uuid::new_v4();
            sqlx::query(
                r#"
                INSERT INTO itinerary_days (id, itinerary_id, day_number, date)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(day_id)
            .bind(stored.id.as_uuid())
            .bind(ordinal_column(day.day, "day number")?)
            .bind(day.date)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

            for (position, activity) in day.activities.iter().enumerate() {
                sqlx::query(
                    r#"
                    INSERT INTO itinerary_activities
                        (id, day_id, position, time, title, description, location,
                         price, currency, booking_link, is_paid)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                    "#,
                )
                .bind(activity.id.as_uuid())
                .bind(day_id)
                .bind(ordinal_column(position, "activity position")?)
                .bind(&activity.time)
                .bind(&activity.title)
                .bind(&activity.description)
                .bind(&activity.location)
                .bind(activity.price)
                .bind(&activity.currency)
                .bind(&activity.booking_link)
                .bind(activity.is_paid)
                .execute(&mut *tx)
                .await
                .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
            }
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(stored)
    }

    #[instrument(skip(self), fields(owner_id = %owner_id))]
    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Itinerary>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, owner_id, name, destination, start_date, end_date, budget, created_at
            FROM itineraries
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        let mut itineraries = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut itinerary = Self::itinerary_from_row(row);
            itinerary.days = self.load_days(itinerary.id.as_uuid()).await?;
            itineraries.push(itinerary);
        }

        Ok(itineraries)
    }

    #[instrument(skip(self), fields(itinerary_id = %id))]
    async fn get_by_id(&self, id: ItineraryId) -> Result<Option<Itinerary>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, owner_id, name, destination, start_date, end_date, budget, created_at
            FROM itineraries
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        match row {
            Some(row) => {
                let mut itinerary = Self::itinerary_from_row(&row);
                itinerary.days = self.load_days(id.as_uuid()).await?;
                Ok(Some(itinerary))
            }
            None => Ok(None),
        }
    }

    #[instrument(skip(self), fields(itinerary_id = %id))]
    async fn delete(&self, id: ItineraryId) -> Result<(), RepositoryError> {
        // day and activity rows go with it via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM itineraries WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id.to_string()));
        }

        Ok(())
    }

    #[instrument(skip(self, replacement), fields(itinerary_id = %itinerary_id, activity_id = %activity_id))]
    async fn replace_activity(
        &self,
        itinerary_id: ItineraryId,
        activity_id: ActivityId,
        replacement: &Activity,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE itinerary_activities
            SET id = $1, time = $2, title = $3, description = $4, location = $5,
                price = $6, currency = $7, booking_link = $8, is_paid = $9
            WHERE id = $10
              AND day_id IN (SELECT id FROM itinerary_days WHERE itinerary_id = $11)
            "#,
        )
        .bind(replacement.id.as_uuid())
        .bind(&replacement.time)
        .bind(&replacement.title)
        .bind(&replacement.description)
        .bind(&replacement.location)
        .bind(replacement.price)
        .bind(&replacement.currency)
        .bind(&replacement.booking_link)
        .bind(replacement.is_paid)
        .bind(activity_id.as_uuid())
        .bind(itinerary_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(activity_id.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_small_ordinal_when_converting_then_value_passes_through() {
        assert_eq!(ordinal_column(3u32, "day number").unwrap(), 3);
        assert_eq!(ordinal_column(0usize, "activity position").unwrap(), 0);
    }

    #[test]
    fn given_ordinal_beyond_int_range_when_converting_then_constraint_violation() {
        let error = ordinal_column(u32::MAX, "day number").unwrap_err();
        assert!(matches!(error, RepositoryError::ConstraintViolation(_)));
    }
}
