use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        trip::{NewTrip, Trip, TripStats},
        user::User,
    },
};

/// Repository over the users/trips tables. This is the collaborator boundary
/// the web layer shares with the chat pipeline; trips are append-only and
/// users are never mutated after first contact.
#[derive(Clone)]
pub struct TripStore {
    db: DbPool,
}

impl TripStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn find_user_by_alias(&self, alias: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE alias = ?")
            .bind(alias)
            .fetch_optional(&self.db)
            .await?;
        Ok(user)
    }

    /// Conditional insert keyed on the alias unique index. Returns `None`
    /// when a concurrent request won the insert; the caller falls back to a
    /// lookup instead of creating a second identity.
    pub async fn insert_user(&self, alias: &str, display_name: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (uuid, alias, display_name, is_anonymous, created_at) \
             VALUES (?, ?, ?, 1, ?) \
             ON CONFLICT(alias) DO NOTHING \
             RETURNING *",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(alias)
        .bind(display_name)
        .bind(Utc::now())
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    pub async fn create_trip(&self, user_id: i64, trip: &NewTrip) -> Result<Trip, AppError> {
        let saved = sqlx::query_as::<_, Trip>(
            "INSERT INTO trips \
             (uuid, user_id, origin, destination, transport_mode, date, time, co_travelers, notes, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING *",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user_id)
        .bind(&trip.origin)
        .bind(&trip.destination)
        .bind(&trip.transport_mode)
        .bind(&trip.date)
        .bind(&trip.time)
        .bind(trip.co_travelers)
        .bind(&trip.notes)
        .bind(Utc::now())
        .fetch_one(&self.db)
        .await?;
        Ok(saved)
    }

    pub async fn list_user_trips(&self, user_id: i64) -> Result<Vec<Trip>, AppError> {
        let trips = sqlx::query_as::<_, Trip>(
            "SELECT * FROM trips WHERE user_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;
        Ok(trips)
    }

    pub async fn trip_stats(&self, user_id: i64) -> Result<TripStats, AppError> {
        let (total_trips, total_co_travelers): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(co_travelers), 0) FROM trips WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;

        let most_used_transport: Option<String> = sqlx::query_scalar(
            "SELECT transport_mode FROM trips WHERE user_id = ? \
             GROUP BY transport_mode ORDER BY COUNT(*) DESC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(TripStats {
            total_trips,
            most_used_transport: most_used_transport.unwrap_or_else(|| "None".to_string()),
            total_co_travelers,
        })
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.db)
            .await?;
        Ok(())
    }
}
