use sqlx::SqlitePool;

use sereno_core::models::Slot;
use sereno_core::Error;

#[derive(Clone)]
pub struct SlotRepository {
    pool: SqlitePool,
}

impl SlotRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Slots for a date and service that are intrinsically available and not
    /// currently held by a live reservation, ascending by time-of-day.
    /// A read-only join; an empty result set is not an error.
    pub async fn list_visible(&self, date: &str, service_id: i64) -> Result<Vec<Slot>, Error> {
        let now = chrono::Utc::now();

        let slots = sqlx::query_as::<_, Slot>(
            r#"
            SELECT ts.id, ts.date, ts.time, ts.service_id, ts.available
            FROM time_slots ts
            LEFT JOIN reservations r ON r.slot_id = ts.id AND r.expires_at > ?
            WHERE ts.date = ? AND ts.service_id = ? AND ts.available = 1 AND r.id IS NULL
            ORDER BY ts.time
            "#,
        )
        .bind(now)
        .bind(date)
        .bind(service_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(slots)
    }

    pub async fn insert(
        &self,
        date: &str,
        time: &str,
        service_id: i64,
        available: bool,
    ) -> Result<i64, Error> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO time_slots (date, time, service_id, available) VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(date)
        .bind(time)
        .bind(service_id)
        .bind(available)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }
}
