use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use tracing::info;

use sereno_core::models::{Reservation, Slot};
use sereno_core::Error;

/// The reservation ledger: time-bounded holds acting as the mutual-exclusion
/// mechanism between "slot shown as free" and "slot converted into a
/// booking". At most one live (non-expired) hold may exist per slot.
#[derive(Clone)]
pub struct ReservationRepository {
    pool: SqlitePool,
}

impl ReservationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a hold on a slot. The existence, availability and liveness
    /// checks share one transaction with the insert, so two concurrent calls
    /// for the same slot cannot both succeed.
    pub async fn create_hold(&self, slot_id: i64, ttl: Duration) -> Result<Reservation, Error> {
        let now = Utc::now();
        // Take the write lock at BEGIN. A deferred transaction that reads
        // before writing cannot wait out a concurrent writer and fails with
        // SQLITE_BUSY instead of honoring the busy timeout.
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let slot = sqlx::query_as::<_, Slot>(
            "SELECT id, date, time, service_id, available FROM time_slots WHERE id = ?",
        )
        .bind(slot_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| Error::not_found("slot not found"))?;

        if !slot.available {
            return Err(Error::conflict("slot is not available"));
        }

        let live: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reservations WHERE slot_id = ? AND expires_at > ?",
        )
        .bind(slot_id)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        if live > 0 {
            return Err(Error::conflict("slot is already reserved"));
        }

        let expires_at = now + ttl;
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO reservations (slot_id, reserved_at, expires_at) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(slot_id)
        .bind(now)
        .bind(expires_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Reservation {
            id,
            slot_id,
            reserved_at: now,
            expires_at,
        })
    }

    /// Deletes a hold. Zero rows affected means the hold never existed or was
    /// already removed by the sweeper or the booking coordinator; both cases
    /// surface as `NotFound`.
    pub async fn cancel(&self, id: i64) -> Result<(), Error> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("reservation not found"));
        }

        Ok(())
    }

    /// Removes every hold whose expiry is in the past. Returns the number of
    /// rows purged. Called by the sweeper; callable directly from tests.
    pub async fn purge_expired(&self) -> Result<u64, Error> {
        let now = Utc::now();
        let result = sqlx::query("DELETE FROM reservations WHERE expires_at < ?")
            .bind(now)
            .execute(&self.pool)
            .await?;

        let purged = result.rows_affected();
        if purged > 0 {
            info!("Cleaned up {} expired reservations", purged);
        }

        Ok(purged)
    }
}
