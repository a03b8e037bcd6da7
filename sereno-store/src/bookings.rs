use chrono::Utc;
use sqlx::SqlitePool;
use tracing::warn;

use sereno_core::models::{BookingDetail, BookingRequest, Reservation};
use sereno_core::reference::booking_reference;
use sereno_core::Error;

/// Reference collisions abort the whole transaction; the recount on retry
/// picks the next free sequence.
const MAX_REFERENCE_RETRIES: u32 = 3;

#[derive(Clone)]
pub struct BookingRepository {
    pool: SqlitePool,
}

impl BookingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The booking coordinator. Validates the reservation, generates the
    /// reference, inserts the booking, retires the slot and consumes the
    /// hold, all inside one transaction. Any failure rolls the unit back.
    ///
    /// The per-date sequence is a read-count-then-format inside the
    /// transaction; the UNIQUE index on `bookings.reference` is the hard
    /// uniqueness guarantee, and a constraint violation retries the whole
    /// transaction with a fresh count.
    pub async fn commit(&self, req: &BookingRequest) -> Result<BookingDetail, Error> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.try_commit(req).await {
                Err(Error::Database(err))
                    if is_unique_violation(&err) && attempt < MAX_REFERENCE_RETRIES =>
                {
                    warn!(
                        reservation_id = req.reservation_id,
                        attempt, "booking reference collision, retrying"
                    );
                }
                other => return other,
            }
        }
    }

    async fn try_commit(&self, req: &BookingRequest) -> Result<BookingDetail, Error> {
        let now = Utc::now();
        // Take the write lock at BEGIN so concurrent commits queue on the
        // busy timeout instead of failing SQLITE_BUSY on the read-to-write
        // upgrade.
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let reservation = sqlx::query_as::<_, Reservation>(
            "SELECT id, slot_id, reserved_at, expires_at FROM reservations WHERE id = ? AND expires_at > ?",
        )
        .bind(req.reservation_id)
        .bind(now)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| Error::not_found("reservation not found or expired"))?;

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE date = ?")
            .bind(&req.date)
            .fetch_one(&mut *tx)
            .await?;
        let reference = booking_reference(&req.date, existing + 1);

        let booking_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO bookings (reference, client_name, email, phone, service_id, date, time_slot, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&reference)
        .bind(&req.client_name)
        .bind(&req.email)
        .bind(&req.phone)
        .bind(req.service_id)
        .bind(&req.date)
        .bind(&req.time_slot)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE time_slots SET available = 0 WHERE id = ?")
            .bind(reservation.slot_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM reservations WHERE id = ?")
            .bind(reservation.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        self.get_detail(booking_id).await
    }

    /// The booking joined with its service for display.
    pub async fn get_detail(&self, booking_id: i64) -> Result<BookingDetail, Error> {
        let detail = sqlx::query_as::<_, BookingDetail>(
            r#"
            SELECT b.id, b.reference, b.client_name, b.email, b.phone,
                   b.service_id, b.date, b.time_slot, b.created_at,
                   s.name AS service_name, s.duration, s.price
            FROM bookings b
            JOIN services s ON b.service_id = s.id
            WHERE b.id = ?
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::not_found("booking not found"))?;

        Ok(detail)
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
