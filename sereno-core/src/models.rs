use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A massage service offered by the studio. Seeded at startup, immutable
/// afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Service {
    pub id: i64,
    pub name: String,
    /// Minutes.
    pub duration: i64,
    /// Euros.
    pub price: f64,
}

/// A bookable (date, time, service) tuple. `available` is the intrinsic
/// availability flag set at generation time; a slot is visible to new
/// reservations only if this flag is true and no live hold exists for it.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Slot {
    pub id: i64,
    /// YYYY-MM-DD.
    pub date: String,
    /// HH:MM, 24-hour.
    pub time: String,
    pub service_id: i64,
    pub available: bool,
}

/// A time-bounded exclusive hold on a slot. Never mutated after creation:
/// it is consumed by the booking coordinator, removed by the sweeper once
/// expired, or cancelled by the client.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reservation {
    pub id: i64,
    pub slot_id: i64,
    pub reserved_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// A confirmed booking. Created exactly once per successful coordinator run;
/// never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Booking {
    pub id: i64,
    pub reference: String,
    pub client_name: String,
    pub email: String,
    pub phone: String,
    pub service_id: i64,
    pub date: String,
    pub time_slot: String,
    pub created_at: DateTime<Utc>,
}

/// A booking joined with its service for display and confirmation e-mails.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BookingDetail {
    pub id: i64,
    pub reference: String,
    pub client_name: String,
    pub email: String,
    pub phone: String,
    pub service_id: i64,
    pub date: String,
    pub time_slot: String,
    pub created_at: DateTime<Utc>,
    pub service_name: String,
    pub duration: i64,
    pub price: f64,
}

impl BookingDetail {
    pub fn booking(&self) -> Booking {
        Booking {
            id: self.id,
            reference: self.reference.clone(),
            client_name: self.client_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            service_id: self.service_id,
            date: self.date.clone(),
            time_slot: self.time_slot.clone(),
            created_at: self.created_at,
        }
    }
}

/// Request to convert a hold into a confirmed booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub reservation_id: i64,
    pub client_name: String,
    pub email: String,
    pub phone: String,
    pub service_id: i64,
    pub date: String,
    pub time_slot: String,
}
