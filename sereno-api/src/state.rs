use std::sync::Arc;

use sereno_notify::Notifier;
use sereno_store::{BookingRepository, CatalogRepository, ReservationRepository, SlotRepository};

#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogRepository,
    pub slots: SlotRepository,
    pub reservations: ReservationRepository,
    pub bookings: BookingRepository,
    pub notifier: Arc<Notifier>,
    /// How long a new hold stays live.
    pub hold_ttl: chrono::Duration,
}
