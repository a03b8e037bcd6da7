pub mod app_config;
pub mod bookings;
pub mod catalog;
pub mod database;
pub mod reservations;
pub mod seed;
pub mod slots;
pub mod sweeper;

pub use bookings::BookingRepository;
pub use catalog::CatalogRepository;
pub use database::Db;
pub use reservations::ReservationRepository;
pub use slots::SlotRepository;
pub use sweeper::{Sweeper, SweeperHandle};
