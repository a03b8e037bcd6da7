use chrono::{Duration, Utc};
use rand::Rng;
use tracing::info;

use sereno_core::Error;

use crate::catalog::CatalogRepository;
use crate::database::Db;
use crate::slots::SlotRepository;

/// Working window for generated slots: 09:00 to 18:00.
const OPENING_MINUTE: i64 = 9 * 60;
const CLOSING_MINUTE: i64 = 18 * 60;
const SEED_DAYS: i64 = 30;

/// Seeds the catalog and generates slots for the next 30 days when the
/// services table is empty. Safe to call on every startup.
pub async fn seed_if_empty(db: &Db) -> Result<(), Error> {
    let catalog = CatalogRepository::new(db.pool.clone());

    if catalog.count().await? > 0 {
        info!("Sample data already exists, skipping seed");
        return Ok(());
    }

    let services = [
        ("Swedish Massage", 60, 50.0),
        ("Deep Tissue", 90, 70.0),
        ("Hot Stone", 60, 65.0),
        ("Sports Massage", 45, 45.0),
    ];

    for (name, duration, price) in services {
        catalog.insert(name, duration, price).await?;
    }

    generate_slots(db).await?;

    info!("Sample data seeded successfully");
    Ok(())
}

/// One slot every `duration` minutes per service per day within the working
/// window, with roughly 30 percent marked unavailable to stand in for
/// bookings made outside this system.
async fn generate_slots(db: &Db) -> Result<(), Error> {
    let catalog = CatalogRepository::new(db.pool.clone());
    let slots = SlotRepository::new(db.pool.clone());
    let services = catalog.list().await?;

    let mut rng = rand::thread_rng();
    let today = Utc::now().date_naive();

    for day in 0..SEED_DAYS {
        let date = (today + Duration::days(day)).format("%Y-%m-%d").to_string();

        for service in &services {
            let mut start = OPENING_MINUTE;
            while start + service.duration <= CLOSING_MINUTE {
                let time = format!("{:02}:{:02}", start / 60, start % 60);
                let available = rng.gen::<f32>() > 0.3;
                slots.insert(&date, &time, service.id, available).await?;
                start += service.duration;
            }
        }
    }

    Ok(())
}
