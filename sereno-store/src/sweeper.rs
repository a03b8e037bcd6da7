use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::reservations::ReservationRepository;

/// Background task purging expired holds on a fixed interval. Purely
/// advisory cleanup: every ledger read is itself expiry-filtered, so
/// correctness never depends on the sweeper running promptly.
pub struct Sweeper {
    reservations: ReservationRepository,
    interval: Duration,
}

pub struct SweeperHandle {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Sweeper {
    pub fn new(reservations: ReservationRepository, interval: Duration) -> Self {
        Self {
            reservations,
            interval,
        }
    }

    /// Spawns the sweep loop. The returned handle stops it deterministically.
    pub fn spawn(self) -> SweeperHandle {
        let (shutdown, mut rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            // The first tick fires immediately; skip it so a fresh process
            // does not sweep before serving.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(err) = self.reservations.purge_expired().await {
                            error!("Error during cleanup: {}", err);
                        }
                    }
                    _ = rx.changed() => break,
                }
            }
        });

        info!("Started cleanup job for expired reservations");

        SweeperHandle { shutdown, handle }
    }
}

impl SweeperHandle {
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        let _ = self.handle.await;
    }
}
