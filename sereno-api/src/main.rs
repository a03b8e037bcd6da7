use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use sereno_api::{app, state::AppState};
use sereno_notify::Notifier;
use sereno_store::{
    BookingRepository, CatalogRepository, Db, ReservationRepository, SlotRepository, Sweeper,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sereno_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = sereno_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Sereno API on port {}", config.server.port);

    let db = Db::connect(&config.database.url)
        .await
        .expect("Failed to connect to database");
    db.migrate().await.expect("Failed to run migrations");
    sereno_store::seed::seed_if_empty(&db)
        .await
        .expect("Failed to seed sample data");

    let reservations = ReservationRepository::new(db.pool.clone());

    let sweeper = Sweeper::new(
        reservations.clone(),
        std::time::Duration::from_secs(config.booking.sweep_interval_seconds),
    )
    .spawn();

    let notifier = match (&config.smtp.username, &config.smtp.password) {
        (Some(username), Some(password)) => Notifier::smtp(
            config.smtp.host.clone(),
            config.smtp.port,
            username.clone(),
            password.clone(),
            &config.smtp.from_email,
            &config.smtp.from_name,
        ),
        _ => {
            tracing::info!("SMTP credentials not configured, confirmations will be logged");
            Notifier::log_only(config.smtp.outbox_dir.clone().map(PathBuf::from))
        }
    };

    let app_state = AppState {
        catalog: CatalogRepository::new(db.pool.clone()),
        slots: SlotRepository::new(db.pool.clone()),
        reservations,
        bookings: BookingRepository::new(db.pool.clone()),
        notifier: Arc::new(notifier),
        hold_ttl: chrono::Duration::minutes(config.booking.hold_ttl_minutes),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    sweeper.shutdown().await;
    db.close().await;
    tracing::info!("Shutdown complete");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
