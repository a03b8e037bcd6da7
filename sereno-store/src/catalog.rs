use sqlx::SqlitePool;

use sereno_core::models::Service;
use sereno_core::Error;

/// Read-mostly store of service definitions. Seeded once at startup.
#[derive(Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Service>, Error> {
        let services = sqlx::query_as::<_, Service>(
            "SELECT id, name, duration, price FROM services ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(services)
    }

    pub async fn insert(&self, name: &str, duration: i64, price: f64) -> Result<i64, Error> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO services (name, duration, price) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(name)
        .bind(duration)
        .bind(price)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    pub async fn count(&self) -> Result<i64, Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM services")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
