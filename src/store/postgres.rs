use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::{BoundingBox, NewVendor, Vendor};

/// Owns the vendor collection. Every mutation of the `vendors` table goes
/// through the operations below; no other component holds a handle to the
/// backing store.
#[derive(Clone)]
pub struct VendorStore {
    pool: PgPool,
}

impl VendorStore {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run pending migrations from the migrations/ directory.
    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Insert a record and return it with its freshly assigned id.
    pub async fn insert(&self, vendor: &NewVendor) -> Result<Vendor, AppError> {
        vendor.validate()?;

        let row = sqlx::query_as::<_, Vendor>(
            r#"INSERT INTO vendors (name, lat, lng, status, type)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id, name, lat, lng, status, type"#,
        )
        .bind(&vendor.name)
        .bind(vendor.lat)
        .bind(vendor.lng)
        .bind(&vendor.status)
        .bind(&vendor.kind)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Point lookup by id.
    pub async fn get(&self, id: i64) -> Result<Option<Vendor>, AppError> {
        let row = sqlx::query_as::<_, Vendor>(
            "SELECT id, name, lat, lng, status, type FROM vendors WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// All records, or the subset whose coordinates fall inside `bounds`
    /// (inclusive on all four edges). Insertion order, so a given store state
    /// always lists the same way.
    ///
    /// Four range predicates over a linear scan are enough at this record
    /// volume; a spatial index would slot in behind the same signature.
    pub async fn list(&self, bounds: Option<&BoundingBox>) -> Result<Vec<Vendor>, AppError> {
        let rows = match bounds {
            Some(b) => {
                sqlx::query_as::<_, Vendor>(
                    r#"SELECT id, name, lat, lng, status, type FROM vendors
                       WHERE lat >= $1 AND lat <= $2 AND lng >= $3 AND lng <= $4
                       ORDER BY id ASC"#,
                )
                .bind(b.min_lat)
                .bind(b.max_lat)
                .bind(b.min_lng)
                .bind(b.max_lng)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Vendor>(
                    "SELECT id, name, lat, lng, status, type FROM vendors ORDER BY id ASC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows)
    }

    /// Replace the status of the record with the given id. `None` when the id
    /// does not exist (a normal outcome, not an error). The single UPDATE
    /// statement keeps the write atomic per record.
    pub async fn update_status(
        &self,
        id: i64,
        status: &str,
    ) -> Result<Option<Vendor>, AppError> {
        let row = sqlx::query_as::<_, Vendor>(
            r#"UPDATE vendors SET status = $2 WHERE id = $1
               RETURNING id, name, lat, lng, status, type"#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Remove the record with the given id. `false` when it was already
    /// absent, so deleting twice is harmless.
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM vendors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Bootstrap convenience: put one example record into an empty store so a
    /// fresh deployment has something to render.
    pub async fn seed_if_empty(&self) -> Result<(), AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM vendors")
            .fetch_one(&self.pool)
            .await?;

        if count == 0 {
            let seeded = self
                .insert(&NewVendor {
                    name: "Fountain".to_string(),
                    lat: 25.0339,
                    lng: 121.5644,
                    status: "success".to_string(),
                    kind: String::new(),
                })
                .await?;
            tracing::info!(id = seeded.id, "Seeded example vendor into empty store");
        }

        Ok(())
    }
}
