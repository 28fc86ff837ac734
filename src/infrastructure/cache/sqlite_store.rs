use crate::application::ports::cache_store::LocalCacheStore;
use crate::domain::entities::{Dataset, Measurement};
use crate::domain::value_objects::{DatasetId, MeasurementId, Slug};
use crate::infrastructure::cache::mappers::dataset_from_rows;
use crate::infrastructure::cache::rows::{DatasetRow, MeasurementRow, ViewRow};
use crate::infrastructure::database::DbPool;
use crate::shared::error::AppError;
use async_trait::async_trait;
use sqlx::{Sqlite, Transaction};
use std::collections::HashMap;
use tokio::sync::watch;

const DATASET_COLUMNS: &str = "id, slug, title, description, unit, is_optimistic";

/// SQLite-backed cache store. Every multi-row write runs inside one
/// transaction; the revision channel bumps after each commit so live
/// queries recompute.
pub struct SqliteCacheStore {
    pool: DbPool,
    revision: watch::Sender<u64>,
}

impl SqliteCacheStore {
    pub fn new(pool: DbPool) -> Self {
        let (revision, _) = watch::channel(0);
        Self { pool, revision }
    }

    fn bump_revision(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    async fn put_dataset_tx(
        tx: &mut Transaction<'_, Sqlite>,
        dataset: &Dataset,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO datasets (id, slug, title, description, unit, is_optimistic)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(id) DO UPDATE SET
                slug = excluded.slug,
                title = excluded.title,
                description = excluded.description,
                unit = excluded.unit,
                is_optimistic = excluded.is_optimistic
            "#,
        )
        .bind(dataset.id.as_str())
        .bind(dataset.slug.as_str())
        .bind(&dataset.title)
        .bind(&dataset.description)
        .bind(dataset.unit.as_str())
        .bind(dataset.is_optimistic)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Delete-all-children, re-add: the same replace strategy the remote
    /// applies on upsert, which keeps the two stores trivially reconciled.
    async fn replace_children_tx(
        tx: &mut Transaction<'_, Sqlite>,
        dataset: &Dataset,
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM measurements WHERE dataset_id = ?1")
            .bind(dataset.id.as_str())
            .execute(&mut **tx)
            .await?;
        sqlx::query("DELETE FROM views WHERE dataset_id = ?1")
            .bind(dataset.id.as_str())
            .execute(&mut **tx)
            .await?;

        for measurement in &dataset.measurements {
            Self::put_measurement_tx(tx, dataset.id.as_str(), measurement).await?;
        }
        for (position, view) in dataset.views.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO views (dataset_id, view_type, position)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(dataset_id, view_type) DO UPDATE SET
                    position = excluded.position
                "#,
            )
            .bind(dataset.id.as_str())
            .bind(view.as_str())
            .bind(position as i64)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }

    async fn put_measurement_tx(
        tx: &mut Transaction<'_, Sqlite>,
        dataset_id: &str,
        measurement: &Measurement,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO measurements (id, dataset_id, timestamp_ms, value)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                dataset_id = excluded.dataset_id,
                timestamp_ms = excluded.timestamp_ms,
                value = excluded.value
            "#,
        )
        .bind(measurement.id.as_str())
        .bind(dataset_id)
        .bind(measurement.timestamp.timestamp_millis())
        .bind(measurement.value)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// The remote treats slug as the natural key, so a family landing under
    /// a fresh id evicts any cached family carrying the same slug.
    async fn evict_same_slug_tx(
        tx: &mut Transaction<'_, Sqlite>,
        dataset: &Dataset,
    ) -> Result<(), AppError> {
        let stale_ids: Vec<String> =
            sqlx::query_scalar("SELECT id FROM datasets WHERE slug = ?1 AND id != ?2")
                .bind(dataset.slug.as_str())
                .bind(dataset.id.as_str())
                .fetch_all(&mut **tx)
                .await?;
        for id in stale_ids {
            Self::delete_family_tx(tx, &id).await?;
        }
        Ok(())
    }

    async fn delete_family_tx(
        tx: &mut Transaction<'_, Sqlite>,
        dataset_id: &str,
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM measurements WHERE dataset_id = ?1")
            .bind(dataset_id)
            .execute(&mut **tx)
            .await?;
        sqlx::query("DELETE FROM views WHERE dataset_id = ?1")
            .bind(dataset_id)
            .execute(&mut **tx)
            .await?;
        sqlx::query("DELETE FROM datasets WHERE id = ?1")
            .bind(dataset_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    async fn assemble_all(
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<Dataset>, AppError> {
        let dataset_rows: Vec<DatasetRow> = sqlx::query_as(&format!(
            "SELECT {DATASET_COLUMNS} FROM datasets ORDER BY title ASC"
        ))
        .fetch_all(&mut **tx)
        .await?;

        let measurement_rows: Vec<MeasurementRow> = sqlx::query_as(
            "SELECT id, dataset_id, timestamp_ms, value FROM measurements ORDER BY dataset_id, timestamp_ms ASC",
        )
        .fetch_all(&mut **tx)
        .await?;

        let view_rows: Vec<ViewRow> = sqlx::query_as(
            "SELECT dataset_id, view_type, position FROM views ORDER BY dataset_id, position ASC",
        )
        .fetch_all(&mut **tx)
        .await?;

        let mut measurements_by_dataset: HashMap<String, Vec<MeasurementRow>> = HashMap::new();
        for row in measurement_rows {
            measurements_by_dataset
                .entry(row.dataset_id.clone())
                .or_default()
                .push(row);
        }
        let mut views_by_dataset: HashMap<String, Vec<ViewRow>> = HashMap::new();
        for row in view_rows {
            views_by_dataset
                .entry(row.dataset_id.clone())
                .or_default()
                .push(row);
        }

        dataset_rows
            .into_iter()
            .map(|row| {
                let measurements = measurements_by_dataset.remove(&row.id).unwrap_or_default();
                let views = views_by_dataset.remove(&row.id).unwrap_or_default();
                dataset_from_rows(row, measurements, views)
            })
            .collect()
    }

    async fn assemble_one(
        tx: &mut Transaction<'_, Sqlite>,
        row: DatasetRow,
    ) -> Result<Dataset, AppError> {
        let measurements: Vec<MeasurementRow> = sqlx::query_as(
            "SELECT id, dataset_id, timestamp_ms, value FROM measurements WHERE dataset_id = ?1 ORDER BY timestamp_ms ASC",
        )
        .bind(&row.id)
        .fetch_all(&mut **tx)
        .await?;

        let views: Vec<ViewRow> = sqlx::query_as(
            "SELECT dataset_id, view_type, position FROM views WHERE dataset_id = ?1 ORDER BY position ASC",
        )
        .bind(&row.id)
        .fetch_all(&mut **tx)
        .await?;

        dataset_from_rows(row, measurements, views)
    }
}

#[async_trait]
impl LocalCacheStore for SqliteCacheStore {
    async fn replace_all(&self, datasets: Vec<Dataset>) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM measurements")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM views").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM datasets").execute(&mut *tx).await?;

        for dataset in &datasets {
            Self::put_dataset_tx(&mut tx, dataset).await?;
            Self::replace_children_tx(&mut tx, dataset).await?;
        }

        tx.commit().await?;
        self.bump_revision();
        Ok(())
    }

    async fn upsert_dataset(&self, dataset: Dataset) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        Self::evict_same_slug_tx(&mut tx, &dataset).await?;
        Self::put_dataset_tx(&mut tx, &dataset).await?;
        Self::replace_children_tx(&mut tx, &dataset).await?;
        tx.commit().await?;
        self.bump_revision();
        Ok(())
    }

    async fn insert_measurement(
        &self,
        dataset_id: &DatasetId,
        measurement: Measurement,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        Self::put_measurement_tx(&mut tx, dataset_id.as_str(), &measurement).await?;
        tx.commit().await?;
        self.bump_revision();
        Ok(())
    }

    async fn delete_measurement(&self, id: &MeasurementId) -> Result<(), AppError> {
        sqlx::query("DELETE FROM measurements WHERE id = ?1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;
        self.bump_revision();
        Ok(())
    }

    async fn delete_dataset(&self, id: &DatasetId) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        Self::delete_family_tx(&mut tx, id.as_str()).await?;
        tx.commit().await?;
        self.bump_revision();
        Ok(())
    }

    async fn list_datasets(&self) -> Result<Vec<Dataset>, AppError> {
        // Reads run inside one transaction so the assembly sees a single
        // snapshot even while a bulk-replace commits concurrently.
        let mut tx = self.pool.begin().await?;
        let datasets = Self::assemble_all(&mut tx).await?;
        tx.commit().await?;
        Ok(datasets)
    }

    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Dataset>, AppError> {
        let mut tx = self.pool.begin().await?;
        let row: Option<DatasetRow> = sqlx::query_as(&format!(
            "SELECT {DATASET_COLUMNS} FROM datasets WHERE slug = ?1 LIMIT 1"
        ))
        .bind(slug.as_str())
        .fetch_optional(&mut *tx)
        .await?;

        let dataset = match row {
            Some(row) => Some(Self::assemble_one(&mut tx, row).await?),
            None => None,
        };
        tx.commit().await?;
        Ok(dataset)
    }

    async fn dataset_count(&self) -> Result<u64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM datasets")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }

    fn watch_revision(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}
