use crate::shared::config::DatabaseConfig;
use crate::shared::error::{AppError, Result};
use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};
use std::path::Path;
use tracing::info;

pub type DbPool = Pool<Sqlite>;

pub struct Database;

impl Database {
    pub async fn initialize(config: &DatabaseConfig) -> Result<DbPool> {
        // Create database directory
        if let Some(parent) = Path::new(&config.path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let url = format!("sqlite://{}?mode=rwc", config.path);
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&url)
            .await?;

        info!("Cache database connected: {}", config.path);

        Self::run_migrations(&pool).await?;

        Ok(pool)
    }

    async fn run_migrations(pool: &DbPool) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .map_err(AppError::from)?;
        info!("Cache schema up to date");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> DatabaseConfig {
        DatabaseConfig {
            path: dir.path().join("test.db").display().to_string(),
            max_connections: 1,
        }
    }

    #[tokio::test]
    async fn initialize_creates_file_and_schema() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let pool = Database::initialize(&config).await.unwrap();
        assert!(temp_dir.path().join("test.db").exists());

        for table in ["datasets", "measurements", "views"] {
            let found =
                sqlx::query("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")
                    .bind(table)
                    .fetch_optional(&pool)
                    .await
                    .unwrap();
            assert!(found.is_some(), "table {table} missing");
        }

        pool.close().await;
    }

    #[tokio::test]
    async fn initialize_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let pool = Database::initialize(&config).await.unwrap();
        pool.close().await;
        let pool = Database::initialize(&config).await.unwrap();
        pool.close().await;
    }
}
