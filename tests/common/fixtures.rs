use scales_sync::shared::config::{DatabaseConfig, RemoteConfig, StorageConfig, SyncConfig};
use scales_sync::{AppConfig, Dataset, Unit, ViewType};
use tempfile::TempDir;

pub fn temp_config(dir: &TempDir) -> AppConfig {
    AppConfig {
        database: DatabaseConfig {
            path: dir.path().join("scales.db").display().to_string(),
            max_connections: 5,
        },
        remote: RemoteConfig {
            base_url: "http://localhost:0/api".to_string(),
            request_timeout: 1,
        },
        sync: SyncConfig {
            auto_sync: false,
            sync_interval: 300,
        },
        storage: StorageConfig {
            data_dir: dir.path().display().to_string(),
        },
    }
}

pub fn dataset(title: &str) -> Dataset {
    Dataset::create(title, None, Unit::Count, vec![ViewType::Line]).unwrap()
}
