use crate::application::ports::ready_flag::ReadyFlagStore;
use crate::shared::error::AppError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

const READY_FLAG_FILE: &str = "local_ready";

/// Marker-file implementation of the ready flag. The file's existence is
/// the flag; its content is irrelevant.
pub struct FileReadyFlag {
    path: PathBuf,
}

impl FileReadyFlag {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(READY_FLAG_FILE),
        }
    }
}

#[async_trait]
impl ReadyFlagStore for FileReadyFlag {
    async fn is_ready(&self) -> Result<bool, AppError> {
        Ok(tokio::fs::try_exists(&self.path).await?)
    }

    async fn mark_ready(&self) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, b"true").await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), AppError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn flag_lifecycle() {
        let dir = TempDir::new().unwrap();
        let flag = FileReadyFlag::new(dir.path());

        assert!(!flag.is_ready().await.unwrap());
        flag.mark_ready().await.unwrap();
        assert!(flag.is_ready().await.unwrap());

        // Marking twice is fine, clearing twice is fine.
        flag.mark_ready().await.unwrap();
        flag.clear().await.unwrap();
        flag.clear().await.unwrap();
        assert!(!flag.is_ready().await.unwrap());
    }

    #[tokio::test]
    async fn mark_ready_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let flag = FileReadyFlag::new(&dir.path().join("nested").join("deeper"));
        flag.mark_ready().await.unwrap();
        assert!(flag.is_ready().await.unwrap());
    }
}
