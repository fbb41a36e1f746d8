// Local filesystem adapter - File system operations backed by tokio::fs

use std::path::Path;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::domain::errors::*;
use crate::ports::*;

/// Local filesystem adapter
pub struct FsLocalAdapter;

impl FsLocalAdapter {
    /// Create new local filesystem adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for FsLocalAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FsPort for FsLocalAdapter {
    async fn file_exists(&self, file_path: &Path) -> Result<bool, DomainError> {
        match fs::metadata(file_path).await {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(DomainError::FsFail(format!(
                "Failed to stat {}: {}",
                file_path.display(),
                e
            ))),
        }
    }

    async fn directory_exists(&self, dir_path: &Path) -> Result<bool, DomainError> {
        Ok(fs::metadata(dir_path)
            .await
            .map(|metadata| metadata.is_dir())
            .unwrap_or(false))
    }

    async fn get_file_size(&self, file_path: &Path) -> Result<u64, DomainError> {
        let metadata = fs::metadata(file_path)
            .await
            .map_err(|e| DomainError::FsFail(format!("Failed to get file size: {}", e)))?;
        Ok(metadata.len())
    }

    async fn delete_file(&self, file_path: &Path) -> Result<(), DomainError> {
        match fs::remove_file(file_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::FsFail(format!("Failed to delete file: {}", e))),
        }
    }

    async fn move_file(&self, from: &Path, to: &Path) -> Result<(), DomainError> {
        // Ensure destination directory exists
        if let Some(parent) = to.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::FsFail(format!("Failed to create directory: {}", e)))?;
        }

        if fs::rename(from, to).await.is_ok() {
            return Ok(());
        }

        // Rename fails across devices; fall back to copy then delete
        debug!("rename {} -> {} failed, copying instead", from.display(), to.display());
        fs::copy(from, to).await.map_err(|e| {
            DomainError::FsFail(format!(
                "Failed to move file from {} to {}: {}",
                from.display(),
                to.display(),
                e
            ))
        })?;
        self.delete_file(from).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_move_creates_parent_and_removes_source() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("a.mp4");
        let to = dir.path().join("nested").join("b.mp4");
        std::fs::write(&from, b"data").unwrap();

        let fs_port = FsLocalAdapter::new();
        fs_port.move_file(&from, &to).await.unwrap();

        assert!(!fs_port.file_exists(&from).await.unwrap());
        assert_eq!(fs_port.get_file_size(&to).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_delete_missing_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let fs_port = FsLocalAdapter::new();
        assert!(fs_port.delete_file(&dir.path().join("gone.mp4")).await.is_ok());
    }

    #[tokio::test]
    async fn test_directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let fs_port = FsLocalAdapter::new();
        assert!(!fs_port.file_exists(dir.path()).await.unwrap());
        assert!(fs_port.directory_exists(dir.path()).await.unwrap());
    }
}
