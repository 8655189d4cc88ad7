//! Local filesystem object store implementation

use crate::{ObjectError, ObjectMeta, ObjectReader, ObjectStore};
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncReadExt, AsyncSeekExt};

/// Objects stored as files under `<root>/<bucket>/`
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Open the bucket directory `<root>/<bucket>`
    pub async fn connect(root: &Path, bucket: &str) -> Result<Self, ObjectError> {
        let dir = root.join(bucket);
        let metadata = tokio::fs::metadata(&dir).await.map_err(|err| {
            ObjectError::Config(format!("Cannot open bucket directory {}: {err}", dir.display()))
        })?;
        if !metadata.is_dir() {
            return Err(ObjectError::Config(format!(
                "Bucket path is not a directory: {}",
                dir.display()
            )));
        }

        tracing::debug!("Using local bucket directory: {}", dir.display());

        Ok(Self { dir })
    }

    fn object_path(&self, name: &str) -> Result<PathBuf, ObjectError> {
        let relative = Path::new(name);
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(ObjectError::Config(format!(
                "Object name must stay inside the bucket: {name}"
            )));
        }
        Ok(self.dir.join(relative))
    }
}

#[async_trait::async_trait]
impl ObjectStore for LocalStore {
    type Reader = LocalReader;

    async fn stat(&self, name: &str) -> Result<ObjectMeta, ObjectError> {
        let path = self.object_path(name)?;
        let metadata = tokio::fs::metadata(&path).await.map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => ObjectError::NotFound(path.display().to_string()),
            _ => ObjectError::Io(err),
        })?;
        if !metadata.is_file() {
            return Err(ObjectError::NotFound(path.display().to_string()));
        }
        Ok(ObjectMeta {
            size: metadata.len(),
        })
    }

    async fn open(&self, name: &str) -> Result<LocalReader, ObjectError> {
        let path = self.object_path(name)?;
        let file = tokio::fs::File::open(&path).await.map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => ObjectError::NotFound(path.display().to_string()),
            _ => ObjectError::Io(err),
        })?;
        Ok(LocalReader {
            file: Some(file),
            path,
        })
    }
}

/// Seekable reader over a local file
#[derive(Debug)]
pub struct LocalReader {
    file: Option<tokio::fs::File>,
    path: PathBuf,
}

impl LocalReader {
    fn file(&mut self) -> Result<&mut tokio::fs::File, ObjectError> {
        self.file
            .as_mut()
            .ok_or_else(|| ObjectError::Closed(self.path.display().to_string()))
    }
}

#[async_trait::async_trait]
impl ObjectReader for LocalReader {
    async fn seek(&mut self, offset: u64) -> Result<u64, ObjectError> {
        let position = self.file()?.seek(SeekFrom::Start(offset)).await?;
        Ok(position)
    }

    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, ObjectError> {
        let n = self.file()?.read(buf).await?;
        Ok(n)
    }

    fn close(&mut self) {
        self.file = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn bucket_with(name: &str, contents: &[u8]) -> (TempDir, LocalStore) {
        let temp_dir = TempDir::new().unwrap();
        let bucket = temp_dir.path().join("bucket");
        std::fs::create_dir_all(bucket.join(name).parent().unwrap()).unwrap();
        std::fs::write(bucket.join(name), contents).unwrap();
        let store = LocalStore::connect(temp_dir.path(), "bucket").await.unwrap();
        (temp_dir, store)
    }

    #[tokio::test]
    async fn test_stat_reports_size() {
        let (_dir, store) = bucket_with("video/clip.mp4", &[7u8; 1234]).await;
        let meta = store.stat("video/clip.mp4").await.unwrap();
        assert_eq!(meta.size, 1234);
    }

    #[tokio::test]
    async fn test_stat_missing_object() {
        let (_dir, store) = bucket_with("a.bin", b"abc").await;
        let result = store.stat("b.bin").await;
        assert!(matches!(result, Err(ObjectError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_seek_then_read() {
        let (_dir, store) = bucket_with("a.bin", b"0123456789").await;
        let mut reader = store.open("a.bin").await.unwrap();

        assert_eq!(reader.seek(4).await.unwrap(), 4);
        let mut buf = [0u8; 3];
        let n = reader.read(&mut buf).await.unwrap();
        assert_eq!(n, 3);
        assert_eq!(&buf, b"456");
    }

    #[tokio::test]
    async fn test_read_after_close_fails() {
        let (_dir, store) = bucket_with("a.bin", b"abc").await;
        let mut reader = store.open("a.bin").await.unwrap();
        reader.close();

        let mut buf = [0u8; 3];
        let result = reader.read(&mut buf).await;
        assert!(matches!(result, Err(ObjectError::Closed(_))));
    }

    #[tokio::test]
    async fn test_connect_missing_bucket() {
        let temp_dir = TempDir::new().unwrap();
        let result = LocalStore::connect(temp_dir.path(), "nope").await;
        assert!(matches!(result, Err(ObjectError::Config(_))));
    }

    #[tokio::test]
    async fn test_rejects_parent_dir_names() {
        let (_dir, store) = bucket_with("a.bin", b"abc").await;
        let result = store.stat("../bucket/a.bin").await;
        assert!(matches!(result, Err(ObjectError::Config(_))));
    }
}
