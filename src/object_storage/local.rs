use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::ObjectStorage;
use crate::errors::{QuizRoomError, Result};

/// 本地文件系统实现
pub struct LocalObjectStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStorage {
    /// 创建实例，根目录不存在时自动创建
    pub async fn new(root: impl AsRef<Path>, public_base_url: &str) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|e| QuizRoomError::object_storage(format!("创建存储目录失败: {e}")))?;

        Ok(Self {
            root,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }

    // 只接受单层文件名，拒绝路径穿越
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let valid = !path.is_empty()
            && !path.contains(['/', '\\'])
            && path != "."
            && path != "..";
        if !valid {
            return Err(QuizRoomError::object_storage(format!("非法对象路径: {path}")));
        }
        Ok(self.root.join(path))
    }
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    async fn upload(&self, path: &str, bytes: &[u8], content_type: &str) -> Result<String> {
        let file_path = self.resolve(path)?;
        tokio::fs::write(&file_path, bytes)
            .await
            .map_err(|e| QuizRoomError::object_storage(format!("写入对象失败: {e}")))?;

        debug!(
            "Stored object {} ({} bytes, {})",
            path,
            bytes.len(),
            content_type
        );
        Ok(self.public_url(path))
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.public_base_url, path)
    }

    async fn read(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let file_path = self.resolve(path)?;
        match tokio::fs::read(&file_path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(QuizRoomError::object_storage(format!("读取对象失败: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root() -> PathBuf {
        std::env::temp_dir().join(format!("quizroom-objects-{}", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_upload_then_read() {
        let root = temp_root();
        let storage = LocalObjectStorage::new(&root, "http://localhost/api/v1/images/")
            .await
            .unwrap();

        let url = storage
            .upload("1-abc.jpg", b"jpeg-bytes", "image/jpeg")
            .await
            .unwrap();
        assert_eq!(url, "http://localhost/api/v1/images/1-abc.jpg");

        let bytes = storage.read("1-abc.jpg").await.unwrap();
        assert_eq!(bytes.as_deref(), Some(&b"jpeg-bytes"[..]));
        assert!(storage.read("missing.jpg").await.unwrap().is_none());

        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn test_rejects_traversal() {
        let root = temp_root();
        let storage = LocalObjectStorage::new(&root, "http://localhost").await.unwrap();
        assert!(storage.read("../secret").await.is_err());
        assert!(storage.upload("a/b.jpg", b"x", "image/jpeg").await.is_err());
        let _ = std::fs::remove_dir_all(root);
    }
}
