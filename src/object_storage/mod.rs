//! 对象存储
//!
//! 保存规范化后的题目图片，并给出公开访问地址。

pub mod local;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::utils::random_code::generate_random_code;

pub use local::LocalObjectStorage;

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// 写入对象，返回其公开地址
    async fn upload(&self, path: &str, bytes: &[u8], content_type: &str) -> Result<String>;

    fn public_url(&self, path: &str) -> String;

    /// 读取对象，不存在时返回 None
    async fn read(&self, path: &str) -> Result<Option<Vec<u8>>>;
}

/// 生成对象名：`{毫秒时间戳}-{10 位随机串}.{ext}`
pub fn generate_object_name(extension: &str) -> String {
    format!(
        "{}-{}.{}",
        chrono::Utc::now().timestamp_millis(),
        generate_random_code(10),
        extension
    )
}

pub async fn create_object_storage(config: &AppConfig) -> Result<Arc<dyn ObjectStorage>> {
    let storage = LocalObjectStorage::new(&config.upload.dir, &config.upload.public_base_url).await?;
    Ok(Arc::new(storage))
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_object_name_format() {
        let name = generate_object_name("jpg");
        let re = Regex::new(r"^\d{13}-[A-Za-z0-9]{10}\.jpg$").unwrap();
        assert!(re.is_match(&name), "unexpected name {name}");
    }
}
