use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    /// 后端出错或值无法读取
    ExistsButNoValue,
}

/// 字符串键值缓存
///
/// `ttl` 以秒为单位，0 表示使用后端默认 TTL。
#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
}

impl dyn ObjectCache {
    /// 读取 JSON 值，反序列化失败视为不存在
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> CacheResult<T> {
        match self.get_raw(key).await {
            CacheResult::Found(raw) => match serde_json::from_str(&raw) {
                Ok(value) => CacheResult::Found(value),
                Err(e) => {
                    warn!("Discarding undecodable cache entry '{}': {}", key, e);
                    self.remove(key).await;
                    CacheResult::NotFound
                }
            },
            CacheResult::NotFound => CacheResult::NotFound,
            CacheResult::ExistsButNoValue => CacheResult::ExistsButNoValue,
        }
    }

    /// 写入 JSON 值
    pub async fn insert_json<T: Serialize>(
        &self,
        key: String,
        value: &T,
        ttl: u64,
    ) -> crate::errors::Result<()> {
        let raw = serde_json::to_string(value)?;
        self.insert_raw(key, raw, ttl).await;
        Ok(())
    }
}
