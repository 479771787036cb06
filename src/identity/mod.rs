//! 角色解析
//!
//! 登录后由邮箱判断教师或学生身份。解析策略在启动时按 `identity.mode`
//! 选定一次，之后只通过 `Arc<dyn RoleResolver>` 使用。

pub mod fixture;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::config::AppConfig;
use crate::models::teachers::roles::RoleResolution;
use crate::storage::Storage;

pub use fixture::FixtureRoleResolver;
pub use store::StoreRoleResolver;

#[async_trait]
pub trait RoleResolver: Send + Sync {
    /// 策略名称，用于日志
    fn name(&self) -> &'static str;

    /// 按邮箱解析角色，查询失败以 `LookupFailed` 返回而不是错误
    async fn resolve(&self, email: &str) -> RoleResolution;
}

/// 按配置构建角色解析器
pub fn build_role_resolver(config: &AppConfig, storage: Arc<dyn Storage>) -> Arc<dyn RoleResolver> {
    let store = StoreRoleResolver::new(storage);

    match config.identity.mode.as_str() {
        "fixture" => {
            warn!(
                "Using fixture role resolver with {} listed teacher(s)",
                config.identity.fixture_teachers.len()
            );
            Arc::new(FixtureRoleResolver::new(
                config.identity.fixture_teachers.clone(),
                store,
            ))
        }
        "backend" => Arc::new(store),
        other => {
            warn!("Unknown identity mode '{}', falling back to backend", other);
            Arc::new(store)
        }
    }
}
