use crate::cache::{
    ObjectCache,
    object_cache::register_builtin_plugins,
    register::{get_object_cache_plugin, registered_object_cache_plugins},
};
use crate::config::AppConfig;
use crate::errors::{QuizRoomError, Result};
use crate::identity::{RoleResolver, build_role_resolver};
use crate::object_storage::{ObjectStorage, create_object_storage};
use crate::storage::Storage;
use crate::utils::validate::normalize_email;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    pub objects: Arc<dyn ObjectStorage>,
    pub resolver: Arc<dyn RoleResolver>,
}

async fn try_cache_plugin(name: &str) -> Option<Arc<dyn ObjectCache>> {
    let constructor = get_object_cache_plugin(name)?;
    match constructor().await {
        Ok(cache) => {
            warn!("Successfully created {} cache backend", name);
            Some(Arc::from(cache))
        }
        Err(e) => {
            warn!("Failed to create {} cache: {}", name, e);
            None
        }
    }
}

/// 创建缓存实例，配置的后端不可用时回退到内存缓存
async fn create_cache(config: &AppConfig) -> Result<Arc<dyn ObjectCache>> {
    let cache_type = config.cache.cache_type.as_str();
    warn!("Attempting to create {} cache backend", cache_type);

    if get_object_cache_plugin(cache_type).is_none() {
        warn!("Cache backend '{}' not found in registry", cache_type);
    } else if let Some(cache) = try_cache_plugin(cache_type).await {
        return Ok(cache);
    }

    if cache_type != "moka" {
        warn!("Falling back to memory cache");
        if let Some(cache) = try_cache_plugin("moka").await {
            return Ok(cache);
        }
    }

    Err(QuizRoomError::cache_plugin_not_found(format!(
        "No cache backend available (tried: {cache_type}, registered: {})",
        registered_object_cache_plugins().join(", ")
    )))
}

/// 确保配置中的教师账号存在
async fn seed_teachers(storage: &Arc<dyn Storage>, emails: &[String]) {
    for email in emails.iter().map(|e| normalize_email(e)).filter(|e| !e.is_empty()) {
        match storage.ensure_teacher(&email).await {
            Ok(teacher) => debug!("Teacher {} ready (ID: {})", teacher.email, teacher.id),
            Err(e) => warn!("Failed to seed teacher {}: {}", email, e),
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储、缓存、对象存储和角色解析器
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let config = AppConfig::get();

    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    register_builtin_plugins();
    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
        debug!("Debug mode: Cache registry is enabled");
    }

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    seed_teachers(&storage, &config.identity.seed_teachers).await;

    let cache = create_cache(config).await?;
    warn!("Cache backend initialized");

    let objects = create_object_storage(config).await?;
    info!("Object storage ready at {}", config.upload.dir);

    let resolver = build_role_resolver(config, storage.clone());
    info!("Role resolver: {}", resolver.name());

    Ok(StartupContext {
        storage,
        cache,
        objects,
        resolver,
    })
}
