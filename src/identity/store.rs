use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::RoleResolver;
use crate::models::teachers::roles::RoleResolution;
use crate::storage::Storage;

/// 查询 teachers 表的解析器
#[derive(Clone)]
pub struct StoreRoleResolver {
    storage: Arc<dyn Storage>,
}

impl StoreRoleResolver {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl RoleResolver for StoreRoleResolver {
    fn name(&self) -> &'static str {
        "backend"
    }

    async fn resolve(&self, email: &str) -> RoleResolution {
        match self.storage.get_teacher_by_email(email).await {
            Ok(Some(teacher)) => {
                debug!("Resolved {} as teacher {}", email, teacher.id);
                RoleResolution::Teacher(teacher)
            }
            Ok(None) => RoleResolution::Student,
            Err(e) => RoleResolution::LookupFailed(e.to_string()),
        }
    }
}
