use async_trait::async_trait;
use uuid::Uuid;

use super::{RoleResolver, StoreRoleResolver};
use crate::models::teachers::{entities::Teacher, roles::RoleResolution};
use crate::utils::validate::normalize_email;

/// 开发用解析器：名单内的邮箱直接视为教师，不访问数据库
pub struct FixtureRoleResolver {
    teachers: Vec<String>,
    fallback: StoreRoleResolver,
}

impl FixtureRoleResolver {
    pub fn new(teachers: Vec<String>, fallback: StoreRoleResolver) -> Self {
        Self {
            teachers: teachers.iter().map(|e| normalize_email(e)).collect(),
            fallback,
        }
    }

    /// 由邮箱派生的固定负数 ID，不会与自增主键冲突
    pub fn synthetic_id(email: &str) -> i64 {
        let uuid = Uuid::new_v5(&Uuid::NAMESPACE_OID, email.as_bytes());
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&uuid.as_bytes()[..8]);
        let positive = (u64::from_be_bytes(bytes) >> 1) as i64;
        -positive.max(1)
    }

    fn is_listed(&self, email: &str) -> bool {
        self.teachers.iter().any(|t| t == email)
    }
}

#[async_trait]
impl RoleResolver for FixtureRoleResolver {
    fn name(&self) -> &'static str {
        "fixture"
    }

    async fn resolve(&self, email: &str) -> RoleResolution {
        let email = normalize_email(email);
        if self.is_listed(&email) {
            return RoleResolution::Teacher(Teacher {
                id: Self::synthetic_id(&email),
                email,
                created_at: chrono::Utc::now(),
            });
        }

        self.fallback.resolve(&email).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_id_is_stable_and_negative() {
        let a = FixtureRoleResolver::synthetic_id("teacher1@school.edu");
        let b = FixtureRoleResolver::synthetic_id("teacher1@school.edu");
        let c = FixtureRoleResolver::synthetic_id("teacher2@school.edu");
        assert_eq!(a, b);
        assert!(a < 0);
        assert_ne!(a, c);
    }
}
