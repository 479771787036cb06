use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 身份账号
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../bindings/user.ts")]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub password_hash: String,
    pub display_name: Option<String>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(&self) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(&self.email, Some(self.id))
            .map_err(|e| format!("生成 token 对失败: {e}"))
    }
}

/// 已通过认证的请求主体，由 JWT 中间件写入请求扩展
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub email: String,
    // 开发登录没有身份账号
    pub user_id: Option<i64>,
    pub access_token: String,
}
