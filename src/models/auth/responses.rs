use crate::models::teachers::entities::Teacher;
use crate::models::teachers::roles::RoleKind;
use crate::models::users::entities::User;
use serde::Serialize;
use ts_rs::TS;

// 登录响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../bindings/auth.ts")]
pub struct LoginResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub user: User,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../bindings/auth.ts")]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}

// 免密链接已发出；开发环境下附带令牌
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../bindings/auth.ts")]
pub struct MagicLinkResponse {
    pub email: String,
    pub expires_in: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

// 当前会话：角色与可见路由
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../bindings/auth.ts")]
pub struct MeResponse {
    pub email: String,
    pub user_id: Option<i64>,
    pub role: RoleKind,
    pub teacher: Option<Teacher>,
    pub routes: Vec<String>,
}
