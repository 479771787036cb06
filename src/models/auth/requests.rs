use serde::Deserialize;
use ts_rs::TS;

// 注册请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../bindings/auth.ts")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

// 密码登录请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../bindings/auth.ts")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// 免密登录链接请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../bindings/auth.ts")]
pub struct MagicLinkRequest {
    pub email: String,
}

// 免密登录验证
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../bindings/auth.ts")]
pub struct MagicLinkVerifyRequest {
    pub token: String,
}

// 开发环境登录
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../bindings/auth.ts")]
pub struct DevLoginRequest {
    pub email: String,
}
