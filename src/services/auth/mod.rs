pub mod login;
pub mod logout;
pub mod magic_link;
pub mod me;
pub mod register;
pub mod token;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::config::AppConfig;
use crate::identity::RoleResolver;
use crate::models::auth::requests::{
    DevLoginRequest, LoginRequest, MagicLinkRequest, MagicLinkVerifyRequest, RegisterRequest,
};
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode, auth::responses::LoginResponse};
use crate::storage::Storage;
use crate::utils::jwt::{JwtUtils, TokenPair};

use super::app_data;

pub struct AuthService {
    storage: Option<Arc<dyn Storage>>,
}

impl AuthService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => app_data::<dyn Storage>(request),
        }
    }

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> Arc<dyn ObjectCache> {
        app_data::<dyn ObjectCache>(request)
    }

    pub(crate) fn get_resolver(&self, request: &HttpRequest) -> Arc<dyn RoleResolver> {
        app_data::<dyn RoleResolver>(request)
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 邮箱密码注册
    pub async fn register(
        &self,
        register_request: RegisterRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        register::handle_register(self, register_request, request).await
    }

    // 邮箱密码登录
    pub async fn login(
        &self,
        login_request: LoginRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_login(self, login_request, request).await
    }

    // 申请免密登录链接
    pub async fn request_magic_link(
        &self,
        link_request: MagicLinkRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        magic_link::handle_request_magic_link(self, link_request, request).await
    }

    // 使用免密登录链接
    pub async fn verify_magic_link(
        &self,
        verify_request: MagicLinkVerifyRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        magic_link::handle_verify_magic_link(self, verify_request, request).await
    }

    // 开发环境登录
    pub async fn dev_login(
        &self,
        dev_request: DevLoginRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_dev_login(self, dev_request, request).await
    }

    // 刷新令牌
    pub async fn refresh_token(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        token::handle_refresh_token(self, request).await
    }

    // 注销
    pub async fn logout(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        logout::handle_logout(self, request).await
    }

    // 当前会话与角色
    pub async fn me(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        me::handle_me(self, request).await
    }
}

/// 签发令牌对，返回带 refresh cookie 的响应
pub(crate) fn token_response(
    service: &AuthService,
    user: User,
    tokens: TokenPair,
    message: &str,
    created: bool,
) -> HttpResponse {
    let response = LoginResponse {
        access_token: tokens.access_token,
        expires_in: service.get_config().jwt.access_token_expiry * 60,
        user,
    };
    let refresh_cookie = JwtUtils::create_refresh_token_cookie(&tokens.refresh_token);

    let mut builder = if created {
        HttpResponse::Created()
    } else {
        HttpResponse::Ok()
    };
    builder
        .cookie(refresh_cookie)
        .json(ApiResponse::success(response, message))
}

pub(crate) fn token_generation_failed(e: impl std::fmt::Display) -> HttpResponse {
    tracing::error!("Failed to generate JWT token: {}", e);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        "Login failed, unable to generate token",
    ))
}
