use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::models::auth::requests::{
    DevLoginRequest, LoginRequest, MagicLinkRequest, MagicLinkVerifyRequest, RegisterRequest,
};
use crate::services::AuthService;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn register(
    req: HttpRequest,
    user_data: web::Json<RegisterRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.register(user_data.into_inner(), &req).await
}

pub async fn login(
    req: HttpRequest,
    user_data: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login(user_data.into_inner(), &req).await
}

pub async fn request_magic_link(
    req: HttpRequest,
    link_data: web::Json<MagicLinkRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .request_magic_link(link_data.into_inner(), &req)
        .await
}

pub async fn verify_magic_link(
    req: HttpRequest,
    verify_data: web::Json<MagicLinkVerifyRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .verify_magic_link(verify_data.into_inner(), &req)
        .await
}

pub async fn dev_login(
    req: HttpRequest,
    dev_data: web::Json<DevLoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.dev_login(dev_data.into_inner(), &req).await
}

pub async fn refresh_token(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.refresh_token(&request).await
}

pub async fn logout(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.logout(&request).await
}

pub async fn me(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.me(&request).await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .service(
                web::resource("/register")
                    .wrap(RateLimit::register())
                    .route(web::post().to(register)),
            )
            .service(
                web::resource("/login")
                    .wrap(RateLimit::login())
                    .route(web::post().to(login)),
            )
            .service(
                web::resource("/magic-link")
                    .wrap(RateLimit::magic_link())
                    .route(web::post().to(request_magic_link)),
            )
            .service(
                web::resource("/magic-link/verify")
                    .wrap(RateLimit::login())
                    .route(web::post().to(verify_magic_link)),
            )
            .service(
                web::resource("/dev-login")
                    .wrap(RateLimit::login())
                    .route(web::post().to(dev_login)),
            )
            .service(
                web::resource("/refresh")
                    .wrap(RateLimit::refresh_token())
                    .route(web::post().to(refresh_token)),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireJWT)
                    .route("/logout", web::post().to(logout))
                    .route("/me", web::get().to(me)),
            ),
    );
}
