/*!
 * 速率限制中间件
 *
 * 固定窗口计数，计数器存放在进程内的 moka 缓存中，窗口到期自动清零。
 *
 * ```rust,ignore
 * web::scope("/api/v1/auth")
 *     .service(
 *         web::resource("/login")
 *             .wrap(RateLimit::login())
 *             .route(web::post().to(login)),
 *     )
 * ```
 *
 * - 已认证请求按用户邮箱计数，否则按客户端 IP
 * - 不同端点通过前缀区分计数
 * - 超过限制返回 429，并带 `Retry-After`
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::{CONTENT_TYPE, HeaderName, HeaderValue},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::net::IpAddr;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

use crate::models::users::entities::CurrentUser;
use crate::models::{ApiResponse, ErrorCode};

const WINDOW_SECS: u64 = 60;

/// 全局计数缓存，键为 `前缀:标识`
static RATE_LIMIT_CACHE: Lazy<Cache<String, u32>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(WINDOW_SECS))
        .max_capacity(100_000)
        .build()
});

#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    key_prefix: &'static str,
}

impl RateLimit {
    pub const fn new(key_prefix: &'static str, max_requests: u32) -> Self {
        Self {
            max_requests,
            key_prefix,
        }
    }

    pub const fn login() -> Self {
        Self::new("login", 5)
    }

    pub const fn register() -> Self {
        Self::new("register", 3)
    }

    pub const fn refresh_token() -> Self {
        Self::new("refresh", 10)
    }

    // 链接会写入日志，限制更严
    pub const fn magic_link() -> Self {
        Self::new("magic_link", 3)
    }

    pub const fn image_upload() -> Self {
        Self::new("upload", 10)
    }

    fn key_for(&self, identifier: &str) -> String {
        format!("{}:{}", self.key_prefix, identifier)
    }
}

/// 计一次请求，返回剩余次数；已超限返回 None
async fn consume(key: String, max_requests: u32) -> Option<u32> {
    let current = RATE_LIMIT_CACHE.get(&key).await.unwrap_or(0);
    if current >= max_requests {
        warn!(
            "Rate limit exceeded for key: {} ({}/{})",
            key, current, max_requests
        );
        return None;
    }
    RATE_LIMIT_CACHE.insert(key, current + 1).await;
    Some(max_requests - current - 1)
}

// 反向代理部署时 realip 会读取 Forwarded / X-Forwarded-For
fn request_identifier(req: &ServiceRequest) -> String {
    if let Some(user) = req.extensions().get::<CurrentUser>() {
        return format!("user:{}", user.email);
    }

    let ip = req
        .connection_info()
        .realip_remote_addr()
        .and_then(|addr| addr.parse::<IpAddr>().ok())
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    format!("ip:{ip}")
}

fn too_many_requests() -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", WINDOW_SECS.to_string()))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let limit = self.limit.clone();

        Box::pin(async move {
            let key = limit.key_for(&request_identifier(&req));

            let Some(remaining) = consume(key, limit.max_requests).await else {
                return Ok(req.into_response(too_many_requests().map_into_right_body()));
            };

            let mut res = srv.call(req).await?;
            let headers = res.headers_mut();
            headers.insert(
                HeaderName::from_static("x-ratelimit-limit"),
                HeaderValue::from(limit.max_requests),
            );
            headers.insert(
                HeaderName::from_static("x-ratelimit-remaining"),
                HeaderValue::from(remaining),
            );
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(RateLimit::login().max_requests, 5);
        assert_eq!(RateLimit::register().max_requests, 3);
        assert_eq!(RateLimit::magic_link().key_for("ip:1.2.3.4"), "magic_link:ip:1.2.3.4");
        assert_eq!(RateLimit::image_upload().key_prefix, "upload");
    }

    #[tokio::test]
    async fn test_consume_until_exhausted() {
        let key = format!("test:{}", uuid::Uuid::new_v4());
        assert_eq!(consume(key.clone(), 2).await, Some(1));
        assert_eq!(consume(key.clone(), 2).await, Some(0));
        assert_eq!(consume(key, 2).await, None);
    }
}
