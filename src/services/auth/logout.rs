use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::utils::jwt::JwtUtils;

use super::AuthService;

/// 注销：吊销当前 access token 并清除 refresh cookie
pub async fn handle_logout(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(user) = RequireJWT::extract_current_user(request) {
        // 吊销记录只需保留到 token 自然过期
        let ttl = JwtUtils::verify_access_token(&user.access_token)
            .map(|claims| {
                let remaining = claims.exp as i64 - chrono::Utc::now().timestamp();
                remaining.max(1) as u64
            })
            .unwrap_or(1);

        service
            .get_cache(request)
            .insert_raw(JwtUtils::revoked_key(&user.access_token), "1".to_string(), ttl)
            .await;
        tracing::info!("User {} logged out", user.email);
    }

    let empty_cookie = JwtUtils::create_empty_refresh_token_cookie();
    Ok(HttpResponse::Ok()
        .cookie(empty_cookie)
        .json(ApiResponse::<()>::success_empty("Logged out successfully")))
}
